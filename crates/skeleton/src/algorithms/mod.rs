pub mod direction;
pub mod neighborhood;
pub mod visitation;
pub mod tracer;
pub mod preprocessing;
pub mod simplification;

pub use direction::*;
pub use neighborhood::*;
pub use visitation::*;
pub use tracer::*;
pub use preprocessing::*;
pub use simplification::*;
