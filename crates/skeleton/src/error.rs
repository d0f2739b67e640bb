use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkeletonError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Raster must be non-empty, got {width}x{height}")]
    EmptyRaster { width: u32, height: u32 },

    #[error("Grid size mismatch: expected {expected} cells, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Dimension mismatch: raster is {raster:?}, neighbor grid is {grid:?}")]
    DimensionMismatch { raster: (u32, u32), grid: (u32, u32) },

    #[error("Geometric computation error: {0}")]
    GeometricComputation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, SkeletonError>;
