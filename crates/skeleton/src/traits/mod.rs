use image::GrayImage;
use crate::{error::Result, grid::Grid, types::{GridPoint, Polyline}};

/// Read-only 2D pixel buffer the tracer walks over
pub trait Raster {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Pixel value at `(x, y)`, `None` outside the buffer
    fn get(&self, x: u32, y: u32) -> Option<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Pixel value at a signed grid coordinate
    fn at(&self, pt: GridPoint) -> Option<u8> {
        if pt.x < 0 || pt.y < 0 {
            return None;
        }
        self.get(pt.x as u32, pt.y as u32)
    }
}

impl Raster for GrayImage {
    fn width(&self) -> u32 {
        GrayImage::width(self)
    }

    fn height(&self) -> u32 {
        GrayImage::height(self)
    }

    fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.get_pixel_checked(x, y).map(|p| p.0[0])
    }
}

impl Raster for Grid<u8> {
    fn width(&self) -> u32 {
        Grid::width(self)
    }

    fn height(&self) -> u32 {
        Grid::height(self)
    }

    fn get(&self, x: u32, y: u32) -> Option<u8> {
        Grid::get(self, GridPoint::new(x as i32, y as i32)).copied()
    }
}

impl<R: Raster + ?Sized> Raster for &R {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn get(&self, x: u32, y: u32) -> Option<u8> {
        (**self).get(x, y)
    }
}

/// Decides which pixel values count as skeleton foreground
pub trait ForegroundPredicate {
    fn is_foreground(&self, value: u8) -> bool;
}

impl<F> ForegroundPredicate for F
where
    F: Fn(u8) -> bool,
{
    fn is_foreground(&self, value: u8) -> bool {
        self(value)
    }
}

/// Default predicate: any value greater than zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonZero;

impl ForegroundPredicate for NonZero {
    fn is_foreground(&self, value: u8) -> bool {
        value > 0
    }
}

/// Trait for image preprocessing algorithms
pub trait ImagePreprocessor: Send + Sync {
    /// Preprocess the input image (e.g. threshold to a clean 0/255 skeleton)
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for polyline simplification algorithms
pub trait PolylineSimplifier: Send + Sync {
    /// Simplify the polylines by reducing point count
    fn simplify(&self, polylines: &mut [Polyline], tolerance: f64) -> Result<()>;
}

/// Trait for polyline post-processing algorithms
pub trait PolylinePostProcessor: Send + Sync {
    /// Post-process the traced polylines. Clearing a polyline marks it for removal.
    fn process(&self, polylines: &mut [Polyline]) -> Result<()>;
}
