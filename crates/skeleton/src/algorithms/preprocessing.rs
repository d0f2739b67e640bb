use image::GrayImage;
use crate::{error::Result, traits::ImagePreprocessor};

/// Binarize to 0/255: pixels above `threshold` become foreground
#[derive(Debug, Clone)]
pub struct ThresholdPreprocessor {
    pub threshold: u8,
}

impl Default for ThresholdPreprocessor {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl ImagePreprocessor for ThresholdPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::contrast::threshold(image, self.threshold))
    }
}

/// Invert intensities, for dark skeletons drawn on a light background
#[derive(Debug, Clone, Default)]
pub struct InvertPreprocessor;

impl ImagePreprocessor for InvertPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        let mut inverted = image.clone();
        image::imageops::invert(&mut inverted);
        Ok(inverted)
    }
}
