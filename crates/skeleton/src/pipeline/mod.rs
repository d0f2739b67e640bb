pub mod builder;

use image::GrayImage;
use tracing::info;
use crate::{
    algorithms::{SkeletonTracer, TracerConfig},
    error::Result,
    types::TracedSkeleton,
    traits::{ImagePreprocessor, PolylinePostProcessor},
};

/// Preprocess, trace, then post-process one skeleton image
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    tracer: TracerConfig,
    postprocessors: Vec<Box<dyn PolylinePostProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        tracer: TracerConfig,
        postprocessors: Vec<Box<dyn PolylinePostProcessor>>,
    ) -> Self {
        Self {
            preprocessors,
            tracer,
            postprocessors,
        }
    }

    pub fn tracer_config(&self) -> &TracerConfig {
        &self.tracer
    }

    /// Process an image through the entire pipeline
    pub fn process(&self, image: &GrayImage) -> Result<TracedSkeleton> {
        // Step 1: Apply all preprocessors in sequence
        let mut processed_image = image.clone();
        for preprocessor in &self.preprocessors {
            processed_image = preprocessor.preprocess(&processed_image)?;
        }

        // Step 2: Trace the skeleton
        let trace = SkeletonTracer::new(&processed_image, self.tracer)?.run();
        let mut polylines = trace.polylines;
        let traced = polylines.len();

        // Step 3: Apply all post-processors in sequence
        for postprocessor in &self.postprocessors {
            postprocessor.process(&mut polylines)?;
        }

        // Step 4: Drop polylines the post-processors invalidated
        polylines.retain(|polyline| !polyline.is_empty());

        info!(
            traced,
            kept = polylines.len(),
            width = image.width(),
            height = image.height(),
            "skeleton traced"
        );

        Ok(TracedSkeleton {
            polylines,
            image_width: image.width(),
            image_height: image.height(),
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} preprocessors, {} connectivity tracer (simplify: {}), {} postprocessors",
            self.preprocessors.len(),
            self.tracer.connectivity,
            self.tracer.simplify,
            self.postprocessors.len()
        )
    }
}
