use crate::{
    pipeline::Pipeline,
    config::{PipelineConfig, SimplificationMethod},
    traits::{ImagePreprocessor, PolylinePostProcessor},
    algorithms::{
        BorderPolicy,
        Connectivity,
        TracerConfig,
        ThresholdPreprocessor,
        InvertPreprocessor,
        DouglasPeuckerSimplifier,
        VisvalingamWhyattSimplifier,
        MinimumPointsFilter,
        MinimumLengthFilter,
    },
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    tracer: TracerConfig,
    postprocessors: Vec<Box<dyn PolylinePostProcessor>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            tracer: TracerConfig::default(),
            postprocessors: Vec::new(),
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Add a post-processor to the pipeline
    pub fn add_postprocessor<P>(mut self, postprocessor: P) -> Self
    where
        P: PolylinePostProcessor + 'static,
    {
        self.postprocessors.push(Box::new(postprocessor));
        self
    }

    /// Binarize the input at `threshold` before tracing
    pub fn with_threshold(self, threshold: u8) -> Self {
        self.add_preprocessor(ThresholdPreprocessor { threshold })
    }

    /// Invert the input before any later preprocessing
    pub fn with_inversion(self) -> Self {
        self.add_preprocessor(InvertPreprocessor)
    }

    /// Replace the whole tracer configuration
    pub fn set_tracer_config(mut self, tracer: TracerConfig) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.tracer.connectivity = connectivity;
        self
    }

    pub fn with_border_policy(mut self, border: BorderPolicy) -> Self {
        self.tracer.border = border;
        self
    }

    /// Collapse straight runs while tracing
    pub fn with_inline_simplification(mut self, simplify: bool) -> Self {
        self.tracer.simplify = simplify;
        self
    }

    /// Add Douglas-Peucker simplification as a post-processing step
    pub fn with_simplification(self, tolerance: f64) -> Self {
        let simplifier = SimplificationProcessor::new(tolerance, SimplificationMethod::DouglasPeucker);
        self.add_postprocessor(simplifier)
    }

    /// Add Visvalingam-Whyatt simplification as a post-processing step
    pub fn with_vw_simplification(self, tolerance: f64) -> Self {
        let simplifier = SimplificationProcessor::new(tolerance, SimplificationMethod::VisvalingamWhyatt);
        self.add_postprocessor(simplifier)
    }

    /// Drop polylines with fewer than `min_points` points
    pub fn with_min_points(self, min_points: usize) -> Self {
        self.add_postprocessor(MinimumPointsFilter { min_points })
    }

    /// Drop polylines shorter than `min_length` pixels
    pub fn with_min_length(self, min_length: f64) -> Self {
        self.add_postprocessor(MinimumLengthFilter { min_length })
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline::new(self.preprocessors, self.tracer, self.postprocessors)
    }

    /// Build a simple pipeline with basic threshold preprocessing
    pub fn build_simple(threshold: u8) -> Pipeline {
        Self::new().with_threshold(threshold).build()
    }

    /// Build a pipeline from a serialized configuration
    pub fn from_config(config: &PipelineConfig) -> Pipeline {
        let mut builder = Self::new();

        if config.invert {
            builder = builder.with_inversion();
        }
        if let Some(threshold) = config.threshold {
            builder = builder.with_threshold(threshold);
        }
        builder = builder.set_tracer_config(config.tracer);

        if let Some(simplification) = &config.simplification {
            builder = builder.add_postprocessor(SimplificationProcessor::new(
                simplification.tolerance,
                simplification.method,
            ));
        }
        if config.min_points > 0 {
            builder = builder.with_min_points(config.min_points);
        }
        if let Some(min_length) = config.min_length {
            builder = builder.with_min_length(min_length);
        }

        builder.build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrapper to use PolylineSimplifier as PolylinePostProcessor
struct SimplificationProcessor {
    tolerance: f64,
    method: SimplificationMethod,
}

impl SimplificationProcessor {
    fn new(tolerance: f64, method: SimplificationMethod) -> Self {
        Self {
            tolerance,
            method,
        }
    }
}

impl PolylinePostProcessor for SimplificationProcessor {
    fn process(&self, polylines: &mut [crate::types::Polyline]) -> crate::error::Result<()> {
        use crate::traits::PolylineSimplifier;

        match self.method {
            SimplificationMethod::DouglasPeucker => {
                DouglasPeuckerSimplifier.simplify(polylines, self.tolerance)
            }
            SimplificationMethod::VisvalingamWhyatt => {
                VisvalingamWhyattSimplifier.simplify(polylines, self.tolerance)
            }
        }
    }
}
