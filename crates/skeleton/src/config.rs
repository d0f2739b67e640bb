use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use crate::algorithms::TracerConfig;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SimplificationMethod {
    #[default]
    DouglasPeucker,
    VisvalingamWhyatt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimplificationConfig {
    #[serde(default)]
    pub method: SimplificationMethod,
    #[schemars(range(min = 0.0, max = 100.0))]
    pub tolerance: f64,
}

/// Everything needed to build a [`crate::Pipeline`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PipelineConfig {
    /// Binarize the input first; pixels above this value become foreground
    pub threshold: Option<u8>,
    /// Invert the input before thresholding (dark skeleton on light paper)
    pub invert: bool,
    pub tracer: TracerConfig,
    /// Post-trace simplification
    pub simplification: Option<SimplificationConfig>,
    /// Drop polylines with fewer points than this
    pub min_points: usize,
    /// Drop polylines shorter than this many pixels
    pub min_length: Option<f64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: Some(128),
            invert: false,
            tracer: TracerConfig::default(),
            simplification: None,
            min_points: 2,
            min_length: None,
        }
    }
}

impl PipelineConfig {
    /// Get the JSON schema for the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PipelineConfig)
    }
}
