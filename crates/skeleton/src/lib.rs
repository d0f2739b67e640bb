//! # Skeleton Vectorization Library
//!
//! Turns a one-pixel-wide skeleton raster into an ordered set of polylines.
//! The tracer walks foreground pixels greedily, preferring to keep its
//! current heading, and assigns every pixel it consumes to exactly one
//! polyline.
//!
//! ## Core Features
//!
//! - **Neighbor classification**: per-pixel foreground neighbor counts, degree lookup
//! - **Direction-locked tracing**: paths hold a 45° cone around their first step
//! - **Pipeline System**: threshold, trace, simplify and filter in one pass
//! - **GeoJSON Support**: export/import polylines as LineString features
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skeleton::Pipeline;
//! use image::open;
//!
//! let pipeline = Pipeline::builder()
//!     .with_threshold(128)
//!     .with_inline_simplification(true)
//!     .build();
//!
//! let image = open("skeleton.png")?.to_luma8();
//! let result = pipeline.process(&image)?;
//!
//! result.save_geojson("skeleton.geojson")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Driving the tracer directly
//!
//! ```rust,no_run
//! use skeleton::{SkeletonTracer, TracerConfig};
//!
//! let image = image::open("skeleton.png")?.to_luma8();
//! let mut tracer = SkeletonTracer::with_predicate(&image, TracerConfig::default(), |v: u8| v > 200)?;
//! while let Some(polyline) = tracer.trace_next() {
//!     println!("{} points", polyline.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod grid;
pub mod types;
pub mod traits;
pub mod config;
pub mod algorithms;
pub mod pipeline;
pub mod io;

#[cfg(test)]
mod testing;

pub use error::{SkeletonError, Result};
pub use grid::Grid;
pub use types::{GridPoint, Polyline, TracedSkeleton};
pub use traits::*;
pub use algorithms::*;
pub use config::{PipelineConfig, SimplificationConfig, SimplificationMethod};
pub use pipeline::{Pipeline, builder::PipelineBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    /// A T junction: bar along y = 2, stem down x = 6, plus a short dim stub
    fn create_test_image() -> GrayImage {
        let mut img = GrayImage::new(16, 12);
        for x in 2..=12 {
            img.put_pixel(x, 2, Luma([255]));
        }
        for y in 3..=9 {
            img.put_pixel(6, y, Luma([255]));
        }
        img.put_pixel(13, 9, Luma([80]));
        img.put_pixel(14, 9, Luma([80]));
        img
    }

    #[test]
    fn test_pipeline_basic() {
        let pipeline = Pipeline::builder().with_threshold(128).build();
        let image = create_test_image();

        let result = pipeline.process(&image).expect("Pipeline should process successfully");

        assert_eq!(result.image_width, 16);
        assert_eq!(result.image_height, 12);
        assert_eq!(result.polyline_count(), 2);
        // 11 bar pixels + 7 stem pixels, each consumed once
        assert_eq!(result.total_points(), 18);
    }

    #[test]
    fn test_pipeline_without_threshold_keeps_dim_pixels() {
        let pipeline = Pipeline::builder().build();
        let image = create_test_image();

        let result = pipeline.process(&image).expect("Pipeline should process successfully");
        assert_eq!(result.polyline_count(), 3);
        assert_eq!(
            result.polylines[2].points(),
            &[GridPoint::new(13, 9), GridPoint::new(14, 9)]
        );
    }

    #[test]
    fn test_pipeline_with_simplification() {
        let pipeline = Pipeline::builder()
            .with_threshold(128)
            .with_simplification(1.0)
            .build();
        let image = create_test_image();

        let result = pipeline.process(&image).expect("Pipeline should process successfully");
        assert_eq!(result.polyline_count(), 2);
        for polyline in &result.polylines {
            assert_eq!(polyline.len(), 2, "straight runs reduce to endpoints");
        }
    }

    #[test]
    fn test_pipeline_with_vw_simplification() {
        let pipeline = Pipeline::builder()
            .with_threshold(128)
            .with_vw_simplification(1.0)
            .build();

        let result = pipeline.process(&create_test_image()).expect("Pipeline should process successfully");
        assert_eq!(result.polyline_count(), 2);
        assert_eq!(
            result.polylines[0].points(),
            &[GridPoint::new(2, 2), GridPoint::new(12, 2)]
        );
        assert_eq!(
            result.polylines[1].points(),
            &[GridPoint::new(6, 3), GridPoint::new(6, 9)]
        );
    }

    #[test]
    fn test_build_simple_thresholds_only() {
        let pipeline = PipelineBuilder::build_simple(128);
        assert_eq!(pipeline.tracer_config(), &TracerConfig::default());

        let result = pipeline.process(&create_test_image()).expect("Pipeline should process successfully");
        assert_eq!(result.polyline_count(), 2);
        assert_eq!(result.total_points(), 18);
    }

    #[test]
    fn test_border_policy_decides_frame_pixels() {
        let mut image = GrayImage::new(8, 5);
        for x in 0..=5 {
            image.put_pixel(x, 2, Luma([255]));
        }

        let included = Pipeline::builder()
            .with_border_policy(BorderPolicy::Include)
            .build()
            .process(&image)
            .expect("Pipeline should process successfully");
        assert_eq!(included.polyline_count(), 1);
        assert_eq!(included.polylines[0].first(), Some(GridPoint::new(0, 2)));
        assert_eq!(included.polylines[0].len(), 6);

        let excluded = Pipeline::builder()
            .with_border_policy(BorderPolicy::Exclude)
            .build()
            .process(&image)
            .expect("Pipeline should process successfully");
        assert_eq!(excluded.polyline_count(), 1);
        assert_eq!(excluded.polylines[0].first(), Some(GridPoint::new(1, 2)));
        assert_eq!(excluded.polylines[0].last(), Some(GridPoint::new(5, 2)));
        assert_eq!(excluded.polylines[0].len(), 5);
    }

    #[test]
    fn test_inline_simplification_matches_post_simplification() {
        let image = create_test_image();
        let inline = Pipeline::builder()
            .with_threshold(128)
            .with_inline_simplification(true)
            .build()
            .process(&image)
            .expect("inline run");
        let post = Pipeline::builder()
            .with_threshold(128)
            .with_simplification(0.5)
            .build()
            .process(&image)
            .expect("post run");

        assert_eq!(inline.polylines, post.polylines);
    }

    #[test]
    fn test_min_filters_drop_short_polylines() {
        let image = create_test_image();
        let result = Pipeline::builder()
            .with_min_points(3)
            .build()
            .process(&image)
            .expect("Pipeline should process successfully");
        assert_eq!(result.polyline_count(), 2);

        let result = Pipeline::builder()
            .with_threshold(128)
            .with_min_length(8.0)
            .build()
            .process(&image)
            .expect("Pipeline should process successfully");
        assert_eq!(result.polyline_count(), 1);
        assert_eq!(result.polylines[0].first(), Some(GridPoint::new(2, 2)));
    }

    #[test]
    fn test_inverted_input() {
        let mut image = GrayImage::from_pixel(8, 5, Luma([255]));
        for x in 1..=6 {
            image.put_pixel(x, 2, Luma([0]));
        }

        let result = Pipeline::builder()
            .with_inversion()
            .with_threshold(128)
            .build()
            .process(&image)
            .expect("Pipeline should process successfully");

        assert_eq!(result.polyline_count(), 1);
        assert_eq!(result.polylines[0].len(), 6);
    }

    #[test]
    fn test_pipeline_from_config() {
        let config = PipelineConfig {
            tracer: TracerConfig {
                simplify: true,
                ..TracerConfig::default()
            },
            min_length: Some(8.0),
            ..PipelineConfig::default()
        };
        let pipeline = PipelineBuilder::from_config(&config);
        assert!(pipeline.tracer_config().simplify);

        let result = pipeline.process(&create_test_image()).expect("config pipeline runs");
        assert_eq!(result.polyline_count(), 1);
        assert_eq!(
            result.polylines[0].points(),
            &[GridPoint::new(2, 2), GridPoint::new(12, 2)]
        );
    }

    #[test]
    fn test_empty_image_is_an_error() {
        let pipeline = Pipeline::builder().build();
        let image = GrayImage::new(0, 0);
        assert!(matches!(
            pipeline.process(&image),
            Err(SkeletonError::EmptyRaster { .. })
        ));
    }

    #[test]
    fn test_geojson_export() {
        let pipeline = Pipeline::builder().with_threshold(128).build();
        let image = create_test_image();

        let result = pipeline.process(&image).expect("Pipeline should process successfully");
        let geojson = result.to_geojson().expect("Should create GeoJSON");

        assert_eq!(geojson.features.len(), result.polyline_count());
        assert!(geojson.foreign_members.is_some());
    }
}
