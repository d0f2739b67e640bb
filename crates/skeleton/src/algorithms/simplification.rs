use crate::{
    error::Result,
    traits::{PolylinePostProcessor, PolylineSimplifier},
    types::Polyline,
};

/// Douglas-Peucker simplifier using geo crate's implementation
#[derive(Debug, Clone, Default)]
pub struct DouglasPeuckerSimplifier;

impl PolylineSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, polylines: &mut [Polyline], tolerance: f64) -> Result<()> {
        use geo::Simplify;

        for polyline in polylines {
            // Output vertices are a subset of the input, so they stay on the grid
            let simplified = polyline.to_line_string().simplify(&tolerance);
            *polyline = Polyline::from_line_string(&simplified);
        }

        Ok(())
    }
}

/// Visvalingam-Whyatt simplifier using geo crate's implementation
#[derive(Debug, Clone, Default)]
pub struct VisvalingamWhyattSimplifier;

impl PolylineSimplifier for VisvalingamWhyattSimplifier {
    fn simplify(&self, polylines: &mut [Polyline], tolerance: f64) -> Result<()> {
        use geo::SimplifyVw;

        for polyline in polylines {
            let simplified = polyline.to_line_string().simplify_vw(&tolerance);
            *polyline = Polyline::from_line_string(&simplified);
        }

        Ok(())
    }
}

/// Drops polylines with fewer than `min_points` points
#[derive(Debug, Clone)]
pub struct MinimumPointsFilter {
    pub min_points: usize,
}

impl Default for MinimumPointsFilter {
    fn default() -> Self {
        Self { min_points: 2 }
    }
}

impl PolylinePostProcessor for MinimumPointsFilter {
    fn process(&self, polylines: &mut [Polyline]) -> Result<()> {
        for polyline in polylines {
            if polyline.len() < self.min_points {
                polyline.clear();
            }
        }
        Ok(())
    }
}

/// Drops polylines shorter than `min_length` pixels using geo's Euclidean length
#[derive(Debug, Clone)]
pub struct MinimumLengthFilter {
    pub min_length: f64,
}

impl Default for MinimumLengthFilter {
    fn default() -> Self {
        Self { min_length: 3.0 }
    }
}

impl PolylinePostProcessor for MinimumLengthFilter {
    fn process(&self, polylines: &mut [Polyline]) -> Result<()> {
        for polyline in polylines {
            if polyline.length() < self.min_length {
                // Mark polyline as invalid by clearing its points
                polyline.clear();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridPoint;

    fn wobbly() -> Polyline {
        Polyline::from(vec![
            GridPoint::new(0, 0),
            GridPoint::new(1, 0),
            GridPoint::new(2, 1),
            GridPoint::new(3, 0),
            GridPoint::new(4, 0),
            GridPoint::new(10, 0),
        ])
    }

    #[test]
    fn douglas_peucker_keeps_endpoints_on_grid() {
        let mut lines = vec![wobbly()];
        DouglasPeuckerSimplifier
            .simplify(&mut lines, 1.5)
            .expect("simplification succeeds");
        assert_eq!(
            lines[0].points(),
            &[GridPoint::new(0, 0), GridPoint::new(10, 0)]
        );
    }

    #[test]
    fn douglas_peucker_small_tolerance_keeps_corners() {
        let mut lines = vec![wobbly()];
        DouglasPeuckerSimplifier
            .simplify(&mut lines, 0.5)
            .expect("simplification succeeds");
        assert!(lines[0].points().contains(&GridPoint::new(2, 1)));
    }

    #[test]
    fn visvalingam_whyatt_reduces_points() {
        let mut lines = vec![wobbly()];
        VisvalingamWhyattSimplifier
            .simplify(&mut lines, 5.0)
            .expect("simplification succeeds");
        assert!(lines[0].len() < 6);
        assert_eq!(lines[0].first(), Some(GridPoint::new(0, 0)));
        assert_eq!(lines[0].last(), Some(GridPoint::new(10, 0)));
    }

    #[test]
    fn filters_clear_short_polylines() {
        let mut lines = vec![
            Polyline::from(vec![GridPoint::new(0, 0)]),
            Polyline::from(vec![GridPoint::new(0, 0), GridPoint::new(1, 0)]),
            wobbly(),
        ];
        MinimumPointsFilter { min_points: 2 }
            .process(&mut lines)
            .expect("filter succeeds");
        assert!(lines[0].is_empty());
        assert_eq!(lines[1].len(), 2);

        MinimumLengthFilter { min_length: 3.0 }
            .process(&mut lines)
            .expect("filter succeeds");
        assert!(lines[1].is_empty());
        assert_eq!(lines[2].len(), 6);
    }
}
