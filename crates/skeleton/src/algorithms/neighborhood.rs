//! Live-neighbor counting over a binary raster.
//!
//! Every foreground pixel gets the number of foreground pixels among its
//! neighbors under the chosen [`Connectivity`]. The tracer consumes the raw
//! counts as its "remaining degree" bookkeeping; exact-degree classification
//! (degree 1 = endpoint, for instance) shares the same counting kernel.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use crate::{error::Result, grid::Grid, traits::Raster, types::GridPoint};

/// Value written by threshold mode for pixels of the requested degree.
pub const DEGREE_MATCH: u8 = u8::MAX;

const MOORE: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const CROSS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Connectivity {
    /// 8-connected: horizontal, vertical and diagonal neighbors
    #[default]
    Moore,
    /// 4-connected von Neumann cross: no diagonals
    Cross,
}

impl Connectivity {
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::Moore => &MOORE,
            Self::Cross => &CROSS,
        }
    }
}

/// How the outermost ring of pixels is counted
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BorderPolicy {
    /// Count border pixels too; neighbors outside the grid are background
    #[default]
    Include,
    /// Leave the 1-pixel frame at zero, so it never seeds a trace
    Exclude,
}

/// Per-pixel live-neighbor counts, decremented as the tracer consumes pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborGrid {
    counts: Grid<u8>,
}

impl NeighborGrid {
    pub fn from_grid(counts: Grid<u8>) -> Self {
        Self { counts }
    }

    pub fn count(&self, pt: GridPoint) -> u8 {
        self.counts.get(pt).copied().unwrap_or(0)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.counts.dimensions()
    }

    pub fn as_grid(&self) -> &Grid<u8> {
        &self.counts
    }

    pub fn into_grid(self) -> Grid<u8> {
        self.counts
    }

    /// Remove `pt` from the live degree of each of its 8 neighbors.
    /// Counts saturate at zero and off-grid neighbors are skipped.
    pub fn decrement_around(&mut self, pt: GridPoint) {
        for &(dx, dy) in &MOORE {
            if let Some(count) = self.counts.get_mut(pt.translate(dx, dy)) {
                *count = count.saturating_sub(1);
            }
        }
    }
}

/// Counts foreground neighbors for every pixel of a raster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborClassifier {
    pub connectivity: Connectivity,
    pub border: BorderPolicy,
}

impl NeighborClassifier {
    pub fn new(connectivity: Connectivity, border: BorderPolicy) -> Self {
        Self {
            connectivity,
            border,
        }
    }

    /// Raw mode: neighbor count for foreground pixels, 0 for background.
    pub fn count<R: Raster + ?Sized>(&self, raster: &R) -> Result<NeighborGrid> {
        self.classify(raster, |count| count).map(NeighborGrid::from_grid)
    }

    /// Threshold mode: [`DEGREE_MATCH`] where a foreground pixel has exactly
    /// `degree` neighbors, 0 everywhere else.
    pub fn classify_degree<R: Raster + ?Sized>(&self, raster: &R, degree: u8) -> Result<Grid<u8>> {
        self.classify(raster, |count| if count == degree { DEGREE_MATCH } else { 0 })
    }

    /// Coordinates of foreground pixels with exactly `degree` neighbors, row-major.
    pub fn find_degree<R: Raster + ?Sized>(&self, raster: &R, degree: u8) -> Result<Vec<GridPoint>> {
        Ok(find_value(&self.classify_degree(raster, degree)?, DEGREE_MATCH))
    }

    fn classify<R, F>(&self, raster: &R, mut output: F) -> Result<Grid<u8>>
    where
        R: Raster + ?Sized,
        F: FnMut(u8) -> u8,
    {
        let (width, height) = raster.dimensions();
        let mut out = Grid::new_fill(width, height, 0u8)?;
        let on_border = |pt: GridPoint| {
            pt.x == 0 || pt.y == 0 || pt.x as u32 == width - 1 || pt.y as u32 == height - 1
        };

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let pt = GridPoint::new(x, y);
                if !is_set(raster, pt) {
                    continue;
                }
                if self.border == BorderPolicy::Exclude && on_border(pt) {
                    continue;
                }

                let count = self
                    .connectivity
                    .offsets()
                    .iter()
                    .filter(|&&(dx, dy)| is_set(raster, pt.translate(dx, dy)))
                    .count() as u8;

                if let Some(cell) = out.get_mut(pt) {
                    *cell = output(count);
                }
            }
        }

        Ok(out)
    }
}

fn is_set<R: Raster + ?Sized>(raster: &R, pt: GridPoint) -> bool {
    raster.at(pt).is_some_and(|v| v > 0)
}

/// All coordinates whose cell equals `value`, in row-major order.
pub fn find_value(grid: &Grid<u8>, value: u8) -> Vec<GridPoint> {
    grid.points()
        .zip(grid.cells())
        .filter(|&(_, &cell)| cell == value)
        .map(|(pt, _)| pt)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pts, raster};

    #[test]
    fn raw_counts_under_moore_and_cross() {
        let plus = raster(&[
            ".....",
            "..#..",
            ".###.",
            "..#..",
            ".....",
        ]);
        let x_shape = raster(&[
            ".....",
            ".#.#.",
            "..#..",
            ".#.#.",
            ".....",
        ]);
        let center = GridPoint::new(2, 2);

        let moore = NeighborClassifier::default();
        let cross = NeighborClassifier::new(Connectivity::Cross, BorderPolicy::Include);

        assert_eq!(moore.count(&plus).unwrap().count(center), 4);
        assert_eq!(cross.count(&plus).unwrap().count(center), 4);
        assert_eq!(moore.count(&x_shape).unwrap().count(center), 4);
        assert_eq!(cross.count(&x_shape).unwrap().count(center), 0);
    }

    #[test]
    fn background_pixels_stay_zero() {
        let img = raster(&[
            "###",
            "#.#",
            "###",
        ]);
        let counts = NeighborClassifier::default().count(&img).unwrap();
        assert_eq!(counts.count(GridPoint::new(1, 1)), 0);
        assert_eq!(counts.count(GridPoint::new(0, 0)), 2);
        assert_eq!(counts.count(GridPoint::new(1, 0)), 4);
    }

    #[test]
    fn border_policy_controls_the_frame() {
        let img = raster(&[
            ".....",
            ".....",
            "#####",
            ".....",
            ".....",
        ]);
        let include = NeighborClassifier::default().count(&img).unwrap();
        let exclude = NeighborClassifier::new(Connectivity::Moore, BorderPolicy::Exclude)
            .count(&img)
            .unwrap();

        assert_eq!(include.count(GridPoint::new(0, 2)), 1);
        assert_eq!(include.count(GridPoint::new(4, 2)), 1);
        assert_eq!(exclude.count(GridPoint::new(0, 2)), 0);
        assert_eq!(exclude.count(GridPoint::new(4, 2)), 0);
        assert_eq!(exclude.count(GridPoint::new(2, 2)), 2);
    }

    #[test]
    fn threshold_mode_marks_exact_degree() {
        let img = raster(&[
            ".......",
            ".#####.",
            ".......",
        ]);
        let classifier = NeighborClassifier::default();
        let ends = classifier.classify_degree(&img, 1).unwrap();

        assert_eq!(ends.get(GridPoint::new(1, 1)), Some(&DEGREE_MATCH));
        assert_eq!(ends.get(GridPoint::new(3, 1)), Some(&0));
        assert_eq!(ends.get(GridPoint::new(0, 0)), Some(&0));
        assert_eq!(
            classifier.find_degree(&img, 1).unwrap(),
            pts(&[(1, 1), (5, 1)])
        );
        assert_eq!(
            classifier.find_degree(&img, 2).unwrap(),
            pts(&[(2, 1), (3, 1), (4, 1)])
        );
    }

    #[test]
    fn threshold_mode_follows_connectivity() {
        let img = raster(&[
            ".....",
            ".##..",
            "..#..",
            "..##.",
            ".....",
        ]);
        let moore = NeighborClassifier::default();
        let cross = NeighborClassifier::new(Connectivity::Cross, BorderPolicy::Include);

        assert!(moore.find_degree(&img, 1).unwrap().is_empty());
        assert_eq!(cross.find_degree(&img, 1).unwrap(), pts(&[(1, 1), (3, 3)]));

        let cross_two = cross.classify_degree(&img, 2).unwrap();
        assert_eq!(cross_two.get(GridPoint::new(2, 2)), Some(&DEGREE_MATCH));
        assert_eq!(cross_two.get(GridPoint::new(1, 1)), Some(&0));
    }

    #[test]
    fn threshold_mode_skips_the_excluded_frame() {
        let img = raster(&[
            ".....",
            ".....",
            "#####",
            ".....",
            ".....",
        ]);
        let include = NeighborClassifier::default();
        let exclude = NeighborClassifier::new(Connectivity::Moore, BorderPolicy::Exclude);

        assert_eq!(include.find_degree(&img, 1).unwrap(), pts(&[(0, 2), (4, 2)]));
        assert!(exclude.find_degree(&img, 1).unwrap().is_empty());

        let ends = exclude.classify_degree(&img, 0).unwrap();
        // frame pixels are skipped entirely, not reported as degree 0
        assert_eq!(ends.get(GridPoint::new(0, 2)), Some(&0));
        assert_eq!(
            exclude.find_degree(&img, 2).unwrap(),
            pts(&[(1, 2), (2, 2), (3, 2)])
        );
    }

    #[test]
    fn decrement_saturates_and_ignores_off_grid_neighbors() {
        let img = raster(&[
            "##",
            "##",
        ]);
        let mut counts = NeighborClassifier::default().count(&img).unwrap();
        assert_eq!(counts.as_grid().cells(), &[3, 3, 3, 3]);

        for _ in 0..5 {
            counts.decrement_around(GridPoint::new(0, 0));
        }
        // the pixel itself is not its own neighbor
        assert_eq!(counts.count(GridPoint::new(0, 0)), 3);
        assert_eq!(counts.count(GridPoint::new(1, 1)), 0);
        assert_eq!(counts.count(GridPoint::new(1, 0)), 0);
    }

    #[test]
    fn connectivity_parses_from_str() {
        assert_eq!("cross".parse::<Connectivity>().unwrap(), Connectivity::Cross);
        assert_eq!(Connectivity::Moore.to_string(), "moore");
        assert_eq!("exclude".parse::<BorderPolicy>().unwrap(), BorderPolicy::Exclude);
    }
}
