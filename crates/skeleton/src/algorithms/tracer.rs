//! Greedy skeleton-to-polyline tracing.
//!
//! The tracer scans the raster row-major for a seed pixel, then walks the
//! skeleton one 8-connected step at a time:
//! - keep going in the previous step's direction if possible,
//! - otherwise repeat the direction from two steps back (this keeps
//!   alternating stair-step runs such as `E, SE, E, SE` in one piece),
//! - otherwise search a candidate list. Before the first step that list is all
//!   eight headings; the first step fixes the polyline's heading and from then
//!   on only the heading and its two 45° neighbors are tried.
//!
//! When nothing matches the polyline ends and the next seed is searched for.
//! Sharp turns and junction branches are therefore left for later seeds, so a
//! single connected component may come out as several polylines.
//!
//! Every accepted pixel is written once into the [`VisitationState`] and
//! removed from the live degree of its neighbors in the [`NeighborGrid`]; a
//! pixel is only eligible as a seed while some neighbor is still unconsumed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    algorithms::{
        direction::Direction,
        neighborhood::{BorderPolicy, Connectivity, NeighborClassifier, NeighborGrid},
        visitation::VisitationState,
    },
    error::{Result, SkeletonError},
    traits::{ForegroundPredicate, NonZero, Raster},
    types::{GridPoint, Polyline},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TracerConfig {
    /// Topology used to count live neighbors for seed eligibility
    pub connectivity: Connectivity,
    /// Whether border pixels get neighbor counts (and may seed a polyline)
    pub border: BorderPolicy,
    /// Collapse straight runs to their endpoints while tracing
    pub simplify: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracerState {
    SeekingSeed,
    ExtendingPath,
    Done,
}

/// Everything one tracer run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonTrace {
    /// Polyline `i` owns exactly the pixels labelled `i` in `visitation`
    pub polylines: Vec<Polyline>,
    /// Live-neighbor counts left over after the run
    pub neighbors: NeighborGrid,
    pub visitation: VisitationState,
}

impl SkeletonTrace {
    pub fn count(&self) -> usize {
        self.polylines.len()
    }
}

pub struct SkeletonTracer<'r, R: Raster + ?Sized, P = NonZero> {
    raster: &'r R,
    predicate: P,
    simplify: bool,
    neighbors: NeighborGrid,
    visitation: VisitationState,
    state: TracerState,
    next_index: u32,
    // Eligibility is only ever lost during a run, so cells before the cursor
    // never need rescanning.
    scan_from: usize,
}

impl<'r, R: Raster + ?Sized> SkeletonTracer<'r, R, NonZero> {
    /// Tracer treating every non-zero pixel as foreground.
    pub fn new(raster: &'r R, config: TracerConfig) -> Result<Self> {
        Self::with_predicate(raster, config, NonZero)
    }
}

impl<'r, R, P> SkeletonTracer<'r, R, P>
where
    R: Raster + ?Sized,
    P: ForegroundPredicate,
{
    pub fn with_predicate(raster: &'r R, config: TracerConfig, predicate: P) -> Result<Self> {
        let neighbors = NeighborClassifier::new(config.connectivity, config.border).count(raster)?;
        Self::with_neighbors(raster, neighbors, config, predicate)
    }

    /// Reuse a precomputed neighbor grid. `config.connectivity` and
    /// `config.border` are ignored; they are already baked into `neighbors`.
    pub fn with_neighbors(
        raster: &'r R,
        neighbors: NeighborGrid,
        config: TracerConfig,
        predicate: P,
    ) -> Result<Self> {
        let (width, height) = raster.dimensions();
        if width == 0 || height == 0 {
            return Err(SkeletonError::EmptyRaster { width, height });
        }
        if neighbors.dimensions() != (width, height) {
            return Err(SkeletonError::DimensionMismatch {
                raster: (width, height),
                grid: neighbors.dimensions(),
            });
        }

        Ok(Self {
            raster,
            predicate,
            simplify: config.simplify,
            neighbors,
            visitation: VisitationState::new(width, height)?,
            state: TracerState::SeekingSeed,
            next_index: 0,
            scan_from: 0,
        })
    }

    pub fn state(&self) -> TracerState {
        self.state
    }

    pub fn neighbors(&self) -> &NeighborGrid {
        &self.neighbors
    }

    pub fn visitation(&self) -> &VisitationState {
        &self.visitation
    }

    /// Number of polylines emitted so far.
    pub fn traced(&self) -> u32 {
        self.next_index
    }

    /// Run one seed-and-extend cycle. Returns `None` once no seed is left.
    pub fn trace_next(&mut self) -> Option<Polyline> {
        if self.state == TracerState::Done {
            return None;
        }
        self.state = TracerState::SeekingSeed;

        let Some(seed) = self.find_seed() else {
            self.state = TracerState::Done;
            debug!(polylines = self.next_index, "no seed left");
            return None;
        };

        let index = self.next_index;
        trace!(index, x = seed.x, y = seed.y, "seed");
        self.consume(seed, index);

        self.state = TracerState::ExtendingPath;
        let mut path = PathCursor::start(index, seed);
        while let Some(dir) = self.extend(&path) {
            path.advance(dir, self.simplify);
        }

        self.next_index += 1;
        self.state = TracerState::SeekingSeed;
        debug!(index, points = path.polyline.len(), heading = ?path.heading, "traced polyline");
        Some(path.polyline)
    }

    /// Trace until no seed is left and hand back every result.
    pub fn run(mut self) -> SkeletonTrace {
        let polylines: Vec<Polyline> = self.by_ref().collect();
        SkeletonTrace {
            polylines,
            neighbors: self.neighbors,
            visitation: self.visitation,
        }
    }

    fn find_seed(&mut self) -> Option<GridPoint> {
        let (width, height) = self.neighbors.dimensions();
        let len = width as usize * height as usize;

        while self.scan_from < len {
            let pt = self.neighbors.as_grid().point_at(self.scan_from);
            if self.visitation.is_free(pt)
                && self.neighbors.count(pt) > 0
                && self.is_foreground(pt)
            {
                return Some(pt);
            }
            self.scan_from += 1;
        }

        None
    }

    fn extend(&mut self, path: &PathCursor) -> Option<Direction> {
        let cur = path.current;

        if let Some(last) = path.last {
            if self.try_take(last.step(cur), path.index) {
                return Some(last);
            }
        }
        if let Some(before_last) = path.before_last {
            if self.try_take(before_last.step(cur), path.index) {
                return Some(before_last);
            }
        }

        let cone;
        let candidates: &[Direction] = match path.heading {
            None => &Direction::ALL,
            Some(heading) => {
                cone = heading.cone();
                &cone
            }
        };

        candidates
            .iter()
            .copied()
            .find(|dir| self.try_take(dir.step(cur), path.index))
    }

    /// Take `pt` for polyline `index` if it is inside, free and foreground.
    fn try_take(&mut self, pt: GridPoint, index: u32) -> bool {
        if !self.visitation.is_free(pt) || !self.is_foreground(pt) {
            return false;
        }
        self.consume(pt, index);
        true
    }

    fn consume(&mut self, pt: GridPoint, index: u32) {
        self.visitation.assign(pt, index);
        self.neighbors.decrement_around(pt);
    }

    fn is_foreground(&self, pt: GridPoint) -> bool {
        self.raster
            .at(pt)
            .is_some_and(|value| self.predicate.is_foreground(value))
    }
}

impl<R, P> Iterator for SkeletonTracer<'_, R, P>
where
    R: Raster + ?Sized,
    P: ForegroundPredicate,
{
    type Item = Polyline;

    fn next(&mut self) -> Option<Polyline> {
        self.trace_next()
    }
}

/// Trace every polyline of `raster` with the default foreground predicate.
pub fn trace_skeleton<R: Raster + ?Sized>(raster: &R, config: TracerConfig) -> Result<SkeletonTrace> {
    Ok(SkeletonTracer::new(raster, config)?.run())
}

/// The polyline under construction and its direction history.
struct PathCursor {
    index: u32,
    polyline: Polyline,
    current: GridPoint,
    last: Option<Direction>,
    before_last: Option<Direction>,
    heading: Option<Direction>,
}

impl PathCursor {
    fn start(index: u32, seed: GridPoint) -> Self {
        Self {
            index,
            polyline: Polyline::new(vec![seed]),
            current: seed,
            last: None,
            before_last: None,
            heading: None,
        }
    }

    fn advance(&mut self, dir: Direction, simplify: bool) {
        let next = dir.step(self.current);

        if self.heading.is_none() {
            self.heading = Some(dir);
        }

        // Same direction twice: the current point is interior to a straight run.
        if simplify && self.last == Some(dir) {
            self.polyline.pop();
        }
        self.polyline.push(next);

        self.before_last = self.last;
        self.last = Some(dir);
        self.current = next;
    }
}
