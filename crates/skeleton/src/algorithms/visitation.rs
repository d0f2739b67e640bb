use crate::{error::Result, grid::Grid, types::GridPoint};

/// Label written by [`VisitationState::labels`] for pixels no polyline took.
pub const UNASSIGNED: i32 = -1;

/// Write-once record of which polyline consumed each pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitationState {
    owners: Grid<Option<u32>>,
}

impl VisitationState {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            owners: Grid::new_fill(width, height, None)?,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.owners.dimensions()
    }

    /// True iff `pt` lies inside the grid and has never been assigned.
    pub fn is_free(&self, pt: GridPoint) -> bool {
        matches!(self.owners.get(pt), Some(None))
    }

    /// Index of the polyline that consumed `pt`.
    pub fn owner(&self, pt: GridPoint) -> Option<u32> {
        self.owners.get(pt).copied().flatten()
    }

    /// Hand `pt` to polyline `index`.
    ///
    /// # Panics
    ///
    /// If `pt` is out of bounds or already assigned. The tracer checks
    /// [`VisitationState::is_free`] first, so either case is a logic error.
    pub fn assign(&mut self, pt: GridPoint, index: u32) {
        let Some(cell) = self.owners.get_mut(pt) else {
            panic!("visitation assign out of bounds at {pt:?}");
        };
        if let Some(owner) = cell {
            panic!("pixel {pt:?} already belongs to polyline {owner}, cannot assign to {index}");
        }
        *cell = Some(index);
    }

    pub fn assigned_count(&self) -> usize {
        self.owners.cells().iter().filter(|c| c.is_some()).count()
    }

    /// Export as a label grid: polyline index per pixel, [`UNASSIGNED`] elsewhere.
    pub fn labels(&self) -> Grid<i32> {
        self.owners
            .map(|owner| owner.map_or(UNASSIGNED, |i| i32::try_from(i).unwrap_or(i32::MAX)))
    }
}
