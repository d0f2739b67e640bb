//! Owned row-major grids used for rasters and per-pixel bookkeeping.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SkeletonError},
    types::GridPoint,
};

/// A dense `width x height` grid stored row by row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn new_fill(width: u32, height: u32, value: T) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![value; len],
        })
    }
}

impl<T> Grid<T> {
    /// Wrap an existing row-major buffer.
    pub fn from_vec(width: u32, height: u32, cells: Vec<T>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if cells.len() != expected {
            return Err(SkeletonError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    pub fn contains(&self, pt: GridPoint) -> bool {
        pt.x >= 0 && pt.y >= 0 && (pt.x as u32) < self.width && (pt.y as u32) < self.height
    }

    /// Linear index of `pt`, or `None` when it falls outside the grid.
    pub fn index_of(&self, pt: GridPoint) -> Option<usize> {
        if !self.contains(pt) {
            return None;
        }
        Some(pt.y as usize * self.width as usize + pt.x as usize)
    }

    /// Inverse of [`Grid::index_of`] for indices inside the buffer.
    pub fn point_at(&self, index: usize) -> GridPoint {
        let width = self.width as usize;
        GridPoint::new((index % width) as i32, (index / width) as i32)
    }

    pub fn get(&self, pt: GridPoint) -> Option<&T> {
        self.index_of(pt).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pt: GridPoint) -> Option<&mut T> {
        let index = self.index_of(pt)?;
        Some(&mut self.cells[index])
    }

    /// Every coordinate in row-major order (top to bottom, left to right).
    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        (0..self.cells.len()).map(move |i| self.point_at(i))
    }

    /// Apply `f` to every cell, keeping the shape.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(SkeletonError::EmptyRaster { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(SkeletonError::EmptyRaster { width, height })
}
