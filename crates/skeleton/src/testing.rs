//! Shared fixtures for unit tests.

use proptest::prelude::*;

use crate::{grid::Grid, types::GridPoint};

/// Build a raster from ASCII art: `#` is foreground (255), anything else background.
pub(crate) fn raster(rows: &[&str]) -> Grid<u8> {
    let width = rows[0].len() as u32;
    let cells = rows
        .iter()
        .flat_map(|row| {
            assert_eq!(row.len() as u32, width, "ragged raster row {row:?}");
            row.bytes().map(|b| if b == b'#' { 255 } else { 0 })
        })
        .collect();
    Grid::from_vec(width, rows.len() as u32, cells).expect("valid raster")
}

/// Random binary rasters up to 24x18 with 10-60% foreground.
pub(crate) fn any_raster() -> impl Strategy<Value = Grid<u8>> {
    (1u32..=24, 1u32..=18, 0.1f64..0.6).prop_flat_map(|(width, height, density)| {
        prop::collection::vec(prop::bool::weighted(density), (width * height) as usize)
            .prop_map(move |cells| {
                let cells = cells.into_iter().map(|on| if on { 255 } else { 0 }).collect();
                Grid::from_vec(width, height, cells).expect("valid raster")
            })
    })
}

pub(crate) fn pts(coords: &[(i32, i32)]) -> Vec<GridPoint> {
    coords.iter().map(|&(x, y)| GridPoint::new(x, y)).collect()
}
