use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered run of pixel coordinates produced by the tracer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<GridPoint>,
}

impl Polyline {
    pub fn new(points: Vec<GridPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GridPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<GridPoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<GridPoint> {
        self.points.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridPoint> {
        self.points.iter()
    }

    pub(crate) fn push(&mut self, pt: GridPoint) {
        self.points.push(pt);
    }

    /// Drops the most recently appended point.
    pub(crate) fn pop(&mut self) -> Option<GridPoint> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Convert to a geo-types LineString for geometric operations
    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(
            self.points
                .iter()
                .map(|p| Coord {
                    x: f64::from(p.x),
                    y: f64::from(p.y),
                })
                .collect(),
        )
    }

    /// Rebuild from a LineString whose vertices lie on the pixel grid.
    pub fn from_line_string(line: &LineString<f64>) -> Self {
        Self::new(
            line.coords()
                .map(|c| GridPoint::new(c.x.round() as i32, c.y.round() as i32))
                .collect(),
        )
    }

    /// Euclidean length along the polyline
    pub fn length(&self) -> f64 {
        use geo::EuclideanLength;
        self.to_line_string().euclidean_length()
    }

    /// Get the bounding box of the polyline
    pub fn bounding_box(&self) -> Option<(GridPoint, GridPoint)> {
        let first = self.first()?;
        Some(self.points.iter().fold((first, first), |(min, max), p| {
            (
                GridPoint::new(min.x.min(p.x), min.y.min(p.y)),
                GridPoint::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}

impl From<Vec<GridPoint>> for Polyline {
    fn from(points: Vec<GridPoint>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a GridPoint;
    type IntoIter = std::slice::Iter<'a, GridPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Polylines traced from one image, in pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedSkeleton {
    pub polylines: Vec<Polyline>,
    /// Original image dimensions
    pub image_width: u32,
    pub image_height: u32,
}

impl TracedSkeleton {
    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }

    pub fn total_points(&self) -> usize {
        self.polylines.iter().map(Polyline::len).sum()
    }

    pub fn total_length(&self) -> f64 {
        self.polylines.iter().map(Polyline::length).sum()
    }
}
