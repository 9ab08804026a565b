//! Planar geometry for graphical fault classification.
//!
//! Gas percentages are projected onto fixed polar axes, the projected points
//! form a polygon, and the polygon's area centroid is located among a table
//! of fault-zone polygons. A point lying exactly on a zone boundary counts as
//! inside that zone.

use tracing::trace;

use crate::error::Result;
use crate::failure::FailureCode;
use crate::gas::Gas;
use crate::units::{Measurement, Unit};

/// Tolerance for collinearity when testing boundary membership.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `magnitude` from the origin in direction `angle`,
    /// counter-clockwise from the positive x axis.
    ///
    /// # Errors
    ///
    /// Fails if `angle` is not an angle unit.
    pub fn from_polar(angle: Measurement, magnitude: f64) -> Result<Self> {
        let theta = angle.convert_to(Unit::RADIANS)?;
        Ok(Self::new(magnitude * theta.cos(), magnitude * theta.sin()))
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Get the length of the line.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Whether `point` lies on the segment, endpoints included.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        let length = self.length();
        if length == 0.0 {
            return self.start.distance(point) <= BOUNDARY_EPSILON;
        }

        let cross = (self.end.x - self.start.x) * (point.y - self.start.y)
            - (self.end.y - self.start.y) * (point.x - self.start.x);
        if (cross / length).abs() > BOUNDARY_EPSILON {
            return false;
        }

        Rect::from_corners(self.start, self.end)
            .inflate(BOUNDARY_EPSILON)
            .contains(point)
    }
}

/// Axis-aligned rectangle defined by its minimum corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Minimum x.
    pub x: f64,
    /// Minimum y.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle containing both corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    /// Bounding box of a point set; `None` when empty.
    #[must_use]
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(first.x, first.y, 0.0, 0.0), |r, p| {
            let min_x = r.x.min(p.x);
            let min_y = r.y.min(p.y);
            let max_x = (r.x + r.width).max(p.x);
            let max_y = (r.y + r.height).max(p.y);
            Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
        }))
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn inflate(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Check if a point is inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A closed polygon over an ordered vertex list. The last vertex connects
/// back to the first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon<'a> {
    vertices: &'a [Point],
}

impl<'a> Polygon<'a> {
    /// Wrap an ordered vertex list.
    #[must_use]
    pub const fn new(vertices: &'a [Point]) -> Self {
        Self { vertices }
    }

    /// Vertices in declared order.
    #[must_use]
    pub const fn vertices(&self) -> &'a [Point] {
        self.vertices
    }

    /// Edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Line> + 'a {
        let v = self.vertices;
        (0..v.len()).map(move |i| Line::new(v[i], v[(i + 1) % v.len()]))
    }

    fn cross_sum(&self) -> f64 {
        self.edges()
            .map(|e| e.start.x * e.end.y - e.end.x * e.start.y)
            .sum()
    }

    /// Shoelace area; positive for counter-clockwise winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.cross_sum() / 2.0
    }

    /// Area centroid, `None` for a degenerate (zero-area) polygon.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        let area = self.signed_area();
        if area == 0.0 || !area.is_finite() {
            return None;
        }

        let (cx, cy) = self.edges().fold((0.0, 0.0), |(cx, cy), e| {
            let cross = e.start.x * e.end.y - e.end.x * e.start.y;
            (cx + (e.start.x + e.end.x) * cross, cy + (e.start.y + e.end.y) * cross)
        });
        let factor = 1.0 / (6.0 * area);
        Some(Point::new(cx * factor, cy * factor))
    }

    /// Containment test. Points on an edge or vertex are inside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        if self.edges().any(|e| e.contains_point(point)) {
            return true;
        }
        match Rect::bounding(self.vertices) {
            Some(bounds) if bounds.contains(point) => {}
            _ => return false,
        }

        // Horizontal ray towards +x; odd number of crossings means inside.
        let mut inside = false;
        for edge in self.edges() {
            let (a, b) = (edge.start, edge.end);
            if (a.y > point.y) != (b.y > point.y) {
                let x_at = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
                if point.x < x_at {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// A named direction on which a gas percentage is plotted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonalAxis {
    /// Gas plotted on this axis.
    pub gas: Gas,
    /// Direction, counter-clockwise from the positive x axis.
    pub angle: Measurement,
}

impl PolygonalAxis {
    /// Create an axis at `degrees`.
    #[must_use]
    pub const fn new(gas: Gas, degrees: f64) -> Self {
        Self { gas, angle: Measurement::degrees(degrees) }
    }

    /// Axis label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.gas.name()
    }

    /// Cartesian point `magnitude` units along the axis.
    ///
    /// # Errors
    ///
    /// Fails if the axis angle is not an angle unit.
    pub fn project(&self, magnitude: f64) -> Result<Point> {
        Point::from_polar(self.angle, magnitude)
    }
}

/// A fault zone: a fault code and the polygon that bounds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    /// Classification reported for points inside the zone.
    pub fault_code: FailureCode,
    /// Zone outline.
    pub vertices: &'static [Point],
}

impl Area {
    /// Create a zone.
    #[must_use]
    pub const fn new(fault_code: FailureCode, vertices: &'static [Point]) -> Self {
        Self { fault_code, vertices }
    }

    /// Zone outline as a polygon.
    #[must_use]
    pub const fn polygon(&self) -> Polygon<'static> {
        Polygon::new(self.vertices)
    }
}

/// Locate `point` among `areas`. When several zones match, the one declared
/// last wins; no match yields [`FailureCode::NA`].
#[must_use]
pub fn classify(areas: &[Area], point: Point) -> FailureCode {
    areas
        .iter()
        .rev()
        .find(|area| area.polygon().contains(point))
        .map_or(FailureCode::NA, |area| area.fault_code)
}

/// The five pentagon axes in plotting order.
pub const PENTAGON_AXES: [PolygonalAxis; 5] = [
    PolygonalAxis::new(Gas::Hydrogen, 90.0),
    PolygonalAxis::new(Gas::Ethane, 162.0),
    PolygonalAxis::new(Gas::Methane, 234.0),
    PolygonalAxis::new(Gas::Ethylene, 306.0),
    PolygonalAxis::new(Gas::Acetylene, 18.0),
];

const fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

const PD_ZONE: &[Point] = &[p(0.0, 33.0), p(-1.0, 33.0), p(-1.0, 24.5), p(0.0, 24.5)];
const D1_ZONE: &[Point] = &[p(0.0, 40.0), p(38.0, 12.4), p(32.0, -6.0), p(4.0, 16.0), p(0.0, 1.5)];
const D2_ZONE: &[Point] = &[p(4.0, 16.0), p(32.0, -6.0), p(24.0, -30.0), p(-1.0, -2.0)];
const S_ZONE: &[Point] = &[
    p(0.0, 1.5),
    p(0.0, 24.5),
    p(-1.0, 24.5),
    p(-1.0, 33.0),
    p(0.0, 33.0),
    p(0.0, 40.0),
    p(-38.0, 12.4),
    p(-35.0, 3.0),
];

/// Duval Pentagon 1 zones.
pub const PENTAGON_ONE_AREAS: &[Area] = &[
    Area::new(FailureCode::PD, PD_ZONE),
    Area::new(FailureCode::D1, D1_ZONE),
    Area::new(FailureCode::D2, D2_ZONE),
    Area::new(
        FailureCode::T3,
        &[p(-1.0, -2.0), p(-6.0, -4.0), p(1.0, -32.4), p(23.3, -32.4), p(24.0, -30.0)],
    ),
    Area::new(FailureCode::T2, &[p(1.0, -32.4), p(-22.5, -32.4), p(-6.0, -4.0)]),
    Area::new(
        FailureCode::T1,
        &[
            p(0.0, 1.5),
            p(-35.0, 3.0),
            p(-23.3, -32.4),
            p(-22.5, -32.4),
            p(-6.0, -4.0),
            p(-1.0, -2.0),
        ],
    ),
    Area::new(FailureCode::S, S_ZONE),
];

/// Duval Pentagon 2 zones. Shares PD, D1, D2 and S with pentagon 1 and
/// splits the thermal region into T3-H, C and O.
pub const PENTAGON_TWO_AREAS: &[Area] = &[
    Area::new(FailureCode::PD, PD_ZONE),
    Area::new(FailureCode::D1, D1_ZONE),
    Area::new(FailureCode::D2, D2_ZONE),
    Area::new(FailureCode::S, S_ZONE),
    Area::new(
        FailureCode::T3H,
        &[p(-1.0, -2.0), p(-3.5, -3.0), p(2.5, -32.4), p(23.3, -32.4), p(24.0, -30.0)],
    ),
    Area::new(
        FailureCode::C,
        &[p(2.5, -32.4), p(-3.5, -3.0), p(-11.0, -8.0), p(-21.5, -32.4)],
    ),
    Area::new(
        FailureCode::O,
        &[
            p(-21.5, -32.4),
            p(-11.0, -8.0),
            p(-3.5, -3.0),
            p(-1.0, -2.0),
            p(0.0, 1.5),
            p(-35.0, 3.0),
            p(-23.3, -32.4),
        ],
    ),
];

/// A Duval pentagon: fixed axes plus a fault-zone table.
#[derive(Debug, Clone, Copy)]
pub struct Pentagon {
    areas: &'static [Area],
}

impl Pentagon {
    /// Pentagon 1 (general faults).
    pub const ONE: Self = Self { areas: PENTAGON_ONE_AREAS };
    /// Pentagon 2 (refined thermal faults).
    pub const TWO: Self = Self { areas: PENTAGON_TWO_AREAS };

    /// Zone table.
    #[must_use]
    pub const fn areas(&self) -> &'static [Area] {
        self.areas
    }

    /// Project percentages (ordered as [`PENTAGON_AXES`]) to the data polygon.
    ///
    /// # Errors
    ///
    /// Fails only if an axis angle is not an angle unit.
    pub fn data_polygon(percentages: [f64; 5]) -> Result<[Point; 5]> {
        let mut points = [Point::ORIGIN; 5];
        for ((point, axis), pct) in points.iter_mut().zip(&PENTAGON_AXES).zip(percentages) {
            *point = axis.project(pct)?;
        }
        Ok(points)
    }

    /// Classify a composition by the centroid of its data polygon.
    ///
    /// A degenerate data polygon has no centroid and classifies as
    /// [`FailureCode::NA`].
    ///
    /// # Errors
    ///
    /// Fails only if an axis angle is not an angle unit.
    pub fn classify(&self, percentages: [f64; 5]) -> Result<FailureCode> {
        let points = Self::data_polygon(percentages)?;
        let Some(centroid) = Polygon::new(&points).centroid() else {
            trace!(?percentages, "degenerate pentagon data polygon");
            return Ok(FailureCode::NA);
        };
        let code = classify(self.areas, centroid);
        trace!(x = centroid.x, y = centroid.y, ?code, "pentagon centroid classified");
        Ok(code)
    }
}
