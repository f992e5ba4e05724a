//! Geometry primitives for the conversion pipeline
//!
//! This module provides:
//! - [`Point3`], a three-axis coordinate with component-wise arithmetic
//! - [`distance`], the 3D Euclidean distance between two points
//! - [`BoundingBox`], an axis-aligned box built by folding points
//! - [`Polyline`], an ordered point sequence whose order defines traversal

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Three-axis coordinate in drawing units (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Point3 {
    /// The origin
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a point from its three coordinates
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise minimum
    pub fn min(self, other: Point3) -> Point3 {
        Point3::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum
    pub fn max(self, other: Point3) -> Point3 {
        Point3::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Returns an error naming the first axis that is NaN or infinite
    pub fn ensure_finite(&self) -> Result<(), GeometryError> {
        for (axis, value) in [('x', self.x), ('y', self.y), ('z', self.z)] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { axis, value });
            }
        }
        Ok(())
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point3 {
    fn add_assign(&mut self, rhs: Point3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3} Z:{:.3}", self.x, self.y, self.z)
    }
}

/// Euclidean distance between two points, using each axis' own delta.
pub fn distance(from: Point3, to: Point3) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dz = to.z - from.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Axis-aligned bounding box
///
/// Starts empty (min = +inf, max = -inf) so the first folded point sets
/// both corners. Folding is commutative and associative per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point3,
    /// Maximum corner
    pub max: Point3,
}

impl BoundingBox {
    /// Create an empty box that contains no points
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Build a box from an iterator of points
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut bounds = Self::empty();
        for point in points {
            bounds.fold(point);
        }
        bounds
    }

    /// Grow the box to contain `point`
    pub fn fold(&mut self, point: Point3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow the box to contain every point of `polyline`
    pub fn fold_polyline(&mut self, polyline: &Polyline) {
        for point in polyline.iter() {
            self.fold(*point);
        }
    }

    /// True if no point has been folded into the box
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the box, or `None` when empty
    pub fn center(&self) -> Option<Point3> {
        if self.is_empty() {
            return None;
        }
        Some(Point3::new(
            (self.max.x + self.min.x) / 2.0,
            (self.max.y + self.min.y) / 2.0,
            (self.max.z + self.min.z) / 2.0,
        ))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// Ordered sequence of points
///
/// Insertion order defines traversal direction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point3>,
}

impl Polyline {
    /// Create an empty polyline
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a polyline from an ordered list of points
    pub fn from_points(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Append a point
    pub fn push(&mut self, point: Point3) {
        self.points.push(point);
    }

    /// Points in traversal order
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// Add `shift` to every point in place
    pub fn translate(&mut self, shift: Point3) {
        for point in &mut self.points {
            *point += shift;
        }
    }

    /// Reverse the traversal direction in place
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Bounding box of this polyline alone
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.points.iter().copied())
    }
}

impl From<Vec<Point3>> for Polyline {
    fn from(points: Vec<Point3>) -> Self {
        Self::from_points(points)
    }
}

impl FromIterator<Point3> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
