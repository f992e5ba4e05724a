//! # dxf2gcode Core
//!
//! Core types and utilities for dxf2gcode.
//! Provides the geometry primitives (points, polylines, bounding boxes)
//! shared by the conversion pipeline, and the geometry error type.

pub mod error;
pub mod geometry;

pub use error::GeometryError;
pub use geometry::{distance, BoundingBox, Point3, Polyline};
