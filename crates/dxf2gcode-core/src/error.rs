//! Error handling for dxf2gcode
//!
//! Provides the geometry error type shared by the geometry layer and the
//! crates built on top of it.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Represents invalid geometric input, such as non-finite coordinates
/// or operations on an empty bounding box.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate was NaN or infinite
    #[error("Non-finite coordinate: {axis}={value}")]
    NonFinite {
        /// The axis holding the bad value.
        axis: char,
        /// The offending value.
        value: f64,
    },

    /// An operation needed at least one point
    #[error("Bounding box is empty")]
    EmptyBounds,
}
