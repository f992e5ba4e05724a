//! # dxf2gcode CAM Tools
//!
//! Turns the polylines of a DXF drawing into G-code for an extruding printer.
//!
//! ## Pipeline
//!
//! - **DXF Import**: decodes a drawing into [`SourceEntity`] values
//! - **Bounds**: bounding box of all polylines and the centering shift
//! - **Motion**: travel/extrude moves with cumulative extrusion, building upward
//! - **Converter**: runs the pipeline and streams G-code to any writer
//!
//! Curved entities (splines, arcs, circles, ellipses) are reported and skipped.

pub mod bounds;
pub mod converter;
pub mod dxf_import;
pub mod entity;
pub mod error;
pub mod motion;

pub use bounds::{centering_shift, compute_bounds};
pub use converter::{ConversionParameters, ConversionReport, PolylineConverter};
pub use dxf_import::DxfImporter;
pub use entity::{CurveKind, SourceEntity, UnsupportedNotice};
pub use error::{CamToolError, CamToolResult, FileFormatError, ParameterError};
pub use motion::{ExtruderState, MotionCommand, MotionGenerator};
