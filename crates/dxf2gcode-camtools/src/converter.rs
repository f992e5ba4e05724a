//! Polyline to G-code conversion
//!
//! Drives one conversion run: partitions the decoded entities, centers the
//! polylines on the print area, and streams the extrusion moves to a writer.

use crate::bounds::{centering_shift, compute_bounds};
use crate::entity::{CurveKind, SourceEntity, UnsupportedNotice};
use crate::error::{CamToolResult, ParameterError, ParameterResult};
use crate::motion::{format_number, MotionGenerator, DEFAULT_PRECISION};
use dxf2gcode_core::{BoundingBox, GeometryError, Point3, Polyline};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::{debug, info, warn};

/// Largest accepted number of fraction digits
pub const MAX_PRECISION: usize = 12;

const PREAMBLE: &str = "G21 ;metric values
G90 ;absolute positioning
M82 ;set extruder to absolute mode
";

/// Parameters for a conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParameters {
    /// Extrusion per mm of travel
    pub extrusion_per_unit: f64,
    /// Feed rate (mm/min); emitted once before any motion when positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_rate: Option<f64>,
    /// X of the print area center (mm)
    pub center_x: f64,
    /// Y of the print area center (mm)
    pub center_y: f64,
    /// Fraction digits in emitted numbers
    pub precision: usize,
}

impl Default for ConversionParameters {
    fn default() -> Self {
        Self {
            extrusion_per_unit: 1.0,
            feed_rate: None,
            center_x: 0.0,
            center_y: 0.0,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ConversionParameters {
    /// Check the parameters before a run
    pub fn validate(&self) -> ParameterResult<()> {
        if !self.extrusion_per_unit.is_finite() {
            return Err(ParameterError::InvalidValue {
                name: "extrusion_per_unit".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        if self.extrusion_per_unit < 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "extrusion_per_unit".to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        if let Some(feed) = self.feed_rate {
            if !feed.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: "feed_rate".to_string(),
                    reason: "must be a finite number".to_string(),
                });
            }
        }
        for (name, value) in [("center_x", self.center_x), ("center_y", self.center_y)] {
            if !value.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: "must be a finite number".to_string(),
                });
            }
        }
        if self.precision > MAX_PRECISION {
            return Err(ParameterError::OutOfRange {
                name: "precision".to_string(),
                value: self.precision as f64,
                min: 0.0,
                max: MAX_PRECISION as f64,
            });
        }
        Ok(())
    }

    /// Feed rate to emit, if any
    fn effective_feed_rate(&self) -> Option<f64> {
        self.feed_rate.filter(|f| *f > 0.0)
    }
}

/// Outcome of a conversion run
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Bounds of the polylines before centering
    pub bounds: BoundingBox,
    /// Translation applied to every polyline
    pub shift: Point3,
    /// Number of polylines converted
    pub polyline_count: usize,
    /// Number of travel moves written
    pub travel_moves: usize,
    /// Number of extrude moves written
    pub extrude_moves: usize,
    /// Cumulative extrusion at the end of the run
    pub total_extrusion: f64,
    /// One notice per unsupported entity
    pub notices: Vec<UnsupportedNotice>,
}

impl ConversionReport {
    /// True when no vertex was printed
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Report as pretty-printed JSON
    pub fn to_json(&self) -> CamToolResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PRINT INFO:")?;
        if self.polyline_count == 0 {
            return write!(f, "No supported entities found");
        }
        if self.is_empty() {
            return write!(f, "No vertices found in {} polylines", self.polyline_count);
        }
        let (min, max) = (self.bounds.min, self.bounds.max);
        writeln!(f, "X min: {:.6}; X max: {:.6}", min.x, max.x)?;
        writeln!(f, "Y min: {:.6}; Y max: {:.6}", min.y, max.y)?;
        write!(f, "Z min: {:.6}; Z max: {:.6}", min.z, max.z)
    }
}

/// Converts decoded entities into extrusion G-code
#[derive(Debug, Clone, Default)]
pub struct PolylineConverter {
    params: ConversionParameters,
}

impl PolylineConverter {
    /// Create a converter with the given parameters
    pub fn new(params: ConversionParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ConversionParameters {
        &self.params
    }

    /// Run one conversion, writing G-code to `writer`
    pub fn convert<W: Write>(
        &self,
        entities: Vec<SourceEntity>,
        writer: &mut W,
    ) -> CamToolResult<ConversionReport> {
        self.params.validate()?;
        let precision = self.params.precision;

        let (mut polylines, notices) = partition(entities);
        let bounds = compute_bounds(&polylines);
        let shift = match centering_shift(&bounds, self.params.center_x, self.params.center_y) {
            Ok(shift) => shift,
            Err(GeometryError::EmptyBounds) => {
                warn!("No vertices to print; output will contain no moves");
                Point3::ZERO
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Bounds {:?}, shift {}", bounds, shift);

        writer.write_all(PREAMBLE.as_bytes())?;
        if let Some(feed) = self.params.effective_feed_rate() {
            writeln!(writer, "G1 F{}", format_number(feed, precision))?;
        }

        let mut generator = MotionGenerator::new(self.params.extrusion_per_unit);
        let mut travel_moves = 0;
        let mut extrude_moves = 0;
        for (i, polyline) in polylines.iter_mut().enumerate() {
            polyline.translate(shift);
            let commands = generator.extrude_polyline(polyline);
            debug!("Polyline {}: {} moves", i, commands.len());
            for command in &commands {
                if command.is_travel() {
                    travel_moves += 1;
                } else {
                    extrude_moves += 1;
                }
                writeln!(writer, "{}", command.to_gcode(precision))?;
            }
        }
        writer.flush()?;

        let report = ConversionReport {
            bounds,
            shift,
            polyline_count: polylines.len(),
            travel_moves,
            extrude_moves,
            total_extrusion: generator.state().cumulative_extrusion,
            notices,
        };
        info!(
            "Converted {} polylines: {} travel, {} extrude moves, E{:.3}",
            report.polyline_count, report.travel_moves, report.extrude_moves, report.total_extrusion
        );
        Ok(report)
    }

    /// Run one conversion into a string
    pub fn convert_to_string(
        &self,
        entities: Vec<SourceEntity>,
    ) -> CamToolResult<(String, ConversionReport)> {
        let mut buffer = Vec::new();
        let report = self.convert(entities, &mut buffer)?;
        let gcode = String::from_utf8(buffer).map_err(|e| {
            crate::error::CamToolError::GenerationFailed(format!("non UTF-8 output: {}", e))
        })?;
        Ok((gcode, report))
    }
}

/// Split entities into polylines (in order) and one notice per curve
///
/// Notices are returned, not logged; the caller decides how to show them.
fn partition(entities: Vec<SourceEntity>) -> (Vec<Polyline>, Vec<UnsupportedNotice>) {
    let mut polylines = Vec::new();
    let mut notices = Vec::new();
    for (index, entity) in entities.into_iter().enumerate() {
        match entity {
            SourceEntity::Polyline(polyline) => polylines.push(polyline),
            SourceEntity::BulgedPolyline(polyline) => {
                debug!("Polyline {} has arc segments, printing chords", index);
                polylines.push(polyline);
                notices.push(UnsupportedNotice {
                    index,
                    kind: CurveKind::PolylineArc,
                });
            }
            SourceEntity::Curve(kind) => {
                debug!("Skipping {} entity at {}", kind, index);
                notices.push(UnsupportedNotice { index, kind });
            }
            SourceEntity::Other(name) => debug!("Ignoring {} entity at {}", name, index),
        }
    }
    (polylines, notices)
}
