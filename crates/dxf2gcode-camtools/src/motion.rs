//! Motion generation
//!
//! Turns polylines into travel and extrude moves for an extruder running in
//! absolute (M82) mode. Extrusion is a running total over the whole run, so
//! one [`MotionGenerator`] must be used for every polyline of a conversion.

use dxf2gcode_core::{distance, Point3, Polyline};
use std::fmt;

/// Default number of fraction digits in emitted coordinates
pub const DEFAULT_PRECISION: usize = 6;

/// One motion command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    /// Positioning move without deposition
    Travel { to: Point3 },
    /// Positioning move with deposition; `extrusion` is the cumulative total
    Extrude { to: Point3, extrusion: f64 },
}

impl MotionCommand {
    /// Target position of the move
    pub fn target(&self) -> Point3 {
        match self {
            Self::Travel { to } | Self::Extrude { to, .. } => *to,
        }
    }

    /// Cumulative extrusion carried by the move, if it extrudes
    pub fn extrusion(&self) -> Option<f64> {
        match self {
            Self::Travel { .. } => None,
            Self::Extrude { extrusion, .. } => Some(*extrusion),
        }
    }

    pub fn is_travel(&self) -> bool {
        matches!(self, Self::Travel { .. })
    }

    /// Render as a G-code line (without newline) with `precision` fraction digits
    pub fn to_gcode(&self, precision: usize) -> String {
        let to = self.target();
        let mut line = format!(
            "G1 X{} Y{} Z{}",
            format_number(to.x, precision),
            format_number(to.y, precision),
            format_number(to.z, precision)
        );
        if let Some(e) = self.extrusion() {
            line.push_str(&format!(" E{}", format_number(e, precision)));
        }
        line
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_gcode(DEFAULT_PRECISION))
    }
}

/// Fixed-point decimal, never scientific notation. Negative zero prints as zero.
pub fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Extruder position and cumulative extrusion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtruderState {
    /// Last visited point
    pub current_position: Point3,
    /// Total extrusion since the start of the run
    pub cumulative_extrusion: f64,
}

/// Converts polylines into motion commands
///
/// Each polyline starts with a travel to its first point; every following
/// point is an extrude move. Polylines whose first point is above their last
/// are reversed first, so the build always proceeds upward.
#[derive(Debug, Clone)]
pub struct MotionGenerator {
    extrusion_per_unit: f64,
    state: ExtruderState,
}

impl MotionGenerator {
    /// Create a generator with a fresh extruder state
    pub fn new(extrusion_per_unit: f64) -> Self {
        Self {
            extrusion_per_unit,
            state: ExtruderState::default(),
        }
    }

    pub fn extrusion_per_unit(&self) -> f64 {
        self.extrusion_per_unit
    }

    /// Current extruder state
    pub fn state(&self) -> ExtruderState {
        self.state
    }

    /// Generate the moves for one polyline
    ///
    /// The polyline may be reversed in place by direction normalization.
    pub fn extrude_polyline(&mut self, polyline: &mut Polyline) -> Vec<MotionCommand> {
        let (first_z, last_z) = match (polyline.first(), polyline.last()) {
            (Some(first), Some(last)) => (first.z, last.z),
            _ => return Vec::new(),
        };

        if first_z > last_z {
            polyline.reverse();
        }

        let mut commands = Vec::with_capacity(polyline.len());
        for (i, point) in polyline.iter().enumerate() {
            if i == 0 {
                commands.push(self.travel_to(*point));
            } else {
                commands.push(self.extrude_to(*point));
            }
        }
        commands
    }

    /// Move without extruding
    pub fn travel_to(&mut self, to: Point3) -> MotionCommand {
        self.state.current_position = to;
        MotionCommand::Travel { to }
    }

    /// Move while extruding in proportion to the 3D distance covered
    pub fn extrude_to(&mut self, to: Point3) -> MotionCommand {
        self.state.cumulative_extrusion +=
            distance(self.state.current_position, to) * self.extrusion_per_unit;
        self.state.current_position = to;
        MotionCommand::Extrude {
            to,
            extrusion: self.state.cumulative_extrusion,
        }
    }
}
