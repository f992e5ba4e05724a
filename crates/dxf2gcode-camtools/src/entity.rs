//! Decoded drawing entities
//!
//! The converter consumes a closed set of entity kinds: polylines it can
//! print, polylines with arc segments it prints as chords, curves it
//! recognizes but does not convert, and anything else.

use dxf2gcode_core::Polyline;
use serde::Serialize;
use std::fmt;

/// Curve kinds that are recognized but not converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurveKind {
    Spline,
    Arc,
    Circle,
    Ellipse,
    /// Bulged vertex of a POLYLINE or LWPOLYLINE
    #[serde(rename = "POLYLINE_ARC")]
    PolylineArc,
}

impl CurveKind {
    /// Name used in notices; the DXF entity type for whole entities
    pub fn dxf_name(&self) -> &'static str {
        match self {
            Self::Spline => "SPLINE",
            Self::Arc => "ARC",
            Self::Circle => "CIRCLE",
            Self::Ellipse => "ELLIPSE",
            Self::PolylineArc => "POLYLINE ARC",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dxf_name())
    }
}

/// One entity of the source drawing
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEntity {
    /// Polyline-like entity, flattened to its vertex locations
    Polyline(Polyline),
    /// Polyline with arc segments; printed as straight chords and reported
    BulgedPolyline(Polyline),
    /// Curve-like entity, reported and skipped
    Curve(CurveKind),
    /// Any other entity kind, skipped without notice
    Other(String),
}

impl SourceEntity {
    /// Short kind name for logging
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Polyline(_) | Self::BulgedPolyline(_) => "POLYLINE",
            Self::Curve(kind) => kind.dxf_name(),
            Self::Other(name) => name,
        }
    }
}

impl From<Polyline> for SourceEntity {
    fn from(polyline: Polyline) -> Self {
        Self::Polyline(polyline)
    }
}

/// Notice about an entity that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedNotice {
    /// Position of the entity in the source list
    pub index: usize,
    /// The unsupported kind
    pub kind: CurveKind,
}

impl fmt::Display for UnsupportedNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "This tool does not yet convert {}s!", self.kind)?;
        if self.kind == CurveKind::PolylineArc {
            write!(f, " Printing them as straight segments.")?;
        }
        Ok(())
    }
}
