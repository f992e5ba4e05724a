//! DXF import
//!
//! Decodes a DXF drawing with the `dxf` crate and flattens its ENTITIES
//! section into [`SourceEntity`] values, in document order.
//!
//! Mapping:
//! - `POLYLINE` vertices keep their full X/Y/Z location
//! - `LWPOLYLINE` vertices are planar and land at Z = 0
//! - closed polylines repeat their first vertex at the end
//! - polylines with bulged vertices are flagged, their arcs become chords
//! - `LINE` becomes a two-point polyline
//! - `SPLINE`, `ARC`, `CIRCLE` and `ELLIPSE` are curves
//! - everything else is carried as `Other` with its type name

use crate::entity::{CurveKind, SourceEntity};
use crate::error::{FileFormatError, FileFormatResult};
use dxf::entities::EntityType;
use dxf::Drawing;
use dxf2gcode_core::{Point3, Polyline};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, trace};

/// Reads DXF drawings into the converter's entity model
pub struct DxfImporter;

impl DxfImporter {
    /// Load and decode a DXF file, whatever its name
    pub fn from_file<P: AsRef<Path>>(path: P) -> FileFormatResult<Vec<SourceEntity>> {
        let path = path.as_ref();

        let is_dxf = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dxf"));
        if !is_dxf {
            debug!("{} has no .dxf extension, decoding anyway", path.display());
        }

        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(FileFormatError::EmptyFile(path.display().to_string()));
        }

        let mut reader = BufReader::new(file);
        let entities = Self::from_reader(&mut reader)?;
        debug!(
            "Loaded {} entities from {}",
            entities.len(),
            path.display()
        );
        Ok(entities)
    }

    /// Decode a DXF document from any reader
    pub fn from_reader<R: Read>(reader: &mut R) -> FileFormatResult<Vec<SourceEntity>> {
        let drawing =
            Drawing::load(reader).map_err(|e| FileFormatError::DxfParseError(e.to_string()))?;
        Self::from_drawing(&drawing)
    }

    /// Flatten the ENTITIES section of an already decoded drawing
    pub fn from_drawing(drawing: &Drawing) -> FileFormatResult<Vec<SourceEntity>> {
        drawing
            .entities()
            .enumerate()
            .map(|(i, entity)| {
                let converted = Self::convert_entity(&entity.specific)?;
                trace!("Entity {}: {}", i, converted.kind_name());
                Ok(converted)
            })
            .collect()
    }

    /// Convert one DXF entity into the converter's entity model
    pub fn convert_entity(entity_type: &EntityType) -> FileFormatResult<SourceEntity> {
        let entity = match entity_type {
            EntityType::Polyline(polyline) => {
                let points = polyline
                    .vertices()
                    .map(|v| Point3::new(v.location.x, v.location.y, v.location.z));
                let mut converted = checked_polyline("POLYLINE", points)?;
                if polyline.is_closed() {
                    close(&mut converted);
                }
                let bulged = polyline.vertices().any(|v| v.bulge != 0.0);
                polyline_entity(converted, bulged)
            }
            EntityType::LwPolyline(polyline) => {
                let points = polyline.vertices.iter().map(|v| Point3::new(v.x, v.y, 0.0));
                let mut converted = checked_polyline("LWPOLYLINE", points)?;
                if polyline.is_closed() {
                    close(&mut converted);
                }
                let bulged = polyline.vertices.iter().any(|v| v.bulge != 0.0);
                polyline_entity(converted, bulged)
            }
            EntityType::Line(line) => {
                let points = [
                    Point3::new(line.p1.x, line.p1.y, line.p1.z),
                    Point3::new(line.p2.x, line.p2.y, line.p2.z),
                ];
                SourceEntity::Polyline(checked_polyline("LINE", points)?)
            }
            EntityType::Spline(_) => SourceEntity::Curve(CurveKind::Spline),
            EntityType::Arc(_) => SourceEntity::Curve(CurveKind::Arc),
            EntityType::Circle(_) => SourceEntity::Curve(CurveKind::Circle),
            EntityType::Ellipse(_) => SourceEntity::Curve(CurveKind::Ellipse),
            other => SourceEntity::Other(type_name(other).to_string()),
        };
        Ok(entity)
    }
}

fn checked_polyline<I>(entity: &str, points: I) -> FileFormatResult<Polyline>
where
    I: IntoIterator<Item = Point3>,
{
    let polyline: Polyline = points.into_iter().collect();
    for point in polyline.iter() {
        point
            .ensure_finite()
            .map_err(|e| FileFormatError::InvalidGeometry {
                entity: entity.to_string(),
                reason: e.to_string(),
            })?;
    }
    Ok(polyline)
}

// Repeat the first vertex so the closing edge is printed
fn close(polyline: &mut Polyline) {
    let (Some(&first), Some(&last)) = (polyline.first(), polyline.last()) else {
        return;
    };
    if polyline.len() >= 2 && first != last {
        polyline.push(first);
    }
}

fn polyline_entity(polyline: Polyline, bulged: bool) -> SourceEntity {
    if bulged {
        SourceEntity::BulgedPolyline(polyline)
    } else {
        SourceEntity::Polyline(polyline)
    }
}

/// DXF type name of the entity kinds the converter skips silently
fn type_name(entity_type: &EntityType) -> &'static str {
    match entity_type {
        EntityType::Face3D(_) => "3DFACE",
        EntityType::Solid3D(_) => "3DSOLID",
        EntityType::Attribute(_) => "ATTRIB",
        EntityType::AttributeDefinition(_) => "ATTDEF",
        EntityType::Body(_) => "BODY",
        EntityType::RotatedDimension(_)
        | EntityType::RadialDimension(_)
        | EntityType::DiameterDimension(_)
        | EntityType::AngularThreePointDimension(_)
        | EntityType::OrdinateDimension(_) => "DIMENSION",
        EntityType::Helix(_) => "HELIX",
        EntityType::Image(_) => "IMAGE",
        EntityType::Insert(_) => "INSERT",
        EntityType::Leader(_) => "LEADER",
        EntityType::MLine(_) => "MLINE",
        EntityType::MText(_) => "MTEXT",
        EntityType::ModelPoint(_) => "POINT",
        EntityType::Ray(_) => "RAY",
        EntityType::Region(_) => "REGION",
        EntityType::Solid(_) => "SOLID",
        EntityType::Text(_) => "TEXT",
        EntityType::Trace(_) => "TRACE",
        EntityType::XLine(_) => "XLINE",
        _ => "UNKNOWN",
    }
}
