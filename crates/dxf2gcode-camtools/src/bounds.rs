//! Bounds and centering
//!
//! Computes the bounding box of every polyline in a run and the single
//! translation that centers its X/Y footprint on the print area. Z is
//! never shifted: it is the build height.

use dxf2gcode_core::{BoundingBox, GeometryError, Point3, Polyline};

/// Fold every point of every polyline into one bounding box
pub fn compute_bounds<'a, I>(polylines: I) -> BoundingBox
where
    I: IntoIterator<Item = &'a Polyline>,
{
    let mut bounds = BoundingBox::empty();
    for polyline in polylines {
        bounds.fold_polyline(polyline);
    }
    bounds
}

/// Translation that moves the X/Y center of `bounds` onto `(center_x, center_y)`
///
/// Fails with [`GeometryError::EmptyBounds`] for an empty box, and with
/// [`GeometryError::NonFinite`] when the shift overflows.
pub fn centering_shift(
    bounds: &BoundingBox,
    center_x: f64,
    center_y: f64,
) -> Result<Point3, GeometryError> {
    let center = bounds.center().ok_or(GeometryError::EmptyBounds)?;
    let shift = Point3::new(center_x - center.x, center_y - center.y, 0.0);
    shift.ensure_finite()?;
    Ok(shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_for_known_bounds() {
        let bounds = BoundingBox {
            min: Point3::new(0.0, 0.0, 0.0),
            max: Point3::new(10.0, 20.0, 0.0),
        };
        assert_eq!(
            centering_shift(&bounds, 0.0, 0.0),
            Ok(Point3::new(-5.0, -10.0, 0.0))
        );
        assert_eq!(
            centering_shift(&bounds, 100.0, 100.0),
            Ok(Point3::new(95.0, 90.0, 0.0))
        );
    }

    #[test]
    fn test_shift_never_moves_z() {
        let bounds = BoundingBox {
            min: Point3::new(-1.0, -1.0, 5.0),
            max: Point3::new(1.0, 1.0, 40.0),
        };
        let shift = centering_shift(&bounds, 3.0, 4.0).unwrap();
        assert_eq!(shift.z, 0.0);
    }

    #[test]
    fn test_empty_bounds_give_no_shift() {
        assert_eq!(
            centering_shift(&BoundingBox::empty(), 50.0, 50.0),
            Err(GeometryError::EmptyBounds)
        );
        assert!(compute_bounds(Vec::<&Polyline>::new()).is_empty());
    }

    #[test]
    fn test_overflowing_shift_is_rejected() {
        let bounds = BoundingBox::from_points(vec![Point3::new(f64::MAX, 0.0, 0.0)]);
        assert!(matches!(
            centering_shift(&bounds, 0.0, 0.0),
            Err(GeometryError::NonFinite { axis: 'x', .. })
        ));
    }

    #[test]
    fn test_translated_shape_is_centered() {
        let mut polylines = vec![
            Polyline::from_points(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 1.0)]),
            Polyline::from_points(vec![Point3::new(3.0, 20.0, 2.0)]),
        ];
        let bounds = compute_bounds(&polylines);
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(10.0, 20.0, 2.0));

        let shift = centering_shift(&bounds, 110.0, 110.0).unwrap();
        for polyline in &mut polylines {
            polyline.translate(shift);
        }

        let center = compute_bounds(&polylines).center().unwrap();
        assert!((center.x - 110.0).abs() < 1e-9);
        assert!((center.y - 110.0).abs() < 1e-9);
        assert!((center.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_polylines_do_not_affect_bounds() {
        let polylines = vec![
            Polyline::new(),
            Polyline::from_points(vec![Point3::new(2.0, 3.0, 4.0)]),
        ];
        let bounds = compute_bounds(&polylines);
        assert_eq!(bounds.min, bounds.max);
        assert_eq!(bounds.min, Point3::new(2.0, 3.0, 4.0));
    }
}
