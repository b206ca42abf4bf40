use geo::BoundingRect;

custom_error::custom_error! {pub ExtentError
    NoValidCoordinates = "telemetry contains no valid coordinates",
}

/// Bounding box of every record with a finite position.
pub fn compute_bounds(
    sequence: &[crate::telemetry::TelemetryRecord],
) -> Result<geo::Rect, ExtentError> {
    let points: geo::MultiPoint = sequence
        .iter()
        .filter_map(|record| record.coord())
        .map(geo::Point::from)
        .collect();

    match points.bounding_rect() {
        Some(bounds) => Ok(bounds),
        None => Err(ExtentError::NoValidCoordinates),
    }
}

/// `[[min longitude, min latitude], [max longitude, max latitude]]`
pub fn bounds_array(bounds: &geo::Rect) -> [[f64; 2]; 2] {
    [
        [bounds.min().x, bounds.min().y],
        [bounds.max().x, bounds.max().y],
    ]
}

/// Midpoint of the bounding box; not the centroid of the points themselves.
pub fn compute_centroid(bounds: &geo::Rect) -> geo::Coord {
    bounds.center()
}

/// Placeholder square shown before the first projection, centered on the flight and `offset`
/// degrees wide in each direction. Its size has nothing to do with the camera.
///
/// Corners are ordered (+, -), (+, +), (-, +), (-, -) relative to the center.
pub fn initial_placement_quad(
    sequence: &[crate::telemetry::TelemetryRecord],
    offset: f64,
) -> Result<[geo::Coord; 4], ExtentError> {
    let center = compute_centroid(&compute_bounds(sequence)?);

    Ok([
        geo::coord! { x: center.x + offset, y: center.y - offset },
        geo::coord! { x: center.x + offset, y: center.y + offset },
        geo::coord! { x: center.x - offset, y: center.y + offset },
        geo::coord! { x: center.x - offset, y: center.y - offset },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::TelemetryRecord;
    use crate::utilities::approx_equal;

    fn sequence() -> Vec<TelemetryRecord> {
        vec![
            TelemetryRecord::new(true, Some(39.35), Some(-77.55), Some(100.0), Some(0.0)),
            TelemetryRecord::new(true, Some(39.37), Some(-77.51), Some(110.0), Some(10.0)),
            TelemetryRecord::new(true, None, Some(-90.0), Some(120.0), Some(20.0)),
            TelemetryRecord::new(true, Some(39.33), Some(-77.53), Some(130.0), Some(30.0)),
        ]
    }

    #[test]
    fn test_bounds_contain_every_valid_record() {
        let sequence = sequence();
        let bounds = compute_bounds(&sequence).unwrap();

        assert!(bounds.min().x <= bounds.max().x);
        assert!(bounds.min().y <= bounds.max().y);

        for coord in sequence.iter().filter_map(|record| record.coord()) {
            assert!(coord.x >= bounds.min().x && coord.x <= bounds.max().x);
            assert!(coord.y >= bounds.min().y && coord.y <= bounds.max().y);
        }

        assert_eq!(
            bounds_array(&bounds),
            [[-77.55, 39.33], [-77.51, 39.37]]
        );
    }

    #[test]
    fn test_single_record_bounds() {
        let sequence = vec![TelemetryRecord::new(true, Some(20.0), Some(20.0), Some(100.0), Some(90.0))];

        let bounds = compute_bounds(&sequence).unwrap();

        assert_eq!(bounds_array(&bounds), [[20.0, 20.0], [20.0, 20.0]]);
        assert_eq!(compute_centroid(&bounds), geo::coord! { x: 20.0, y: 20.0 });
    }

    #[test]
    fn test_no_valid_coordinates() {
        let unparsable = vec![
            TelemetryRecord::new(true, None, Some(20.0), Some(100.0), Some(90.0)),
            TelemetryRecord::new(true, Some(f64::NAN), Some(f64::NAN), None, None),
        ];

        assert!(matches!(
            compute_bounds(&unparsable),
            Err(ExtentError::NoValidCoordinates)
        ));
        assert!(matches!(
            compute_bounds(&[]),
            Err(ExtentError::NoValidCoordinates)
        ));
        assert!(initial_placement_quad(&unparsable, 0.0007).is_err());
    }

    #[test]
    fn test_centroid_is_box_midpoint() {
        let bounds = compute_bounds(&sequence()).unwrap();
        let center = compute_centroid(&bounds);

        assert!(approx_equal(center.x, -77.53, 9));
        assert!(approx_equal(center.y, 39.35, 9));
    }

    #[test]
    fn test_initial_placement_quad() {
        let quad = initial_placement_quad(&sequence(), 0.0007).unwrap();

        let expected = [
            (-77.53 + 0.0007, 39.35 - 0.0007),
            (-77.53 + 0.0007, 39.35 + 0.0007),
            (-77.53 - 0.0007, 39.35 + 0.0007),
            (-77.53 - 0.0007, 39.35 - 0.0007),
        ];
        for (corner, (x, y)) in quad.iter().zip(expected) {
            assert!(approx_equal(corner.x, x, 9));
            assert!(approx_equal(corner.y, y, 9));
        }
    }
}
