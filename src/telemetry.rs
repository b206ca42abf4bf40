/// One row of a flight log.
///
/// Coordinates, altitude and heading are `None` when the cell is absent or does not hold a finite
/// number. Columns that are not recognized are kept in `extra`, untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetryRecord {
    pub video_phase: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ascent_feet: Option<f64>,
    pub compass_heading_degrees: Option<f64>,
    pub extra: std::collections::BTreeMap<String, serde_json::Value>,
}

/// Telemetry in log order, one record per sampling interval.
pub type TelemetrySequence = Vec<TelemetryRecord>;

impl TelemetryRecord {
    pub fn new(
        video_phase: bool,
        latitude: Option<f64>,
        longitude: Option<f64>,
        ascent_feet: Option<f64>,
        compass_heading_degrees: Option<f64>,
    ) -> Self {
        Self {
            video_phase,
            latitude: latitude.filter(|value| value.is_finite()),
            longitude: longitude.filter(|value| value.is_finite()),
            ascent_feet: ascent_feet.filter(|value| value.is_finite()),
            compass_heading_degrees: compass_heading_degrees.filter(|value| value.is_finite()),
            extra: std::collections::BTreeMap::new(),
        }
    }

    /// position as (longitude, latitude), if both are finite
    pub fn coord(&self) -> Option<geo::Coord> {
        match (self.longitude, self.latitude) {
            (Some(longitude), Some(latitude)) => Some(geo::coord! { x: longitude, y: latitude }),
            _ => None,
        }
    }

    pub fn altitude_meters(&self) -> Option<f64> {
        self.ascent_feet.map(|feet| feet * crate::footprint::M_PER_FT)
    }

    /// a record can be projected only when position, altitude and heading are all present
    pub fn is_projectable(&self) -> bool {
        self.coord().is_some() && self.ascent_feet.is_some() && self.compass_heading_degrees.is_some()
    }
}

/// Retain only records flagged as recorded while the camera was running, keeping their order.
pub fn video_phase(sequence: &[TelemetryRecord]) -> TelemetrySequence {
    sequence
        .iter()
        .filter(|record| record.video_phase)
        .cloned()
        .collect()
}

/// Flight time covered by `length` samples at a fixed sampling rate.
pub fn sequence_duration(length: usize, samples_per_second: f64) -> chrono::Duration {
    if samples_per_second <= 0.0 {
        return chrono::Duration::zero();
    }
    chrono::Duration::milliseconds(((length as f64 / samples_per_second) * 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_fields_are_absent() {
        let record = TelemetryRecord::new(true, Some(f64::NAN), Some(10.0), Some(f64::INFINITY), Some(90.0));

        assert_eq!(record.latitude, None);
        assert_eq!(record.ascent_feet, None);
        assert!(record.coord().is_none());
        assert!(!record.is_projectable());
    }

    #[test]
    fn test_projectable() {
        let record = TelemetryRecord::new(true, Some(20.0), Some(10.0), Some(100.0), Some(90.0));

        assert_eq!(record.coord(), Some(geo::coord! { x: 10.0, y: 20.0 }));
        assert!(record.is_projectable());
        assert!(crate::utilities::approx_equal(
            record.altitude_meters().unwrap(),
            30.48,
            6
        ));
    }

    #[test]
    fn test_video_phase_preserves_order() {
        let sequence = vec![
            TelemetryRecord::new(false, Some(1.0), Some(1.0), None, None),
            TelemetryRecord::new(true, Some(2.0), Some(2.0), None, None),
            TelemetryRecord::new(false, Some(3.0), Some(3.0), None, None),
            TelemetryRecord::new(true, Some(4.0), Some(4.0), None, None),
        ];

        let filtered = video_phase(&sequence);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].latitude, Some(2.0));
        assert_eq!(filtered[1].latitude, Some(4.0));
    }

    #[test]
    fn test_sequence_duration() {
        assert_eq!(
            sequence_duration(834, 10.0),
            chrono::Duration::milliseconds(83_400)
        );
        assert_eq!(sequence_duration(10, 0.0), chrono::Duration::zero());
    }
}
