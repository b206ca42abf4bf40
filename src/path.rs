use geo::RhumbDistance;

/// Flight path through every record with a finite position, in log order.
pub fn build_path(sequence: &[crate::telemetry::TelemetryRecord]) -> geo::LineString {
    sequence
        .iter()
        .filter_map(|record| record.coord())
        .collect::<Vec<geo::Coord>>()
        .into()
}

/// total over-ground length of the path, in meters
pub fn path_length(path: &geo::LineString) -> f64 {
    path.lines()
        .map(|line| geo::Point::from(line.start).rhumb_distance(&geo::Point::from(line.end)))
        .sum()
}
