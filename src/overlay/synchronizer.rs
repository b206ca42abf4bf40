use crate::footprint::{CameraParameters, Footprint, FrameDimensions};

/// telemetry cadence of the flight logs this reads
pub const DEFAULT_SAMPLES_PER_SECOND: f64 = 10.0;

/// Index of the telemetry sample shown at playback time `time` (seconds).
///
/// Playback past the end of the telemetry wraps back to the start instead of holding the last
/// sample. Negative or non-finite times map to the first sample.
pub fn sample_index(time: f64, length: usize, samples_per_second: f64) -> Option<usize> {
    if length == 0 {
        return None;
    }

    let sample = (time * samples_per_second).floor();
    if !sample.is_finite() || sample < 0.0 {
        return Some(0);
    }

    Some((sample as u64 % length as u64) as usize)
}

/// Picks the telemetry sample for the current playback time and projects its footprint.
pub struct FrameSynchronizer {
    pub sequence: crate::telemetry::TelemetrySequence,
    pub camera: CameraParameters,
    pub samples_per_second: f64,
}

impl FrameSynchronizer {
    pub fn new(
        sequence: crate::telemetry::TelemetrySequence,
        camera: CameraParameters,
        samples_per_second: f64,
    ) -> Self {
        Self {
            sequence,
            camera,
            samples_per_second,
        }
    }

    pub fn sample_index(&self, time: f64) -> Option<usize> {
        sample_index(time, self.sequence.len(), self.samples_per_second)
    }

    pub fn record_at(&self, time: f64) -> Option<&crate::telemetry::TelemetryRecord> {
        self.sequence.get(self.sample_index(time)?)
    }

    /// `None` when the selected sample cannot be projected.
    pub fn footprint_at(&self, time: f64, dimensions: &FrameDimensions) -> Option<Footprint> {
        self.record_at(time)?.footprint(&self.camera, dimensions)
    }
}
