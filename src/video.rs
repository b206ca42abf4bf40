use crate::footprint::FrameDimensions;

/// The parts of a video player the overlay reads or sets.
pub trait VideoPlayback {
    /// `None` until the player knows the frame size
    fn frame_dimensions(&self) -> Option<FrameDimensions>;
    /// playback position, in seconds
    fn current_time(&self) -> f64;
    fn set_looping(&mut self, looping: bool);
    fn set_playback_rate(&mut self, rate: f64);
}

/// Stand-in for a media player: advances a media clock by wall-clock time multiplied by the
/// playback rate, wrapping at the end of the video when looping.
#[derive(Clone, Debug)]
pub struct SimulatedPlayback {
    pub dimensions: Option<FrameDimensions>,
    pub duration: Option<chrono::Duration>,
    pub looping: bool,
    pub rate: f64,
    position: f64,
}

impl SimulatedPlayback {
    pub fn new(dimensions: Option<FrameDimensions>, duration: Option<chrono::Duration>) -> Self {
        Self {
            dimensions,
            duration,
            looping: false,
            rate: 1.0,
            position: 0.0,
        }
    }

    pub fn from_configuration(configuration: &crate::configuration::playback::VideoConfiguration) -> Self {
        Self::new(configuration.frame_dimensions(), configuration.duration)
    }

    fn duration_seconds(&self) -> Option<f64> {
        self.duration
            .map(|duration| duration.num_milliseconds() as f64 / 1000.0)
            .filter(|seconds| *seconds > 0.0)
    }

    /// Let `elapsed` wall-clock time pass.
    pub fn advance(&mut self, elapsed: chrono::Duration) {
        let elapsed_seconds = elapsed.num_milliseconds() as f64 / 1000.0;
        let mut position = self.position + elapsed_seconds * self.rate;

        if let Some(duration) = self.duration_seconds() {
            if self.looping {
                position = position.rem_euclid(duration);
            } else {
                position = position.clamp(0.0, duration);
            }
        }

        self.position = position.max(0.0);
    }

    #[cfg(test)]
    pub fn report_dimensions(&mut self, dimensions: Option<FrameDimensions>) {
        self.dimensions = dimensions;
    }
}

impl VideoPlayback for SimulatedPlayback {
    fn frame_dimensions(&self) -> Option<FrameDimensions> {
        self.dimensions
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}
