use serde_with::serde_as;

/// What the media subsystem reports about the video. A missing width or height means the player
/// never became ready.
#[serde_as]
#[derive(serde::Deserialize, PartialEq, Debug, Clone, Default)]
pub struct VideoConfiguration {
    pub filename: Option<std::path::PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde_as(as = "Option<serde_with::DurationSeconds<i64>>")]
    pub duration: Option<chrono::Duration>,
}

impl VideoConfiguration {
    pub fn frame_dimensions(&self) -> Option<crate::footprint::FrameDimensions> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => crate::footprint::FrameDimensions::new(width, height),
            _ => None,
        }
    }
}

fn default_field_of_view() -> f64 {
    crate::footprint::DEFAULT_FIELD_OF_VIEW
}

#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct CameraConfiguration {
    /// diagonal field of view, in degrees
    #[serde(default = "default_field_of_view")]
    pub field_of_view: f64,
}

impl Default for CameraConfiguration {
    fn default() -> Self {
        Self {
            field_of_view: default_field_of_view(),
        }
    }
}

fn default_rate() -> f64 {
    4.0
}

fn default_looping() -> bool {
    true
}

fn default_samples_per_second() -> f64 {
    crate::overlay::synchronizer::DEFAULT_SAMPLES_PER_SECOND
}

fn default_tick_interval() -> chrono::Duration {
    chrono::Duration::milliseconds(16)
}

fn default_duration() -> chrono::Duration {
    chrono::Duration::seconds(60)
}

#[serde_as]
#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct PlaybackConfiguration {
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default = "default_looping")]
    #[serde(rename = "loop")]
    pub looping: bool,
    /// telemetry cadence of the flight log
    #[serde(default = "default_samples_per_second")]
    pub samples_per_second: f64,
    /// wall-clock time between display refreshes
    #[serde(default = "default_tick_interval")]
    #[serde_as(as = "serde_with::DurationMilliSeconds<i64>")]
    pub tick_interval: chrono::Duration,
    /// wall-clock time to keep the overlay running
    #[serde(default = "default_duration")]
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub duration: chrono::Duration,
}

impl Default for PlaybackConfiguration {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            looping: default_looping(),
            samples_per_second: default_samples_per_second(),
            tick_interval: default_tick_interval(),
            duration: default_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let playback: PlaybackConfiguration = serde_yaml::from_str("{}").unwrap();

        assert_eq!(playback, PlaybackConfiguration::default());
        assert_eq!(playback.duration, chrono::Duration::seconds(60));
    }

    #[test]
    fn test_frame_dimensions() {
        let video: VideoConfiguration = serde_yaml::from_str("width: 1280\nheight: 720\n").unwrap();
        let dimensions = video.frame_dimensions().unwrap();

        assert_eq!(dimensions.width, 1280);
        assert_eq!(dimensions.height, 720);

        let not_ready: VideoConfiguration = serde_yaml::from_str("width: 0\nheight: 720\n").unwrap();
        assert!(not_ready.frame_dimensions().is_none());

        assert!(VideoConfiguration::default().frame_dimensions().is_none());
    }
}
