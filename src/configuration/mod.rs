pub mod playback;

fn default_name() -> String {
    String::from("unnamed_flight")
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct RunConfiguration {
    #[serde(default = "default_name")]
    pub name: String,
    pub flight_log: PathConfiguration,
    #[serde(default)]
    pub video: playback::VideoConfiguration,
    #[serde(default)]
    pub camera: playback::CameraConfiguration,
    #[serde(default)]
    pub playback: playback::PlaybackConfiguration,
    #[serde(default)]
    pub columns: ColumnConfiguration,
    #[serde(default)]
    pub map: MapConfiguration,
    pub output: Option<PathConfiguration>,
    pub log: Option<PathConfiguration>,
}

#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct PathConfiguration {
    pub filename: std::path::PathBuf,
}

fn default_video_phase_column() -> String {
    String::from("isVideo")
}

fn default_latitude_column() -> String {
    String::from("latitude")
}

fn default_longitude_column() -> String {
    String::from("longitude")
}

fn default_ascent_column() -> String {
    String::from("ascent(feet)")
}

fn default_heading_column() -> String {
    String::from("compass_heading(degrees)")
}

/// header names of the flight log columns that carry typed telemetry
#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct ColumnConfiguration {
    #[serde(default = "default_video_phase_column")]
    pub video_phase: String,
    #[serde(default = "default_latitude_column")]
    pub latitude: String,
    #[serde(default = "default_longitude_column")]
    pub longitude: String,
    #[serde(default = "default_ascent_column")]
    pub ascent: String,
    #[serde(default = "default_heading_column")]
    pub heading: String,
}

impl Default for ColumnConfiguration {
    fn default() -> Self {
        Self {
            video_phase: default_video_phase_column(),
            latitude: default_latitude_column(),
            longitude: default_longitude_column(),
            ascent: default_ascent_column(),
            heading: default_heading_column(),
        }
    }
}

impl ColumnConfiguration {
    pub fn is_typed(&self, header: &str) -> bool {
        [
            &self.video_phase,
            &self.latitude,
            &self.longitude,
            &self.ascent,
            &self.heading,
        ]
        .iter()
        .any(|column| column.as_str() == header)
    }
}

fn default_overlay_id() -> String {
    String::from("video")
}

fn default_padding() -> u32 {
    50
}

fn default_path_color() -> String {
    String::from("#6706CE")
}

fn default_path_width() -> f64 {
    3.0
}

fn default_placement_offset() -> f64 {
    0.0007
}

/// Passed explicitly to the rendering surface; nothing about the map is global.
#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct MapConfiguration {
    #[serde(default = "default_overlay_id")]
    pub overlay_id: String,
    #[serde(default = "default_padding")]
    pub padding: u32,
    #[serde(default = "default_path_color")]
    pub path_color: String,
    #[serde(default = "default_path_width")]
    pub path_width: f64,
    /// half-width, in degrees, of the square shown before the first projection lands
    #[serde(default = "default_placement_offset")]
    pub placement_offset: f64,
}

impl Default for MapConfiguration {
    fn default() -> Self {
        Self {
            overlay_id: default_overlay_id(),
            padding: default_padding(),
            path_color: default_path_color(),
            path_width: default_path_width(),
            placement_offset: default_placement_offset(),
        }
    }
}

impl RunConfiguration {
    /// Resolve an output path, naming a file inside it when a directory was given.
    pub fn output_filename(
        &self,
        program_start_time: &chrono::DateTime<chrono::Local>,
    ) -> Option<std::path::PathBuf> {
        self.output.as_ref().map(|output| {
            let mut path = output.filename.to_owned();
            if path.is_dir() {
                path.push(format!(
                    "{:}_{:}.geojson",
                    self.name,
                    program_start_time.format(crate::FILENAME_DATETIME_FORMAT)
                ));
            }
            path
        })
    }

    pub fn log_filename(
        &self,
        program_start_time: &chrono::DateTime<chrono::Local>,
    ) -> Option<std::path::PathBuf> {
        self.log.as_ref().map(|log| {
            let mut path = log.filename.to_owned();
            if path.is_dir() {
                path.push(format!(
                    "{:}_log_{:}.txt",
                    self.name,
                    program_start_time.format(crate::FILENAME_DATETIME_FORMAT)
                ));
            }
            path
        })
    }
}
