use geo::ChamberlainDuquetteArea;

use crate::overlay::TickOutcome;
use crate::video::VideoPlayback;

custom_error::custom_error! {pub SessionError
    Overlay { source: crate::overlay::OverlayError } = "{source}",
    FailedToWrite { path: String, message: String } = "could not write overlay to {path}; {message}",
}

#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub published: usize,
    pub skipped: usize,
    pub stale: usize,
    pub last_footprint: Option<crate::footprint::Footprint>,
}

/// Read the flight log and keep only the video-phase records.
pub fn load_observations(
    configuration: &crate::configuration::RunConfiguration,
    log: &mut crate::utilities::MessageLog,
) -> Result<crate::telemetry::TelemetrySequence, crate::overlay::OverlayError> {
    log.add(
        format!(
            "reading flight log {:}",
            configuration.flight_log.filename.to_string_lossy()
        ),
        log::Level::Info,
    );

    let file = crate::flight_log::FlightLogFile::new(configuration.flight_log.filename.to_owned())?;
    let records = file.read_telemetry(&configuration.columns)?;
    log.add(format!("read {:} records", records.len()), log::Level::Debug);

    let observations = crate::flight_log::filter_video_observations(&records)?;
    let projectable = observations
        .iter()
        .filter(|record| record.is_projectable())
        .count();
    log.add(
        format!(
            "{:} of {:} records were recorded during video; {:} can be projected",
            observations.len(),
            records.len(),
            projectable
        ),
        log::Level::Info,
    );

    Ok(observations)
}

/// Drive the overlay against a simulated player for the configured wall-clock duration.
pub fn run_overlay(
    configuration: &crate::configuration::RunConfiguration,
    observations: crate::telemetry::TelemetrySequence,
    log: &mut crate::utilities::MessageLog,
) -> Result<(crate::render::GeoJsonSurface, RunSummary), crate::overlay::OverlayError> {
    let mut tick_interval = configuration.playback.tick_interval;
    if tick_interval <= chrono::Duration::zero() {
        log.add(
            format!(
                "tick interval of {:} ms is not positive; using 16 ms",
                tick_interval.num_milliseconds()
            ),
            log::Level::Warn,
        );
        tick_interval = chrono::Duration::milliseconds(16);
    }

    let video = crate::video::SimulatedPlayback::from_configuration(&configuration.video);
    if video.frame_dimensions().is_none() {
        log.add(
            "video frame size is unknown; footprints will not be projected".to_string(),
            log::Level::Warn,
        );
    }

    let mut overlay = crate::overlay::Overlay::new(
        crate::render::GeoJsonSurface::new(&configuration.map),
        crate::footprint::CameraParameters::new(configuration.camera.field_of_view),
        configuration.playback.to_owned(),
        configuration.map.to_owned(),
    );
    let mut frame_loop = crate::overlay::scheduler::FrameLoop::new(tick_interval);

    log.extend(overlay.start(observations, video, &mut frame_loop)?);

    let mut summary = RunSummary::default();
    while frame_loop.elapsed() < configuration.playback.duration {
        let tick = match frame_loop.next_tick() {
            Some(tick) => tick,
            None => break,
        };
        if let Some(video) = overlay.video_mut() {
            video.advance(tick_interval);
        }

        match overlay.on_tick(tick, &mut frame_loop) {
            TickOutcome::Published(footprint) => {
                summary.published += 1;
                summary.last_footprint = Some(footprint);
            }
            TickOutcome::Skipped => summary.skipped += 1,
            TickOutcome::Stale => summary.stale += 1,
        }
    }
    summary.frames = frame_loop.frames();

    let playback_position = overlay
        .video()
        .map(|video| video.current_time())
        .unwrap_or(0.0);
    if let Some(session) = overlay.stop() {
        frame_loop.cancel(session);
    }

    log.add(
        format!(
            "{:} frames over {:} ({:.1} s of video) - {:} footprints published, {:} skipped, {:} stale",
            summary.frames,
            crate::utilities::duration_string(&frame_loop.elapsed()),
            playback_position,
            summary.published,
            summary.skipped,
            summary.stale,
        ),
        log::Level::Info,
    );

    if let Some(overlay_state) = overlay.surface.overlay(&configuration.map.overlay_id) {
        log.add(
            format!(
                "overlay \"{:}\" was updated {:} times",
                configuration.map.overlay_id, overlay_state.updates
            ),
            log::Level::Debug,
        );
    }
    if let Some(footprint) = &summary.last_footprint {
        let center = footprint.center();
        log.add(
            format!(
                "last footprint centered at ({:.6}, {:.6}) covers {:.1} m²",
                center.x,
                center.y,
                footprint.to_polygon().chamberlain_duquette_unsigned_area()
            ),
            log::Level::Debug,
        );
    }

    Ok((overlay.surface, summary))
}

pub fn write_output(
    path: &std::path::Path,
    surface: &crate::render::GeoJsonSurface,
    log: &mut crate::utilities::MessageLog,
) -> Result<(), SessionError> {
    let feature_collection = geojson::GeoJson::FeatureCollection(surface.feature_collection());

    match std::fs::write(path, feature_collection.to_string()) {
        Ok(_) => {
            log.add(
                format!("wrote overlay to {:}", path.to_string_lossy()),
                log::Level::Info,
            );
            Ok(())
        }
        Err(error) => Err(SessionError::FailedToWrite {
            path: path.to_string_lossy().to_string(),
            message: error.to_string(),
        }),
    }
}

pub fn run(
    configuration: &crate::configuration::RunConfiguration,
    program_start_time: &chrono::DateTime<chrono::Local>,
    log: &mut crate::utilities::MessageLog,
) -> Result<RunSummary, SessionError> {
    let observations = load_observations(configuration, log)?;
    let (surface, summary) = run_overlay(configuration, observations, log)?;

    if let Some(path) = configuration.output_filename(program_start_time) {
        write_output(&path, &surface, log)?;
    }

    Ok(summary)
}
