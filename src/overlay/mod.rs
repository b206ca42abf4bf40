pub mod scheduler;
pub mod synchronizer;

use crate::render::RenderSurface;
use crate::video::VideoPlayback;
use scheduler::{Tick, TickScheduler};

custom_error::custom_error! {pub OverlayError
    Ingest { source: crate::flight_log::IngestError } = "{source}",
    Extent { source: crate::extent::ExtentError } = "{source}",
}

/// What a single animation tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Published(crate::footprint::Footprint),
    /// frame size unknown, or the current sample cannot be projected
    Skipped,
    /// tick belongs to a session that has since been stopped or replaced
    Stale,
}

struct ActiveSession<V> {
    id: u64,
    synchronizer: synchronizer::FrameSynchronizer,
    video: V,
}

/// Owns the active telemetry/video pairing and the map it is drawn on.
///
/// Every session gets a new id. Ticks carry the id they were scheduled for, so replacing or stopping
/// a session invalidates all of its outstanding ticks at once.
pub struct Overlay<V: VideoPlayback, R: RenderSurface> {
    pub surface: R,
    pub camera: crate::footprint::CameraParameters,
    pub playback: crate::configuration::playback::PlaybackConfiguration,
    pub map: crate::configuration::MapConfiguration,
    generation: u64,
    active: Option<ActiveSession<V>>,
}

impl<V: VideoPlayback, R: RenderSurface> Overlay<V, R> {
    pub fn new(
        surface: R,
        camera: crate::footprint::CameraParameters,
        playback: crate::configuration::playback::PlaybackConfiguration,
        map: crate::configuration::MapConfiguration,
    ) -> Self {
        Self {
            surface,
            camera,
            playback,
            map,
            generation: 0,
            active: None,
        }
    }

    /// Replace the current session with a new telemetry sequence and video.
    ///
    /// The map is framed on the flight, the flight path is drawn, a placeholder footprint is shown,
    /// and the first tick is scheduled. If the sequence has no usable coordinates the previous
    /// session is left running.
    pub fn start(
        &mut self,
        sequence: crate::telemetry::TelemetrySequence,
        mut video: V,
        scheduler: &mut dyn TickScheduler,
    ) -> Result<Vec<crate::utilities::LogMessage>, OverlayError> {
        let mut messages = vec![];

        let bounds = crate::extent::compute_bounds(&sequence)?;
        let placement =
            crate::extent::initial_placement_quad(&sequence, self.map.placement_offset)?;
        let path = crate::path::build_path(&sequence);

        self.generation += 1;
        let session = self.generation;

        video.set_looping(self.playback.looping);
        video.set_playback_rate(self.playback.rate);

        let [[min_x, min_y], [max_x, max_y]] = crate::extent::bounds_array(&bounds);
        messages.push(crate::utilities::message(
            format!(
                "session {:} - {:} samples ({:}) within ({:.5}, {:.5}) - ({:.5}, {:.5})",
                session,
                sequence.len(),
                crate::utilities::duration_string(&crate::telemetry::sequence_duration(
                    sequence.len(),
                    self.playback.samples_per_second
                )),
                min_x,
                min_y,
                max_x,
                max_y,
            ),
            log::Level::Info,
        ));
        messages.push(crate::utilities::message(
            format!(
                "flight path has {:} points over {:.1} m",
                path.0.len(),
                crate::path::path_length(&path)
            ),
            log::Level::Debug,
        ));

        self.active = Some(ActiveSession {
            id: session,
            synchronizer: synchronizer::FrameSynchronizer::new(
                sequence,
                self.camera,
                self.playback.samples_per_second,
            ),
            video,
        });

        self.surface.fit_bounds(&bounds, self.map.padding);
        self.surface.draw_flight_path(&path);
        self.surface
            .set_overlay_coordinates(&self.map.overlay_id, placement);

        scheduler.schedule_next_tick(Tick { session });

        Ok(messages)
    }

    /// End the current session; its outstanding ticks become stale.
    pub fn stop(&mut self) -> Option<u64> {
        let stopped = self.active.take().map(|session| session.id);
        self.generation += 1;
        stopped
    }

    /// Run one animation tick.
    ///
    /// A live tick schedules its successor before doing anything else, so the animation continues
    /// even when this tick has nothing to publish.
    pub fn on_tick(
        &mut self,
        tick: Tick,
        scheduler: &mut dyn TickScheduler,
    ) -> TickOutcome {
        let session = match &self.active {
            Some(session) if session.id == tick.session => session,
            _ => return TickOutcome::Stale,
        };

        scheduler.schedule_next_tick(tick);

        let time = session.video.current_time();
        let dimensions = match session.video.frame_dimensions() {
            Some(dimensions) => dimensions,
            None => return TickOutcome::Skipped,
        };

        match session.synchronizer.footprint_at(time, &dimensions) {
            Some(footprint) => {
                self.surface
                    .set_overlay_coordinates(&self.map.overlay_id, footprint.corners());
                TickOutcome::Published(footprint)
            }
            None => TickOutcome::Skipped,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<u64> {
        self.active.as_ref().map(|session| session.id)
    }

    pub fn video(&self) -> Option<&V> {
        self.active.as_ref().map(|session| &session.video)
    }

    pub fn video_mut(&mut self) -> Option<&mut V> {
        self.active.as_mut().map(|session| &mut session.video)
    }
}
