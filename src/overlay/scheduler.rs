/// A request to run one animation tick for an overlay session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub session: u64,
}

/// Where a tick handler registers its continuation. Nothing runs again unless the handler asks.
pub trait TickScheduler {
    fn schedule_next_tick(&mut self, tick: Tick);
}

/// Runs pending ticks in order, one per display refresh of fixed length.
pub struct FrameLoop {
    pub interval: chrono::Duration,
    pending: std::collections::VecDeque<Tick>,
    elapsed: chrono::Duration,
    frames: u64,
}

impl FrameLoop {
    pub fn new(interval: chrono::Duration) -> Self {
        Self {
            interval,
            pending: std::collections::VecDeque::new(),
            elapsed: chrono::Duration::zero(),
            frames: 0,
        }
    }

    /// Take the next pending tick, advancing the clock by one refresh.
    pub fn next_tick(&mut self) -> Option<Tick> {
        let tick = self.pending.pop_front()?;
        self.elapsed = self.elapsed + self.interval;
        self.frames += 1;
        Some(tick)
    }

    /// Drop every pending tick that belongs to `session`.
    pub fn cancel(&mut self, session: u64) {
        self.pending.retain(|tick| tick.session != session);
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// wall-clock time of all frames run so far
    pub fn elapsed(&self) -> chrono::Duration {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl TickScheduler for FrameLoop {
    fn schedule_next_tick(&mut self, tick: Tick) {
        self.pending.push_back(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_run_in_order() {
        let mut frame_loop = FrameLoop::new(chrono::Duration::milliseconds(16));
        frame_loop.schedule_next_tick(Tick { session: 1 });
        frame_loop.schedule_next_tick(Tick { session: 2 });

        assert_eq!(frame_loop.next_tick(), Some(Tick { session: 1 }));
        assert_eq!(frame_loop.next_tick(), Some(Tick { session: 2 }));
        assert_eq!(frame_loop.next_tick(), None);

        assert_eq!(frame_loop.frames(), 2);
        assert_eq!(frame_loop.elapsed(), chrono::Duration::milliseconds(32));
    }

    #[test]
    fn test_cancel() {
        let mut frame_loop = FrameLoop::new(chrono::Duration::milliseconds(16));
        frame_loop.schedule_next_tick(Tick { session: 1 });
        frame_loop.schedule_next_tick(Tick { session: 2 });
        frame_loop.schedule_next_tick(Tick { session: 1 });

        frame_loop.cancel(1);

        assert_eq!(frame_loop.pending(), 1);
        assert_eq!(frame_loop.next_tick(), Some(Tick { session: 2 }));
    }
}
