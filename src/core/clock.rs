use std::time::Instant;

/// Largest frame delta accepted by default, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Timing for one tick, shared by every per-frame system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub number: u64,
    /// Seconds since the session started
    pub time: f32,
    /// Seconds since the previous tick
    pub delta: f32,
}

/// Single monotonic time source for a session.
///
/// Time only moves when the clock is advanced. `advance` takes a synthetic
/// delta as given, `tick` measures wall time, clamps it and feeds it through
/// `advance`, so every time-dependent formula can be replayed exactly from a
/// list of deltas.
#[derive(Debug)]
pub struct Clock {
    elapsed: f32,
    delta: f32,
    frame: u64,
    max_delta: f32,
    last_tick: Option<Instant>,
}

impl Clock {
    /// Create a clock at t = 0. Wall deltas above `max_delta` are clamped so
    /// a stalled host does not teleport every animation forward.
    pub fn new(max_delta: f32) -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            frame: 0,
            max_delta: max_delta.max(0.0),
            last_tick: None,
        }
    }

    /// Advance by a synthetic delta in seconds. Negative or non-finite
    /// deltas count as zero.
    pub fn advance(&mut self, delta: f32) -> FrameTime {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        self.delta = delta;
        self.elapsed += delta;
        self.frame += 1;
        self.now()
    }

    /// Advance by the wall time since the previous `tick`.
    /// The first tick has a zero delta.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.advance(delta.min(self.max_delta))
    }

    /// Current frame timing without advancing
    pub fn now(&self) -> FrameTime {
        FrameTime {
            number: self.frame,
            time: self.elapsed,
            delta: self.delta,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Rewind to t = 0
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
        self.frame = 0;
        self.last_tick = None;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}
