/// One-shot countdown measured in clock seconds.
///
/// Used for fixed-length phases (zone slides). A zero or negative duration
/// completes on its first tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create a countdown that is already running
    pub fn started(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            active: true,
        }
    }

    /// Tick with delta, returns true exactly once, on the tick that completes
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta.max(0.0);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.active { 0.0 } else { 1.0 };
        }
        (self.elapsed / self.duration).min(1.0)
    }
}
