/// Below this distance a smoothed value snaps onto its target
pub const SNAP_EPSILON: f32 = 1e-4;

/// Exponential smoothing toward a target.
///
/// Each `step` closes a fixed fraction of the remaining distance, so a value
/// approaches its target quickly at first and eases in at the end. This is the
/// one primitive used for every emphasis channel (scale, opacity, intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed {
    pub current: f32,
    pub target: f32,
}

impl Smoothed {
    /// Create a settled value
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump straight to the target
    pub fn settle(&mut self) {
        self.current = self.target;
    }

    /// Advance one frame. `rate` is the fraction of the remaining distance
    /// covered, clamped to [0, 1].
    pub fn step(&mut self, rate: f32) -> f32 {
        let rate = rate.clamp(0.0, 1.0);
        self.current += (self.target - self.current) * rate;
        if (self.target - self.current).abs() < SNAP_EPSILON {
            self.current = self.target;
        }
        self.current
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

impl Default for Smoothed {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_covers_fixed_fraction() {
        let mut value = Smoothed::new(0.0);
        value.set_target(1.0);
        assert!((value.step(0.25) - 0.25).abs() < 1e-6);
        // Remaining 0.75, a quarter of which is 0.1875
        assert!((value.step(0.25) - 0.4375).abs() < 1e-6);
    }

    #[test]
    fn converges_and_snaps() {
        let mut value = Smoothed::new(1.0);
        value.set_target(1.15);
        for _ in 0..200 {
            value.step(0.1);
        }
        assert!(value.is_settled());
        assert_eq!(value.current, 1.15);
    }

    #[test]
    fn rate_is_clamped() {
        let mut value = Smoothed::new(0.0);
        value.set_target(2.0);
        assert_eq!(value.step(5.0), 2.0);

        let mut still = Smoothed::new(0.0);
        still.set_target(2.0);
        assert_eq!(still.step(-1.0), 0.0);
    }

    #[test]
    fn never_overshoots() {
        let mut value = Smoothed::new(0.35);
        value.set_target(1.0);
        for _ in 0..50 {
            let v = value.step(0.3);
            assert!(v <= 1.0);
        }
    }
}
