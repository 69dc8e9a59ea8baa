use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Easing curve applied to normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    QuadInOut,
    #[default]
    CubicInOut,
    CubicOut,
    SineInOut,
    ExpoOut,
}

impl Easing {
    /// Map progress in [0, 1] to eased progress in [0, 1].
    /// Out-of-range input is clamped first.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
        }
    }
}
