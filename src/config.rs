use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::Viewport;
use crate::math::Easing;
use crate::picker::PickPriority;

/// Tunables for a visualization session, loadable from JSON.
/// Any section or field missing from the file keeps its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub viewport: Viewport,
    pub camera: CameraConfig,
    pub clock: ClockConfig,
    pub emphasis: EmphasisConfig,
    pub focus: FocusConfig,
    pub zones: ZoneConfig,
    pub labels: LabelConfig,
    pub picking: PickConfig,
}

impl StageConfig {
    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config = serde_json::from_str(text).context("Failed to parse stage config")?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Largest wall-clock delta a single tick may advance, in seconds
    pub max_delta: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_delta: crate::core::clock::DEFAULT_MAX_DELTA,
        }
    }
}

/// Emphasis applied on top of an object's animated state.
/// `scale` and `opacity` multiply, `intensity` adds to the material glow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisLevel {
    pub scale: f32,
    pub opacity: f32,
    pub intensity: f32,
}

impl EmphasisLevel {
    pub const NEUTRAL: Self = Self {
        scale: 1.0,
        opacity: 1.0,
        intensity: 0.0,
    };
}

impl Default for EmphasisLevel {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisConfig {
    /// Fraction of the remaining distance closed per frame
    pub rate: f32,
    /// Every object while nothing is hovered or focused
    pub baseline: EmphasisLevel,
    /// The hovered or focused object
    pub raised: EmphasisLevel,
    /// Every other object while something is hovered or focused
    pub dimmed: EmphasisLevel,
}

impl Default for EmphasisConfig {
    fn default() -> Self {
        Self {
            rate: 0.1,
            baseline: EmphasisLevel::NEUTRAL,
            raised: EmphasisLevel {
                scale: 1.15,
                opacity: 1.0,
                intensity: 0.8,
            },
            dimmed: EmphasisLevel {
                scale: 1.0,
                opacity: 0.35,
                intensity: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Camera distance from a focused object
    pub distance: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            distance: 8.0,
            duration: 1.2,
            easing: Easing::CubicInOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// How far a zone root slides before it is swapped, in world units
    pub slide_distance: f32,
    /// Duration of each half of the switch (out, then in)
    pub slide_duration: f32,
    pub easing: Easing,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            slide_distance: 30.0,
            slide_duration: 0.6,
            easing: Easing::CubicInOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// View depth where labels start fading
    pub fade_start: f32,
    /// View depth where labels are fully hidden
    pub fade_end: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            fade_start: 40.0,
            fade_end: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickConfig {
    pub priority: PickPriority,
    /// Objects fainter than this cannot be picked
    pub min_opacity: f32,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            priority: PickPriority::SmallestRadius,
            min_opacity: 0.05,
        }
    }
}
