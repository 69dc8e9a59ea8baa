use glam::Vec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::config::FocusConfig;
use crate::error::{StageError, StageResult};
use crate::math::Easing;

/// Named camera pose. Presets are plain inputs to `transition_to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPreset {
    pub name: String,
    pub position: Vec3,
    pub target: Vec3,
    pub duration: f32,
    #[serde(default)]
    pub easing: Easing,
}

impl CameraPreset {
    pub fn new(name: impl Into<String>, position: Vec3, target: Vec3, duration: f32) -> Self {
        Self {
            name: name.into(),
            position,
            target,
            duration,
            easing: Easing::default(),
        }
    }
}

/// An in-flight camera interpolation
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    pub from_position: Vec3,
    pub from_target: Vec3,
    pub to_position: Vec3,
    pub to_target: Vec3,
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    /// Preset this transition is heading to, if any
    pub preset: Option<String>,
}

impl CameraTransition {
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    fn sample(&self) -> (Vec3, Vec3) {
        let t = self.easing.apply(self.progress());
        (
            self.from_position.lerp(self.to_position, t),
            self.from_target.lerp(self.to_target, t),
        )
    }
}

/// Moves the camera between presets and focus targets.
/// At most one transition runs; a new request replaces it and starts from
/// the camera's live pose.
#[derive(Debug, Clone, Default)]
pub struct CameraDirector {
    presets: Vec<CameraPreset>,
    active: Option<CameraTransition>,
    /// Last preset requested outside of focus, returned to on release
    resting: Option<String>,
}

impl CameraDirector {
    pub fn new(presets: Vec<CameraPreset>) -> Self {
        Self {
            presets,
            active: None,
            resting: None,
        }
    }

    pub fn preset(&self, name: &str) -> Option<&CameraPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn presets(&self) -> &[CameraPreset] {
        &self.presets
    }

    pub fn active(&self) -> Option<&CameraTransition> {
        self.active.as_ref()
    }

    pub fn is_moving(&self) -> bool {
        self.active.is_some()
    }

    pub fn resting_preset(&self) -> Option<&str> {
        self.resting.as_deref()
    }

    /// Jump straight to a preset with no transition
    pub fn snap_to_preset(&mut self, camera: &mut Camera, name: &str) -> StageResult<()> {
        let preset = self.preset(name).ok_or_else(|| {
            warn!("Rejected unknown camera preset: {}", name);
            StageError::UnknownPreset(name.to_string())
        })?;
        camera.position = preset.position;
        camera.target = preset.target;
        self.active = None;
        self.resting = Some(name.to_string());
        Ok(())
    }

    /// Start a transition from the live camera pose, replacing any in flight
    pub fn transition_to(&mut self, camera: &Camera, position: Vec3, target: Vec3, duration: f32, easing: Easing) {
        if let Some(previous) = &self.active {
            debug!(
                "Camera transition interrupted at {:.0}%",
                previous.progress() * 100.0
            );
        }
        self.active = Some(CameraTransition {
            from_position: camera.position,
            from_target: camera.target,
            to_position: position,
            to_target: target,
            duration,
            elapsed: 0.0,
            easing,
            preset: None,
        });
    }

    /// Head to a named preset. Returns `Ok(false)` when the camera is already
    /// at, or already heading to, that preset.
    pub fn apply_preset(&mut self, camera: &Camera, name: &str) -> StageResult<bool> {
        let Some(preset) = self.preset(name).cloned() else {
            warn!("Rejected unknown camera preset: {}", name);
            return Err(StageError::UnknownPreset(name.to_string()));
        };

        let heading_there = self
            .active
            .as_ref()
            .is_some_and(|t| t.preset.as_deref() == Some(name));
        let already_there = self.active.is_none()
            && self.resting.as_deref() == Some(name)
            && camera.position.distance(preset.position) < 1e-4
            && camera.target.distance(preset.target) < 1e-4;
        self.resting = Some(name.to_string());
        if heading_there || already_there {
            return Ok(false);
        }

        debug!("Camera -> preset {}", name);
        self.transition_to(camera, preset.position, preset.target, preset.duration, preset.easing);
        if let Some(transition) = &mut self.active {
            transition.preset = Some(preset.name);
        }
        Ok(true)
    }

    /// Approach a focused point from the camera's current side
    pub fn focus_on(&mut self, camera: &Camera, target: Vec3, config: &FocusConfig) {
        let away = (camera.position - target).try_normalize().unwrap_or(Vec3::Z);
        let position = target + away * config.distance;
        debug!("Camera -> focus at {:?}", target);
        self.transition_to(camera, position, target, config.duration, config.easing);
    }

    /// Return to the last preset requested outside of focus.
    /// Returns false when there is no resting preset.
    pub fn return_to_rest(&mut self, camera: &Camera) -> bool {
        let Some(name) = self.resting.clone() else {
            return false;
        };
        self.apply_preset(camera, &name).is_ok()
    }

    /// Advance the active transition. Returns true on the frame it arrives.
    pub fn step(&mut self, camera: &mut Camera, delta: f32) -> bool {
        let Some(transition) = &mut self.active else {
            return false;
        };

        transition.elapsed += delta.max(0.0);
        let (position, target) = transition.sample();
        camera.position = position;
        camera.target = target;

        if transition.progress() >= 1.0 {
            camera.position = transition.to_position;
            camera.target = transition.to_target;
            self.active = None;
            return true;
        }
        false
    }
}
