use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::config::EmphasisLevel;
use crate::math::Smoothed;
use crate::render::MeshHandle;

/// Unique identifier of a scene object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Position, Euler rotation (radians, XYZ order) and per-axis scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Largest axis scale, used to grow hit volumes with the object
    pub fn uniform_scale(&self) -> f32 {
        self.scale.abs().max_element()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Animatable attribute of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    /// Uniform scale offset
    Scale,
    Opacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    #[default]
    Sine,
    Cosine,
    /// Linear in time, for continuous spin
    Ramp,
}

impl Waveform {
    pub fn eval(self, x: f32) -> f32 {
        match self {
            Waveform::Sine => x.sin(),
            Waveform::Cosine => x.cos(),
            Waveform::Ramp => x,
        }
    }
}

/// One animated attribute: `base + amplitude * waveform(speed * t + phase)`,
/// added to the object's rest value. Missing fields default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub attribute: Attribute,
    pub base: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
    pub waveform: Waveform,
}

impl Channel {
    pub fn new(attribute: Attribute) -> Self {
        Self {
            attribute,
            ..Self::default()
        }
    }

    pub fn base(mut self, base: f32) -> Self {
        self.base = base;
        self
    }

    pub fn amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn sample(&self, time: f32) -> f32 {
        self.base + self.amplitude * self.waveform.eval(self.speed * time + self.phase)
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self {
            attribute: Attribute::PositionY,
            base: 0.0,
            amplitude: 0.0,
            speed: 0.0,
            phase: 0.0,
            waveform: Waveform::Sine,
        }
    }
}

/// Set of independent animated channels for one object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationProfile {
    pub channels: Vec<Channel>,
}

impl AnimationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Vertical bob around the rest position
    pub fn bob(amplitude: f32, speed: f32, phase: f32) -> Self {
        Self::new().with(
            Channel::new(Attribute::PositionY)
                .amplitude(amplitude)
                .speed(speed)
                .phase(phase),
        )
    }

    /// Constant spin around the Y axis, in radians per second
    pub fn spin(speed: f32) -> Self {
        Self::new().with(
            Channel::new(Attribute::RotationY)
                .amplitude(1.0)
                .speed(speed)
                .waveform(Waveform::Ramp),
        )
    }
}

/// Descriptive record shown when the object is hovered or focused
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticRecord {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl SemanticRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

/// Pointer hit volume, in object space, scaled by the live transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitVolume {
    Sphere { radius: f32 },
    /// Flat annulus in the object's local XZ plane; `inner` 0 gives a disc
    Ring { inner: f32, outer: f32 },
    /// Axis-aligned box, rotation is ignored
    Box { half_extents: Vec3 },
}

impl HitVolume {
    /// Radius of the smallest sphere around the object origin that encloses
    /// the volume. Drives the innermost-wins pick rule.
    pub fn enclosing_radius(&self) -> f32 {
        match *self {
            HitVolume::Sphere { radius } => radius,
            HitVolume::Ring { outer, .. } => outer,
            HitVolume::Box { half_extents } => half_extents.length(),
        }
    }
}

/// Mesh primitive handed to the render backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Ring { inner: f32, outer: f32 },
    Disc { radius: f32, thickness: f32 },
    Box { size: Vec3 },
    Plane { width: f32, depth: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub glow: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [0.8, 0.8, 0.8],
            opacity: 1.0,
            glow: 0.0,
        }
    }
}

/// Smoothed emphasis state, one channel per emphasised property
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    pub scale: Smoothed,
    pub opacity: Smoothed,
    pub intensity: Smoothed,
}

impl Emphasis {
    pub fn new(level: EmphasisLevel) -> Self {
        Self {
            scale: Smoothed::new(level.scale),
            opacity: Smoothed::new(level.opacity),
            intensity: Smoothed::new(level.intensity),
        }
    }

    pub fn set_target(&mut self, level: EmphasisLevel) {
        self.scale.set_target(level.scale);
        self.opacity.set_target(level.opacity);
        self.intensity.set_target(level.intensity);
    }

    pub fn target(&self) -> EmphasisLevel {
        EmphasisLevel {
            scale: self.scale.target,
            opacity: self.opacity.target,
            intensity: self.intensity.target,
        }
    }

    pub fn current(&self) -> EmphasisLevel {
        EmphasisLevel {
            scale: self.scale.current,
            opacity: self.opacity.current,
            intensity: self.intensity.current,
        }
    }

    pub fn step(&mut self, rate: f32) -> EmphasisLevel {
        EmphasisLevel {
            scale: self.scale.step(rate),
            opacity: self.opacity.step(rate),
            intensity: self.intensity.step(rate),
        }
    }
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::new(EmphasisLevel::NEUTRAL)
    }
}

/// State realized for the current frame: animation, emphasis and group
/// offset all applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveState {
    pub transform: Transform,
    pub opacity: f32,
    pub intensity: f32,
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    /// Owning zone or figure
    pub group: String,
    pub rest: Transform,
    pub shape: Shape,
    pub material: Material,
    pub profile: Option<AnimationProfile>,
    pub interactable: bool,
    pub hit_volume: Option<HitVolume>,
    pub semantic: Option<SemanticRecord>,
    pub emphasis: Emphasis,
    pub live: LiveState,
    pub mesh: Option<MeshHandle>,
}

impl SceneObject {
    pub fn new(id: impl Into<ObjectId>, shape: Shape) -> Self {
        let material = Material::default();
        let rest = Transform::default();
        Self {
            id: id.into(),
            group: super::FIGURE_GROUP.to_string(),
            rest,
            shape,
            material,
            profile: None,
            interactable: false,
            hit_volume: None,
            semantic: None,
            emphasis: Emphasis::default(),
            live: LiveState {
                transform: rest,
                opacity: material.opacity,
                intensity: material.glow,
            },
            mesh: None,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.rest.position = position;
        self.live.transform = self.rest;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rest.rotation = rotation;
        self.live.transform = self.rest;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.rest.scale = scale;
        self.live.transform = self.rest;
        self
    }

    pub fn colored(mut self, color: [f32; 3]) -> Self {
        self.material.color = color;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.material.opacity = opacity;
        self.live.opacity = opacity;
        self
    }

    pub fn glow(mut self, glow: f32) -> Self {
        self.material.glow = glow;
        self.live.intensity = glow;
        self
    }

    pub fn animated(mut self, profile: AnimationProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Make the object pickable, with the record shown on hover/focus
    pub fn interactive(mut self, hit_volume: HitVolume, semantic: SemanticRecord) -> Self {
        self.interactable = true;
        self.hit_volume = Some(hit_volume);
        self.semantic = Some(semantic);
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn is_pickable(&self) -> bool {
        self.interactable && self.hit_volume.is_some()
    }
}
