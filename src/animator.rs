use crate::scene::{Attribute, LiveState, SceneGraph, SceneObject, Transform};

/// Animated state before emphasis and group offset are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub transform: Transform,
    pub opacity: f32,
}

/// Drives every object's live state from the clock.
///
/// The procedural part is a pure function of time: each channel adds
/// `base + amplitude * waveform(speed * t + phase)` to the rest value, so any
/// frame can be computed directly. Emphasis is the only path-dependent term:
/// it is smoothed toward its target by a fixed fraction per frame.
#[derive(Debug, Clone, Copy)]
pub struct ProceduralAnimator {
    rate: f32,
}

impl ProceduralAnimator {
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Animated pose at `time`. Objects without a profile stay at rest.
    pub fn pose(object: &SceneObject, time: f32) -> Pose {
        let mut transform = object.rest;
        let mut opacity = object.material.opacity;

        let Some(profile) = &object.profile else {
            return Pose { transform, opacity };
        };

        for channel in &profile.channels {
            let value = channel.sample(time);
            match channel.attribute {
                Attribute::PositionX => transform.position.x += value,
                Attribute::PositionY => transform.position.y += value,
                Attribute::PositionZ => transform.position.z += value,
                Attribute::RotationX => transform.rotation.x += value,
                Attribute::RotationY => transform.rotation.y += value,
                Attribute::RotationZ => transform.rotation.z += value,
                Attribute::Scale => transform.scale += value,
                Attribute::Opacity => opacity += value,
            }
        }

        Pose {
            transform,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Recompute every object's live state for this frame
    pub fn animate(&self, graph: &mut SceneGraph, time: f32) {
        let rate = self.rate;
        graph.for_each_with_offset(|object, offset| {
            let pose = Self::pose(object, time);
            let emphasis = object.emphasis.step(rate);

            let mut transform = pose.transform;
            transform.position += offset;
            transform.scale *= emphasis.scale;

            object.live = LiveState {
                transform,
                opacity: (pose.opacity * emphasis.opacity).clamp(0.0, 1.0),
                intensity: (object.material.glow + emphasis.intensity).max(0.0),
            };
        });
    }
}
