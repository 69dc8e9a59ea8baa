use glam::Vec3;
use std::f32::consts::TAU;

use crate::director::CameraPreset;
use crate::labels::Label;
use crate::math::Easing;
use crate::scene::{HitVolume, SceneObject, SemanticRecord, Shape};

/// Evenly spaced points on a circle in the XZ plane
pub fn ring_positions(center: Vec3, radius: f32, count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * TAU;
            center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

/// Deterministic phase offset for the i-th member of a set, in [0, TAU)
pub fn phase(i: usize) -> f32 {
    (i as f32 * 0.618_034).fract() * TAU
}

/// The three presets every diagram offers, framed around `look_at`
pub fn standard_presets(look_at: Vec3, distance: f32) -> Vec<CameraPreset> {
    let iso = distance / 3f32.sqrt();
    vec![
        CameraPreset::new(
            "recommended",
            look_at + Vec3::new(0.0, distance * 0.35, distance),
            look_at,
            1.2,
        ),
        CameraPreset::new("isometric", look_at + Vec3::splat(iso) * 1.2, look_at, 1.2),
        CameraPreset {
            easing: Easing::SineInOut,
            // Tiny z offset keeps the look-at basis well defined
            ..CameraPreset::new("top", look_at + Vec3::new(0.0, distance * 1.2, 0.01), look_at, 1.5)
        },
    ]
}

/// Flat platform a figure or zone stands on. Never pickable.
pub fn platform(id: &str, width: f32, depth: f32, color: [f32; 3]) -> SceneObject {
    SceneObject::new(id, Shape::Plane { width, depth })
        .colored(color)
        .opacity(0.9)
}

/// Interactable box sitting on the platform at `position`
pub fn block(id: &str, position: Vec3, size: Vec3, color: [f32; 3], record: SemanticRecord) -> SceneObject {
    SceneObject::new(id, Shape::Box { size })
        .at(position + Vec3::new(0.0, size.y * 0.5, 0.0))
        .colored(color)
        .interactive(HitVolume::Box { half_extents: size * 0.5 }, record)
}

/// Label floating above an object
pub fn caption(object: &SceneObject, text: &str, height: f32) -> Label {
    Label::on_object(
        format!("{}-label", object.id),
        text,
        object.id.clone(),
        Vec3::new(0.0, height, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_positions_on_circle() {
        let points = ring_positions(Vec3::new(0.0, 2.0, 0.0), 3.0, 8);
        assert_eq!(points.len(), 8);
        for p in points {
            assert!((Vec3::new(p.x, 0.0, p.z).length() - 3.0).abs() < 1e-5);
            assert_eq!(p.y, 2.0);
        }
    }

    #[test]
    fn test_phases_are_spread_and_stable() {
        assert_eq!(phase(0), 0.0);
        assert_eq!(phase(5), phase(5));
        assert!((0..32).all(|i| (0.0..TAU).contains(&phase(i))));
        assert_ne!(phase(1), phase(2));
    }

    #[test]
    fn test_standard_presets() {
        let presets = standard_presets(Vec3::ZERO, 20.0);
        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["recommended", "isometric", "top"]);
        assert!(presets.iter().all(|p| p.target == Vec3::ZERO));
    }

    #[test]
    fn test_block_rests_on_floor() {
        let object = block("b", Vec3::ZERO, Vec3::new(1.0, 4.0, 1.0), [1.0; 3], SemanticRecord::default());
        assert_eq!(object.rest.position.y, 2.0);
        assert!(object.is_pickable());
    }
}
