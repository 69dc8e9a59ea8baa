use glam::Vec3;

use super::common::{block, caption, phase, platform, ring_positions, standard_presets};
use super::{Diagram, DiagramKind, ZoneSetup};
use crate::scene::{AnimationProfile, Attribute, Channel, HitVolume, SceneObject, SemanticRecord, Shape};
use crate::zones::{ZoneBlueprint, ZoneRegistry};

/// Zone ids in presentation order
pub const FRICTION_ZONES: [&str; 3] = ["open", "gated", "walled"];

pub fn build() -> Diagram {
    let registry = ZoneRegistry::new()
        .with("open", open_zone)
        .with("gated", gated_zone)
        .with("walled", walled_zone);

    let traveller = SceneObject::new("traveller", Shape::Sphere { radius: 0.45 })
        .at(Vec3::new(0.0, 0.6, 4.5))
        .colored([0.95, 0.95, 0.95])
        .glow(0.3)
        .animated(AnimationProfile::bob(0.15, 2.0, 0.0))
        .interactive(
            HitVolume::Sphere { radius: 0.45 },
            SemanticRecord::new("Traveller", "Whoever is trying to get through", "actor"),
        );
    let labels = vec![caption(&traveller, "You", 0.9)];

    Diagram {
        kind: DiagramKind::Friction,
        title: "Friction zones".into(),
        objects: vec![platform("ground", 40.0, 40.0, [0.18, 0.18, 0.2]), traveller],
        labels,
        presets: standard_presets(Vec3::new(0.0, 1.0, 0.0), 16.0),
        initial_preset: "recommended".into(),
        zones: Some(ZoneSetup {
            registry,
            initial: "open".into(),
        }),
    }
}

fn zone_platform(zone: &str, accent: [f32; 3]) -> SceneObject {
    let [r, g, b] = accent;
    platform(&format!("{}-platform", zone), 10.0, 8.0, [r * 0.4, g * 0.4, b * 0.4])
}

fn open_zone(zone: &str) -> ZoneBlueprint {
    let accent = [0.35, 0.85, 0.5];
    let mut objects = vec![zone_platform(zone, accent)];
    let mut labels = Vec::new();

    // Loose markers drifting in a circle: nothing in the way
    for (i, position) in ring_positions(Vec3::new(0.0, 0.4, 0.0), 3.0, 6).into_iter().enumerate() {
        let marker = SceneObject::new(format!("{}-marker-{}", zone, i), Shape::Sphere { radius: 0.3 })
            .at(position)
            .colored(accent)
            .animated(AnimationProfile::bob(0.2, 1.4, phase(i)))
            .interactive(
                HitVolume::Sphere { radius: 0.3 },
                SemanticRecord::new("Open path", "Nothing slows you down here", "marker"),
            );
        if i == 0 {
            labels.push(caption(&marker, "Open", 0.8));
        }
        objects.push(marker);
    }

    ZoneBlueprint {
        objects,
        labels,
        accent,
        controls: Vec::new(),
    }
}

fn gated_zone(zone: &str) -> ZoneBlueprint {
    let accent = [0.95, 0.75, 0.3];
    let post = Vec3::new(0.25, 2.4, 0.25);
    let record = |title: &str, description: &str| SemanticRecord::new(title, description, "gate");

    let bar = SceneObject::new(format!("{}-bar", zone), Shape::Box { size: Vec3::new(3.6, 0.2, 0.2) })
        .at(Vec3::new(0.0, 1.6, 0.0))
        .colored(accent)
        .animated(AnimationProfile::new().with(
            Channel::new(Attribute::RotationZ).amplitude(0.08).speed(0.7),
        ))
        .interactive(
            HitVolume::Box {
                half_extents: Vec3::new(1.8, 0.1, 0.1),
            },
            record("Gate", "Passable, once someone lets you through"),
        );

    let objects = vec![
        zone_platform(zone, accent),
        block(&format!("{}-post-left", zone), Vec3::new(-2.0, 0.0, 0.0), post, accent, record("Post", "Holds the gate")),
        block(&format!("{}-post-right", zone), Vec3::new(2.0, 0.0, 0.0), post, accent, record("Post", "Holds the gate")),
        bar,
    ];
    let labels = vec![caption(&objects[3], "Gated", 0.8)];

    ZoneBlueprint {
        objects,
        labels,
        accent,
        controls: vec!["toggle-gate".into()],
    }
}

fn walled_zone(zone: &str) -> ZoneBlueprint {
    let accent = [0.9, 0.35, 0.35];
    let mut objects = vec![zone_platform(zone, accent)];

    let brick = Vec3::new(1.2, 0.8, 0.5);
    for row in 0..3 {
        let shift = if row % 2 == 0 { 0.0 } else { brick.x * 0.5 };
        for col in 0..6 {
            let x = (col as f32 - 2.5) * brick.x + shift - brick.x * 0.25;
            objects.push(block(
                &format!("{}-brick-{}-{}", zone, row, col),
                Vec3::new(x, row as f32 * brick.y, 0.0),
                brick,
                accent,
                SemanticRecord::new("Wall", "No way through without tearing it down", "wall"),
            ));
        }
    }
    let labels = vec![caption(&objects[objects.len() - 1], "Walled", 0.8)];

    ZoneBlueprint {
        objects,
        labels,
        accent,
        controls: vec!["wall-height".into()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_ids_prefix_objects() {
        let registry = build().zones.unwrap().registry;
        assert_eq!(registry.ids().collect::<Vec<_>>(), FRICTION_ZONES);
        for zone in FRICTION_ZONES {
            let blueprint = registry.build(zone).unwrap();
            assert!(blueprint.objects.iter().all(|o| o.id.as_str().starts_with(zone)));
            assert!(blueprint.objects.iter().any(|o| o.is_pickable()));
        }
    }

    #[test]
    fn test_controls_belong_to_their_zone() {
        let registry = build().zones.unwrap().registry;
        assert!(registry.build("open").unwrap().controls.is_empty());
        assert_eq!(registry.build("gated").unwrap().controls, ["toggle-gate"]);
        assert_eq!(registry.build("walled").unwrap().controls, ["wall-height"]);
    }
}
