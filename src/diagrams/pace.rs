use glam::Vec3;

use super::common::{phase, standard_presets};
use super::{Diagram, DiagramKind};
use crate::labels::Label;
use crate::math::palette;
use crate::scene::{AnimationProfile, Attribute, Channel, HitVolume, SceneObject, SemanticRecord, Shape};

const LAYERS: [(&str, &str); 6] = [
    ("Fashion", "Fast, discontinuous, experimental"),
    ("Commerce", "Pressing forward, trading on novelty"),
    ("Infrastructure", "Built to last decades"),
    ("Governance", "Slow rules, carrying memory"),
    ("Culture", "Slower still, holding continuity"),
    ("Nature", "Slowest, absorbing every shock above"),
];

const SPACING: f32 = 1.2;
const TOP_RADIUS: f32 = 2.8;
const RADIUS_STEP: f32 = 0.35;
const TOP_SPEED: f32 = 0.9;

pub fn build() -> Diagram {
    let colors = palette(LAYERS.len(), 0.08, 0.55, 0.9);
    let mut objects = Vec::new();
    let mut labels = Vec::new();

    for (i, (name, description)) in LAYERS.iter().enumerate() {
        let radius = TOP_RADIUS + i as f32 * RADIUS_STEP;
        let height = (LAYERS.len() - 1 - i) as f32 * SPACING;
        // Each layer turns at half-ish the speed of the one above
        let speed = TOP_SPEED / (i as f32 + 1.0).powf(1.5);

        let layer = SceneObject::new(
            format!("layer-{}", name.to_lowercase()),
            Shape::Disc {
                radius,
                thickness: 0.3,
            },
        )
        .at(Vec3::new(0.0, height, 0.0))
        .colored(colors[i])
        .animated(
            AnimationProfile::spin(speed)
                .with(Channel::new(Attribute::PositionY).amplitude(0.05).speed(0.8).phase(phase(i))),
        )
        .interactive(
            HitVolume::Ring { inner: 0.0, outer: radius },
            SemanticRecord::new(*name, *description, "layer"),
        );

        labels.push(Label::on_object(
            format!("{}-label", layer.id),
            *name,
            layer.id.clone(),
            Vec3::new(radius + 0.6, 0.0, 0.0),
        ));
        objects.push(layer);
    }

    labels.push(Label::at_point("fast", "Fast learns", Vec3::new(-5.0, (LAYERS.len() - 1) as f32 * SPACING, 0.0)));
    labels.push(Label::at_point("slow", "Slow remembers", Vec3::new(-5.0, 0.0, 0.0)));

    let center = Vec3::new(0.0, (LAYERS.len() - 1) as f32 * SPACING * 0.5, 0.0);
    Diagram {
        kind: DiagramKind::Pace,
        title: "Pace layers".into(),
        objects,
        labels,
        presets: standard_presets(center, 16.0),
        initial_preset: "recommended".into(),
        zones: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_layers_turn_slower() {
        let diagram = build();
        let speeds: Vec<f32> = diagram
            .objects
            .iter()
            .map(|o| o.profile.as_ref().unwrap().channels[0].speed)
            .collect();
        assert_eq!(speeds.len(), 6);
        assert!(speeds.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_top_layer_is_highest_and_smallest() {
        let diagram = build();
        let top = &diagram.objects[0];
        let bottom = &diagram.objects[5];
        assert!(top.rest.position.y > bottom.rest.position.y);
        assert!(top.hit_volume.unwrap().enclosing_radius() < bottom.hit_volume.unwrap().enclosing_radius());
    }
}
