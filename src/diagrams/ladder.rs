use glam::Vec3;

use super::common::{block, caption, phase, standard_presets};
use super::{Diagram, DiagramKind};
use crate::math::palette;
use crate::scene::{AnimationProfile, SceneObject, SemanticRecord, Shape};

const RUNGS: [(&str, &str); 5] = [
    ("Instance", "One particular thing, here and now"),
    ("Object", "The thing apart from this moment"),
    ("Kind", "Everything of the same sort"),
    ("Category", "Kinds grouped by what they share"),
    ("Principle", "The rule that makes the category"),
];

const RUNG_RISE: f32 = 1.6;
const RUNG_WIDTH: f32 = 3.0;

pub fn build() -> Diagram {
    let colors = palette(RUNGS.len(), 0.6, 0.45, 0.9);
    let top = RUNGS.len() as f32 * RUNG_RISE;

    let mut objects = vec![
        rail("rail-left", -RUNG_WIDTH * 0.5 - 0.15, top),
        rail("rail-right", RUNG_WIDTH * 0.5 + 0.15, top),
    ];
    let mut labels = Vec::new();

    for (i, (name, description)) in RUNGS.iter().enumerate() {
        let rung = block(
            &format!("rung-{}", i),
            Vec3::new(0.0, (i as f32 + 0.5) * RUNG_RISE, 0.0),
            Vec3::new(RUNG_WIDTH, 0.25, 0.5),
            colors[i],
            SemanticRecord::new(*name, *description, "rung"),
        )
        .animated(AnimationProfile::bob(0.06, 1.1, phase(i)));
        labels.push(caption(&rung, name, 0.6));
        objects.push(rung);
    }

    let center = Vec3::new(0.0, top * 0.5, 0.0);
    Diagram {
        kind: DiagramKind::Ladder,
        title: "Abstraction ladder".into(),
        objects,
        labels,
        presets: standard_presets(center, 14.0),
        initial_preset: "recommended".into(),
        zones: None,
    }
}

fn rail(id: &str, x: f32, height: f32) -> SceneObject {
    SceneObject::new(id, Shape::Box { size: Vec3::new(0.2, height, 0.2) })
        .at(Vec3::new(x, height * 0.5, 0.0))
        .colored([0.55, 0.55, 0.6])
}
