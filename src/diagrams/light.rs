use glam::Vec3;

use super::common::{caption, phase, standard_presets};
use super::{Diagram, DiagramKind};
use crate::labels::Label;
use crate::math::palette;
use crate::scene::{AnimationProfile, Attribute, Channel, HitVolume, SceneObject, SemanticRecord, Shape, Waveform};

const RING_RADII: [f32; 4] = [2.5, 4.0, 5.5, 7.0];
const RING_WIDTH: f32 = 0.15;
const PARTICLES: usize = 24;

const RINGS: [(&str, &str); 4] = [
    ("Perceived", "What reaches the observer directly"),
    ("Measured", "What instruments can register"),
    ("Inferred", "What models reconstruct from measurements"),
    ("Unobserved", "What the light carries that nobody reads"),
];

pub fn build() -> Diagram {
    let mut objects = Vec::new();
    let mut labels = Vec::new();

    let source = SceneObject::new("source", Shape::Sphere { radius: 1.2 })
        .colored([1.0, 0.92, 0.6])
        .glow(1.0)
        .animated(AnimationProfile::new().with(
            Channel::new(Attribute::Scale).amplitude(0.05).speed(2.0),
        ))
        .interactive(
            HitVolume::Sphere { radius: 1.2 },
            SemanticRecord::new("Source", "Where the light starts", "source"),
        );
    labels.push(caption(&source, "Source", 1.8));
    objects.push(source);

    let colors = palette(RING_RADII.len(), 0.55, 0.5, 0.95);
    for (i, ((title, description), radius)) in RINGS.iter().zip(RING_RADII).enumerate() {
        // Hit volume is the full disc so rings nest; the innermost wins
        let ring = SceneObject::new(
            format!("ring-{}", i),
            Shape::Ring {
                inner: radius - RING_WIDTH,
                outer: radius + RING_WIDTH,
            },
        )
        .colored(colors[i])
        .opacity(0.8)
        .animated(
            AnimationProfile::new()
                .with(Channel::new(Attribute::RotationX).amplitude(0.04).speed(0.5).phase(phase(i)))
                .with(Channel::new(Attribute::Opacity).amplitude(0.1).speed(1.0).phase(phase(i))),
        )
        .interactive(
            HitVolume::Ring {
                inner: 0.0,
                outer: radius + RING_WIDTH,
            },
            SemanticRecord::new(*title, *description, "observable"),
        );
        labels.push(Label::on_object(
            format!("ring-{}-label", i),
            *title,
            ring.id.clone(),
            Vec3::new(radius, 0.4, 0.0),
        ));
        objects.push(ring);
    }

    // Particles orbit the source: cosine on x and sine on z trace a circle
    for i in 0..PARTICLES {
        let orbit = RING_RADII[i % RING_RADII.len()];
        let speed = 0.8 / orbit.sqrt();
        let offset = phase(i);
        let particle = SceneObject::new(format!("particle-{}", i), Shape::Sphere { radius: 0.08 })
            .colored([1.0, 0.95, 0.8])
            .glow(0.6)
            .animated(
                AnimationProfile::new()
                    .with(
                        Channel::new(Attribute::PositionX)
                            .amplitude(orbit)
                            .speed(speed)
                            .phase(offset)
                            .waveform(Waveform::Cosine),
                    )
                    .with(Channel::new(Attribute::PositionZ).amplitude(orbit).speed(speed).phase(offset))
                    .with(Channel::new(Attribute::PositionY).amplitude(0.2).speed(1.3).phase(offset)),
            );
        objects.push(particle);
    }

    labels.push(Label::at_point("observer", "Observer", Vec3::new(0.0, 0.0, 9.0)));

    Diagram {
        kind: DiagramKind::Light,
        title: "Observable light".into(),
        objects,
        labels,
        presets: standard_presets(Vec3::ZERO, 18.0),
        initial_preset: "recommended".into(),
        zones: None,
    }
}
