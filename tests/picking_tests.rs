use concept_stage::config::PickConfig;
use concept_stage::core::{InputEvent, Viewport};
use concept_stage::diagrams::{self, DiagramKind};
use concept_stage::focus::FocusState;
use concept_stage::labels::LabelProjector;
use concept_stage::math::Ray;
use concept_stage::picker::{PickPriority, PointerPicker};
use concept_stage::render::{HeadlessBackend, RenderBackend};
use concept_stage::scene::{HitVolume, ObjectId, SceneGraph, SceneObject, SemanticRecord, Shape};
use concept_stage::{StageConfig, VisualizationSession};
use glam::Vec3;

const FRAME: f32 = 1.0 / 60.0;

fn disc(id: &str, radius: f32, height: f32) -> SceneObject {
    SceneObject::new(id, Shape::Ring { inner: 0.0, outer: radius })
        .at(Vec3::new(0.0, height, 0.0))
        .interactive(
            HitVolume::Ring { inner: 0.0, outer: radius },
            SemanticRecord::new(id, "", "target"),
        )
}

fn graph_of(objects: Vec<SceneObject>) -> SceneGraph {
    let mut backend = HeadlessBackend::new();
    backend.init(Viewport::default()).unwrap();
    let mut graph = SceneGraph::new();
    for object in objects {
        graph.insert(object, &mut backend).unwrap();
    }
    graph
}

#[cfg(test)]
mod picking_tests {
    use super::*;

    #[test]
    fn test_radius_one_beats_radius_three() {
        // The larger target sits in front of the smaller one
        let graph = graph_of(vec![disc("wide", 3.0, 1.0), disc("narrow", 1.0, 0.0)]);
        let picker = PointerPicker::new(&PickConfig::default());
        let ray = Ray::new(Vec3::new(0.5, 10.0, 0.2), Vec3::NEG_Y);

        let hits = picker.hits(&ray, &graph);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, ObjectId::from("narrow"));
        assert!(hits[1].distance < hits[0].distance);
    }

    #[test]
    fn test_outside_inner_target_picks_outer() {
        let graph = graph_of(vec![disc("wide", 3.0, 1.0), disc("narrow", 1.0, 0.0)]);
        let picker = PointerPicker::new(&PickConfig::default());
        let ray = Ray::new(Vec3::new(2.0, 10.0, 0.0), Vec3::NEG_Y);
        assert_eq!(picker.pick_ray(&ray, &graph), Some(ObjectId::from("wide")));
    }

    #[test]
    fn test_nearest_policy_prefers_front() {
        let graph = graph_of(vec![disc("wide", 3.0, 1.0), disc("narrow", 1.0, 0.0)]);
        let picker = PointerPicker::new(&PickConfig {
            priority: PickPriority::Nearest,
            ..PickConfig::default()
        });
        let ray = Ray::new(Vec3::new(0.5, 10.0, 0.2), Vec3::NEG_Y);
        assert_eq!(picker.pick_ray(&ray, &graph), Some(ObjectId::from("wide")));
    }

    #[test]
    fn test_light_source_wins_inside_rings() {
        let mut session =
            VisualizationSession::new(diagrams::build(DiagramKind::Light), StageConfig::default(), HeadlessBackend::new())
                .unwrap();
        session.tick(FRAME).unwrap();

        let (at, _) = LabelProjector::project_point(session.camera(), &session.viewport(), Vec3::ZERO).unwrap();
        session.push_input(InputEvent::PointerMoved { x: at.x, y: at.y });
        let report = session.tick(FRAME).unwrap();
        assert_eq!(report.focus, FocusState::Hovering(ObjectId::from("source")));
    }

    #[test]
    fn test_light_ring_band_under_pointer() {
        let mut session =
            VisualizationSession::new(diagrams::build(DiagramKind::Light), StageConfig::default(), HeadlessBackend::new())
                .unwrap();
        session.tick(FRAME).unwrap();

        // Between the first and second ring radii, away from the source
        let (at, _) =
            LabelProjector::project_point(session.camera(), &session.viewport(), Vec3::new(3.2, 0.0, 0.0)).unwrap();
        session.push_input(InputEvent::PointerDown { x: at.x, y: at.y });
        let report = session.tick(FRAME).unwrap();
        assert_eq!(report.focus, FocusState::Focused(ObjectId::from("ring-1")));
    }
}
