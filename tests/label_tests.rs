use concept_stage::camera::Camera;
use concept_stage::core::{InputEvent, Viewport};
use concept_stage::diagrams::{self, DiagramKind};
use concept_stage::labels::LabelPlacement;
use concept_stage::{HeadlessBackend, StageConfig, VisualizationSession};
use glam::{Mat4, Vec3};

const FRAME: f32 = 1.0 / 60.0;

fn light() -> VisualizationSession<HeadlessBackend> {
    VisualizationSession::new(diagrams::build(DiagramKind::Light), StageConfig::default(), HeadlessBackend::new())
        .unwrap()
}

/// Pixel position of a world point, computed straight from the camera parameters
fn analytic_pixels(camera: &Camera, viewport: Viewport, world: Vec3) -> (f32, f32) {
    let view = Mat4::look_at_rh(camera.position, camera.target, camera.up);
    let proj = Mat4::perspective_rh_gl(camera.fov_degrees.to_radians(), camera.aspect, camera.near, camera.far);
    let clip = proj * view * world.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    (
        (ndc.x + 1.0) * 0.5 * viewport.width as f32,
        (1.0 - ndc.y) * 0.5 * viewport.height as f32,
    )
}

fn placement<'a>(labels: &'a [LabelPlacement], id: &str) -> &'a LabelPlacement {
    labels.iter().find(|l| l.id == id).unwrap()
}

#[cfg(test)]
mod label_tests {
    use super::*;

    #[test]
    fn test_object_label_matches_analytic_projection() {
        let mut session = light();
        for _ in 0..45 {
            session.tick(FRAME).unwrap();
        }
        let report = session.tick(FRAME).unwrap();

        let world = session.object("source").unwrap().live.transform.position + Vec3::new(0.0, 1.8, 0.0);
        let (x, y) = analytic_pixels(session.camera(), session.viewport(), world);
        let label = placement(&report.labels, "source-label");

        assert!(label.visible);
        assert!((label.x - x).abs() < 0.05, "x {} vs {}", label.x, x);
        assert!((label.y - y).abs() < 0.05, "y {} vs {}", label.y, y);
    }

    #[test]
    fn test_labels_follow_moving_camera() {
        let mut session = light();
        let first = placement(&session.tick(FRAME).unwrap().labels, "observer").clone();

        session.set_camera_preset("isometric").unwrap();
        for _ in 0..30 {
            session.tick(FRAME).unwrap();
        }
        let report = session.tick(FRAME).unwrap();
        let moved = placement(&report.labels, "observer");

        assert!((moved.x - first.x).abs() + (moved.y - first.y).abs() > 1.0);
        let (x, y) = analytic_pixels(session.camera(), session.viewport(), Vec3::new(0.0, 0.0, 9.0));
        assert!((moved.x - x).abs() < 0.05);
        assert!((moved.y - y).abs() < 0.05);
    }

    #[test]
    fn test_resize_rescales_placements() {
        let mut session = light();
        session.push_input(InputEvent::Resized { width: 640, height: 360 });
        let report = session.tick(FRAME).unwrap();

        let viewport = session.viewport();
        assert_eq!(viewport, Viewport::new(640, 360));
        let (x, y) = analytic_pixels(session.camera(), viewport, Vec3::new(0.0, 0.0, 9.0));
        let label = placement(&report.labels, "observer");
        assert!((label.x - x).abs() < 0.05);
        assert!((label.y - y).abs() < 0.05);
    }

    #[test]
    fn test_label_behind_camera_hidden() {
        let mut session = light();
        assert!(placement(&session.tick(FRAME).unwrap().labels, "observer").visible);

        // Focusing the source pulls the camera in past the observer point
        session.focus_object("source").unwrap();
        for _ in 0..120 {
            session.tick(FRAME).unwrap();
        }
        let report = session.tick(FRAME).unwrap();
        let observer = placement(&report.labels, "observer");
        assert!(!observer.visible);
        assert_eq!(observer.opacity, 0.0);
        assert!(placement(&report.labels, "source-label").visible);
    }
}
