use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::camera::Camera;
use crate::config::PickConfig;
use crate::core::Viewport;
use crate::math::{intersect_aabb, intersect_annulus, intersect_sphere, Ray};
use crate::scene::{HitVolume, ObjectId, SceneGraph, SceneObject};

/// Cursor affordance hint for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

/// Which hit wins when several volumes lie under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickPriority {
    /// Innermost volume first (nested rings), distance breaks ties
    #[default]
    SmallestRadius,
    /// Closest hit first, radius breaks ties
    Nearest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub id: ObjectId,
    pub distance: f32,
    pub radius: f32,
}

/// Resolves the interactable object under the pointer.
/// Reports a candidate only; focus state is owned elsewhere.
#[derive(Debug, Clone)]
pub struct PointerPicker {
    priority: PickPriority,
    min_opacity: f32,
    cursor: CursorHint,
}

impl PointerPicker {
    pub fn new(config: &PickConfig) -> Self {
        Self {
            priority: config.priority,
            min_opacity: config.min_opacity,
            cursor: CursorHint::Default,
        }
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Every pickable hit along the ray, best first
    pub fn hits(&self, ray: &Ray, graph: &SceneGraph) -> Vec<PickHit> {
        let mut hits: Vec<PickHit> = graph
            .pickable()
            .filter(|object| object.live.opacity >= self.min_opacity)
            .filter_map(|object| {
                let volume = object.hit_volume?;
                let distance = intersect_volume(&volume, object, ray)?;
                Some(PickHit {
                    id: object.id.clone(),
                    distance,
                    radius: volume.enclosing_radius() * object.live.transform.uniform_scale(),
                })
            })
            .collect();

        hits.sort_by(|a, b| self.compare(a, b));
        hits
    }

    fn compare(&self, a: &PickHit, b: &PickHit) -> Ordering {
        match self.priority {
            PickPriority::SmallestRadius => a
                .radius
                .total_cmp(&b.radius)
                .then(a.distance.total_cmp(&b.distance)),
            PickPriority::Nearest => a
                .distance
                .total_cmp(&b.distance)
                .then(a.radius.total_cmp(&b.radius)),
        }
    }

    pub fn pick_ray(&self, ray: &Ray, graph: &SceneGraph) -> Option<ObjectId> {
        self.hits(ray, graph).into_iter().next().map(|hit| hit.id)
    }

    /// Pick at a pixel position
    pub fn pick(&self, pointer: Vec2, viewport: &Viewport, camera: &Camera, graph: &SceneGraph) -> Option<ObjectId> {
        let ray = camera.ray_through(viewport.to_ndc(pointer));
        self.pick_ray(&ray, graph)
    }

    /// Per-frame hover resolution. Updates the cursor hint as a side effect.
    pub fn resolve(
        &mut self,
        pointer: Option<Vec2>,
        viewport: &Viewport,
        camera: &Camera,
        graph: &SceneGraph,
    ) -> Option<ObjectId> {
        let candidate = pointer
            .filter(|p| viewport.contains(*p))
            .and_then(|p| self.pick(p, viewport, camera, graph));

        self.cursor = if candidate.is_some() {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        };
        candidate
    }
}

fn intersect_volume(volume: &HitVolume, object: &SceneObject, ray: &Ray) -> Option<f32> {
    let transform = &object.live.transform;
    let center = transform.position;
    let scale = transform.uniform_scale();

    match *volume {
        HitVolume::Sphere { radius } => intersect_sphere(ray, center, radius * scale),
        HitVolume::Ring { inner, outer } => {
            let normal = transform.quat() * Vec3::Y;
            intersect_annulus(ray, center, normal, inner * scale, outer * scale)
        }
        HitVolume::Box { half_extents } => {
            let half = half_extents * transform.scale.abs();
            intersect_aabb(ray, center - half, center + half)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{HeadlessBackend, RenderBackend};
    use crate::scene::{SemanticRecord, Shape};

    fn record() -> SemanticRecord {
        SemanticRecord::new("t", "d", "c")
    }

    fn graph(objects: Vec<SceneObject>) -> SceneGraph {
        let mut backend = HeadlessBackend::new();
        backend.init(Viewport::default()).unwrap();
        let mut graph = SceneGraph::new();
        for object in objects {
            graph.insert(object, &mut backend).unwrap();
        }
        graph
    }

    fn sphere(id: &str, at: Vec3, radius: f32) -> SceneObject {
        SceneObject::new(id, Shape::Sphere { radius })
            .at(at)
            .interactive(HitVolume::Sphere { radius }, record())
    }

    fn down_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_smallest_radius_wins_over_nearest() {
        let graph = graph(vec![
            sphere("outer", Vec3::ZERO, 3.0),
            sphere("inner", Vec3::ZERO, 1.0),
        ]);
        let picker = PointerPicker::new(&PickConfig::default());
        assert_eq!(picker.pick_ray(&down_z(), &graph), Some(ObjectId::from("inner")));
    }

    #[test]
    fn test_nearest_policy() {
        let graph = graph(vec![
            sphere("outer", Vec3::ZERO, 3.0),
            sphere("inner", Vec3::ZERO, 1.0),
        ]);
        let config = PickConfig {
            priority: PickPriority::Nearest,
            ..PickConfig::default()
        };
        let picker = PointerPicker::new(&config);
        assert_eq!(picker.pick_ray(&down_z(), &graph), Some(ObjectId::from("outer")));
    }

    #[test]
    fn test_equal_radius_prefers_closer() {
        let graph = graph(vec![
            sphere("far", Vec3::new(0.0, 0.0, -5.0), 1.0),
            sphere("near", Vec3::new(0.0, 0.0, 2.0), 1.0),
        ]);
        let picker = PointerPicker::new(&PickConfig::default());
        assert_eq!(picker.pick_ray(&down_z(), &graph), Some(ObjectId::from("near")));
    }

    #[test]
    fn test_concentric_rings_pick_band_under_ray() {
        let ring = |id: &str, inner: f32, outer: f32| {
            SceneObject::new(id, Shape::Ring { inner, outer })
                .interactive(HitVolume::Ring { inner, outer }, record())
        };
        let graph = graph(vec![ring("r1", 0.0, 1.0), ring("r2", 1.0, 2.0), ring("r3", 2.0, 3.0)]);
        let picker = PointerPicker::new(&PickConfig::default());

        let from_above = |x: f32| Ray::new(Vec3::new(x, 10.0, 0.0), Vec3::NEG_Y);
        assert_eq!(picker.pick_ray(&from_above(0.5), &graph), Some(ObjectId::from("r1")));
        assert_eq!(picker.pick_ray(&from_above(1.5), &graph), Some(ObjectId::from("r2")));
        assert_eq!(picker.pick_ray(&from_above(2.5), &graph), Some(ObjectId::from("r3")));
        assert_eq!(picker.pick_ray(&from_above(3.5), &graph), None);
    }

    #[test]
    fn test_static_and_faded_objects_ignored() {
        let mut faded = sphere("faded", Vec3::ZERO, 1.0);
        faded.live.opacity = 0.0;
        let scenery = SceneObject::new("scenery", Shape::Sphere { radius: 2.0 });
        let graph = graph(vec![faded, scenery]);

        let picker = PointerPicker::new(&PickConfig::default());
        assert!(picker.hits(&down_z(), &graph).is_empty());
    }

    #[test]
    fn test_resolve_sets_cursor() {
        let graph = graph(vec![sphere("core", Vec3::ZERO, 1.0)]);
        let viewport = Viewport::new(800, 600);
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        camera.set_viewport(viewport);
        let mut picker = PointerPicker::new(&PickConfig::default());

        let center = Vec2::new(400.0, 300.0);
        assert_eq!(
            picker.resolve(Some(center), &viewport, &camera, &graph),
            Some(ObjectId::from("core"))
        );
        assert_eq!(picker.cursor(), CursorHint::Pointer);

        assert_eq!(picker.resolve(Some(Vec2::new(5.0, 5.0)), &viewport, &camera, &graph), None);
        assert_eq!(picker.cursor(), CursorHint::Default);

        assert_eq!(picker.resolve(None, &viewport, &camera, &graph), None);
        assert_eq!(picker.cursor(), CursorHint::Default);
    }
}
