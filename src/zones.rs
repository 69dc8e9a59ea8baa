use glam::Vec3;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fmt;
use std::mem;

use crate::config::ZoneConfig;
use crate::core::Countdown;
use crate::error::{StageError, StageResult};
use crate::labels::{Label, LabelProjector};
use crate::math::Easing;
use crate::render::RenderBackend;
use crate::scene::{ObjectId, SceneGraph, SceneObject};

/// Everything a zone contributes to the scene
#[derive(Debug, Clone, Default)]
pub struct ZoneBlueprint {
    pub objects: Vec<SceneObject>,
    pub labels: Vec<Label>,
    pub accent: [f32; 3],
    /// Host controls that only make sense while this zone is shown
    pub controls: Vec<String>,
}

/// Builds a zone's objects, given the zone id
pub type ZoneBuilder = fn(&str) -> ZoneBlueprint;

/// Zone id to builder mapping, in registration order
#[derive(Clone, Default)]
pub struct ZoneRegistry {
    entries: Vec<(String, ZoneBuilder)>,
}

impl fmt::Debug for ZoneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, builder: ZoneBuilder) -> Self {
        self.register(id, builder);
        self
    }

    /// Register a zone, replacing any builder already under that id
    pub fn register(&mut self, id: impl Into<String>, builder: ZoneBuilder) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = builder,
            None => self.entries.push((id, builder)),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn build(&self, id: &str) -> Option<ZoneBlueprint> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, builder)| builder(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    Started,
    AlreadyShowing,
    /// Another switch is still running; the request was dropped
    InProgress,
}

#[derive(Debug, Clone)]
pub enum ZonePhase {
    Idle,
    Leaving {
        from: Option<String>,
        to: String,
        /// Built and checked when the switch was accepted
        blueprint: ZoneBlueprint,
        timer: Countdown,
        axis: Vec3,
    },
    Entering {
        zone: String,
        timer: Countdown,
        axis: Vec3,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    /// Old zone disposed and new zone built, before it slides in
    Swapped {
        from: Option<String>,
        to: String,
        controls: Vec<String>,
        removed: Vec<ObjectId>,
    },
    /// New zone reached its resting position
    Settled(String),
    /// Old zone disposed but the new one could not be built
    Aborted {
        to: String,
        removed: Vec<ObjectId>,
        error: StageError,
    },
}

/// Swaps whole zone subgraphs with a slide out, dispose, build, slide in
/// sequence. Only one switch runs at a time.
#[derive(Debug, Clone)]
pub struct ZoneComposer {
    registry: ZoneRegistry,
    current: Option<String>,
    controls: Vec<String>,
    phase: ZonePhase,
    slide_distance: f32,
    slide_duration: f32,
    easing: Easing,
}

impl ZoneComposer {
    pub fn new(registry: ZoneRegistry, config: &ZoneConfig) -> Self {
        Self {
            registry,
            current: None,
            controls: Vec::new(),
            phase: ZonePhase::Idle,
            slide_distance: config.slide_distance,
            slide_duration: config.slide_duration,
            easing: config.easing,
        }
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    /// Zone whose objects are (or are about to be) in the scene
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn phase(&self) -> &ZonePhase {
        &self.phase
    }

    pub fn is_switching(&self) -> bool {
        !matches!(self.phase, ZonePhase::Idle)
    }

    pub fn controls(&self) -> &[String] {
        &self.controls
    }

    /// Build a zone in place with no transition, disposing any zone already shown
    pub fn mount(
        &mut self,
        zone: &str,
        graph: &mut SceneGraph,
        labels: &mut LabelProjector,
        backend: &mut dyn RenderBackend,
    ) -> StageResult<Vec<ObjectId>> {
        let blueprint = self.blueprint(zone)?;
        self.check(&blueprint, graph)?;
        let removed = self.dispose_current(graph, labels, backend);
        self.phase = ZonePhase::Idle;
        self.install(zone, blueprint, Vec3::ZERO, graph, labels, backend)?;
        info!("Mounted zone {}", zone);
        Ok(removed)
    }

    /// Request a switch. `axis` is the world direction the outgoing zone
    /// slides toward; the incoming zone arrives from the opposite side.
    ///
    /// The new zone is built here, so a zone that cannot join the scene is
    /// rejected before anything moves.
    pub fn switch_to(&mut self, zone: &str, axis: Vec3, graph: &mut SceneGraph) -> StageResult<SwitchOutcome> {
        if !self.registry.contains(zone) {
            warn!("Rejected switch to unknown zone: {}", zone);
            return Err(StageError::UnknownZone(zone.to_string()));
        }
        if self.is_switching() {
            debug!("Zone switch to {} ignored, switch in progress", zone);
            return Ok(SwitchOutcome::InProgress);
        }
        if self.current.as_deref() == Some(zone) {
            return Ok(SwitchOutcome::AlreadyShowing);
        }
        let blueprint = self.blueprint(zone)?;
        self.check(&blueprint, graph)?;

        let axis = axis.try_normalize().unwrap_or(Vec3::X);
        // Nothing to slide out when no zone is shown yet
        let duration = if self.current.is_some() { self.slide_duration } else { 0.0 };
        if let Some(from) = &self.current {
            graph.group_mut(from).departing = true;
        }

        info!("Zone switch {:?} -> {}", self.current, zone);
        self.phase = ZonePhase::Leaving {
            from: self.current.clone(),
            to: zone.to_string(),
            blueprint,
            timer: Countdown::started(duration),
            axis,
        };
        Ok(SwitchOutcome::Started)
    }

    /// Advance the running switch. Call once per tick before animation.
    pub fn step(
        &mut self,
        delta: f32,
        graph: &mut SceneGraph,
        labels: &mut LabelProjector,
        backend: &mut dyn RenderBackend,
    ) -> Option<ZoneEvent> {
        match &mut self.phase {
            ZonePhase::Idle => None,
            ZonePhase::Leaving { from, timer, axis, .. } => {
                let done = timer.tick(delta);
                let eased = self.easing.apply(timer.progress());
                if let Some(from) = from.as_deref() {
                    graph.group_mut(from).offset = -*axis * self.slide_distance * eased;
                }
                if !done {
                    return None;
                }

                match mem::replace(&mut self.phase, ZonePhase::Idle) {
                    ZonePhase::Leaving { from, to, blueprint, axis, .. } => {
                        Some(self.swap(from, to, blueprint, axis, graph, labels, backend))
                    }
                    _ => None,
                }
            }
            ZonePhase::Entering { zone, timer, axis } => {
                let done = timer.tick(delta);
                let eased = self.easing.apply(timer.progress());
                graph.group_mut(zone).offset = *axis * self.slide_distance * (1.0 - eased);
                if !done {
                    return None;
                }

                graph.group_mut(zone).offset = Vec3::ZERO;
                let zone = zone.clone();
                debug!("Zone {} settled", zone);
                self.phase = ZonePhase::Idle;
                Some(ZoneEvent::Settled(zone))
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn swap(
        &mut self,
        from: Option<String>,
        to: String,
        blueprint: ZoneBlueprint,
        axis: Vec3,
        graph: &mut SceneGraph,
        labels: &mut LabelProjector,
        backend: &mut dyn RenderBackend,
    ) -> ZoneEvent {
        let removed = self.dispose_current(graph, labels, backend);

        // Ids were checked on accept, so only the backend can refuse here
        let offset = axis * self.slide_distance;
        if let Err(error) = self.install(&to, blueprint, offset, graph, labels, backend) {
            warn!("Zone {} could not be built: {}", to, error);
            return ZoneEvent::Aborted { to, removed, error };
        }

        self.phase = ZonePhase::Entering {
            zone: to.clone(),
            timer: Countdown::started(self.slide_duration),
            axis,
        };
        debug!("Zone {} built, {} objects disposed", to, removed.len());
        ZoneEvent::Swapped {
            from,
            to,
            controls: self.controls.clone(),
            removed,
        }
    }

    fn blueprint(&self, zone: &str) -> StageResult<ZoneBlueprint> {
        self.registry.build(zone).ok_or_else(|| {
            warn!("Rejected unknown zone: {}", zone);
            StageError::UnknownZone(zone.to_string())
        })
    }

    /// Reject a blueprint whose ids repeat or collide with objects that
    /// will still be in the scene once the current zone is gone
    fn check(&self, blueprint: &ZoneBlueprint, graph: &SceneGraph) -> StageResult<()> {
        let mut seen = HashSet::new();
        for object in &blueprint.objects {
            let id = object.id.as_str();
            let taken = graph
                .get(id)
                .is_some_and(|existing| Some(existing.group.as_str()) != self.current.as_deref());
            if !seen.insert(id) || taken {
                warn!("Rejected zone blueprint, duplicate object id: {}", id);
                return Err(StageError::DuplicateObject(id.to_string()));
            }
        }
        Ok(())
    }

    fn dispose_current(
        &mut self,
        graph: &mut SceneGraph,
        labels: &mut LabelProjector,
        backend: &mut dyn RenderBackend,
    ) -> Vec<ObjectId> {
        let Some(current) = self.current.take() else {
            return Vec::new();
        };
        labels.remove_group(&current);
        self.controls.clear();
        graph.remove_group(&current, backend)
    }

    /// Insert a zone's objects under its own group. A failed insert rolls the
    /// zone back out so no partial zone stays in the scene.
    fn install(
        &mut self,
        zone: &str,
        blueprint: ZoneBlueprint,
        offset: Vec3,
        graph: &mut SceneGraph,
        labels: &mut LabelProjector,
        backend: &mut dyn RenderBackend,
    ) -> StageResult<()> {
        for object in blueprint.objects {
            if let Err(err) = graph.insert(object.in_group(zone), backend) {
                graph.remove_group(zone, backend);
                return Err(err);
            }
        }

        let group = graph.group_mut(zone);
        group.offset = offset;
        group.departing = false;
        group.accent = Some(blueprint.accent);

        for label in blueprint.labels {
            labels.add(label.in_group(zone));
        }
        self.current = Some(zone.to_string());
        self.controls = blueprint.controls;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelConfig;
    use crate::core::Viewport;
    use crate::render::{CameraUniform, HeadlessBackend, InstanceData, MeshHandle};
    use crate::scene::{HitVolume, Material, SemanticRecord, Shape};

    fn zone_a(_: &str) -> ZoneBlueprint {
        ZoneBlueprint {
            objects: vec![SceneObject::new("x", Shape::Sphere { radius: 1.0 })
                .interactive(HitVolume::Sphere { radius: 1.0 }, SemanticRecord::new("X", "", ""))],
            labels: vec![Label::on_object("x-label", "X", "x", Vec3::Y)],
            accent: [1.0, 0.0, 0.0],
            controls: vec!["toggle-a".into()],
        }
    }

    fn zone_b(_: &str) -> ZoneBlueprint {
        ZoneBlueprint {
            objects: vec![
                SceneObject::new("y", Shape::Box { size: Vec3::ONE }).at(Vec3::new(1.0, 0.0, 0.0)),
                SceneObject::new("z", Shape::Box { size: Vec3::ONE }).at(Vec3::new(-1.0, 0.0, 0.0)),
            ],
            labels: Vec::new(),
            accent: [0.0, 0.0, 1.0],
            controls: Vec::new(),
        }
    }

    fn clashing(_: &str) -> ZoneBlueprint {
        ZoneBlueprint {
            objects: vec![
                SceneObject::new("dup", Shape::Sphere { radius: 1.0 }),
                SceneObject::new("dup", Shape::Sphere { radius: 1.0 }),
            ],
            ..ZoneBlueprint::default()
        }
    }

    struct Rig {
        composer: ZoneComposer,
        graph: SceneGraph,
        labels: LabelProjector,
        backend: HeadlessBackend,
    }

    impl Rig {
        fn new() -> Self {
            let registry = ZoneRegistry::new().with("a", zone_a).with("b", zone_b).with("bad", clashing);
            let config = ZoneConfig {
                slide_duration: 0.5,
                ..ZoneConfig::default()
            };
            let mut rig = Self {
                composer: ZoneComposer::new(registry, &config),
                graph: SceneGraph::new(),
                labels: LabelProjector::new(&LabelConfig::default()),
                backend: HeadlessBackend::new(),
            };
            rig.backend.init(Viewport::default()).unwrap();
            rig.composer
                .mount("a", &mut rig.graph, &mut rig.labels, &mut rig.backend)
                .unwrap();
            rig
        }

        fn step(&mut self, delta: f32) -> Option<ZoneEvent> {
            self.composer
                .step(delta, &mut self.graph, &mut self.labels, &mut self.backend)
        }
    }

    #[test]
    fn test_mount_builds_zone() {
        let rig = Rig::new();
        assert_eq!(rig.composer.current(), Some("a"));
        assert_eq!(rig.graph.get("x").unwrap().group, "a");
        assert_eq!(rig.labels.labels()[0].group.as_deref(), Some("a"));
        assert_eq!(rig.composer.controls(), ["toggle-a".to_string()]);
        assert_eq!(rig.graph.group("a").unwrap().accent, Some([1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_switch_sequence() {
        let mut rig = Rig::new();
        let outcome = rig.composer.switch_to("b", Vec3::X, &mut rig.graph).unwrap();
        assert_eq!(outcome, SwitchOutcome::Started);
        assert!(rig.graph.group("a").unwrap().departing);

        assert_eq!(rig.step(0.25), None);
        assert!(rig.graph.group("a").unwrap().offset.x < 0.0);
        assert!(rig.graph.contains("x"));

        match rig.step(0.3) {
            Some(ZoneEvent::Swapped { from, to, controls, removed }) => {
                assert_eq!(from.as_deref(), Some("a"));
                assert_eq!(to, "b");
                assert!(controls.is_empty());
                assert_eq!(removed, vec![ObjectId::from("x")]);
            }
            other => panic!("expected swap, got {:?}", other),
        }
        assert!(!rig.graph.contains("x"));
        assert!(rig.labels.is_empty());
        assert_eq!(rig.graph.group("b").unwrap().offset, Vec3::new(30.0, 0.0, 0.0));

        assert_eq!(rig.step(0.5), Some(ZoneEvent::Settled("b".into())));
        assert_eq!(rig.graph.group("b").unwrap().offset, Vec3::ZERO);
        assert!(!rig.composer.is_switching());
        assert_eq!(rig.backend.mesh_count(), 2);
    }

    #[test]
    fn test_guard_drops_overlapping_requests() {
        let mut rig = Rig::new();
        rig.composer.switch_to("b", Vec3::X, &mut rig.graph).unwrap();
        assert_eq!(
            rig.composer.switch_to("b", Vec3::X, &mut rig.graph).unwrap(),
            SwitchOutcome::InProgress
        );
        assert_eq!(
            rig.composer.switch_to("a", Vec3::X, &mut rig.graph).unwrap(),
            SwitchOutcome::InProgress
        );
        rig.step(0.6);
        rig.step(0.6);
        assert_eq!(
            rig.composer.switch_to("b", Vec3::X, &mut rig.graph).unwrap(),
            SwitchOutcome::AlreadyShowing
        );
        assert_eq!(rig.graph.len(), 2);
    }

    #[test]
    fn test_unknown_zone_leaves_state() {
        let mut rig = Rig::new();
        let err = rig.composer.switch_to("walled", Vec3::X, &mut rig.graph).unwrap_err();
        assert_eq!(err, StageError::UnknownZone("walled".into()));
        assert!(!rig.composer.is_switching());
        assert!(!rig.graph.group("a").unwrap().departing);
    }

    #[test]
    fn test_clashing_zone_rejected_before_leaving() {
        let mut rig = Rig::new();
        let err = rig.composer.switch_to("bad", Vec3::X, &mut rig.graph).unwrap_err();
        assert_eq!(err, StageError::DuplicateObject("dup".into()));

        assert!(!rig.composer.is_switching());
        assert_eq!(rig.composer.current(), Some("a"));
        assert!(rig.graph.contains("x"));
        assert!(!rig.graph.group("a").unwrap().departing);
        assert_eq!(rig.step(1.0), None);
        assert_eq!(rig.backend.mesh_count(), 1);
    }

    #[test]
    fn test_zone_colliding_with_figure_rejected() {
        let mut rig = Rig::new();
        rig.graph
            .insert(SceneObject::new("y", Shape::Sphere { radius: 1.0 }), &mut rig.backend)
            .unwrap();

        let err = rig.composer.switch_to("b", Vec3::X, &mut rig.graph).unwrap_err();
        assert_eq!(err, StageError::DuplicateObject("y".into()));
        assert_eq!(rig.composer.current(), Some("a"));
    }

    #[test]
    fn test_remount_may_reuse_outgoing_ids() {
        let mut rig = Rig::new();
        let removed = rig
            .composer
            .mount("a", &mut rig.graph, &mut rig.labels, &mut rig.backend)
            .unwrap();
        assert_eq!(removed, vec![ObjectId::from("x")]);
        assert!(rig.graph.contains("x"));
        assert_eq!(rig.labels.len(), 1);
    }

    /// Backend that stops handing out meshes after a fixed budget
    struct Exhausted {
        inner: HeadlessBackend,
        budget: usize,
    }

    impl RenderBackend for Exhausted {
        fn init(&mut self, viewport: Viewport) -> StageResult<()> {
            self.inner.init(viewport)
        }

        fn create_mesh(&mut self, shape: &Shape, material: &Material) -> StageResult<MeshHandle> {
            if self.budget == 0 {
                return Err(StageError::BackendUnavailable("out of meshes".into()));
            }
            self.budget -= 1;
            self.inner.create_mesh(shape, material)
        }

        fn remove_mesh(&mut self, mesh: MeshHandle) {
            self.inner.remove_mesh(mesh)
        }

        fn render_frame(&mut self, camera: &CameraUniform, instances: &[InstanceData]) -> StageResult<()> {
            self.inner.render_frame(camera, instances)
        }
    }

    #[test]
    fn test_backend_refusal_reports_disposed_ids() {
        let registry = ZoneRegistry::new().with("a", zone_a).with("b", zone_b);
        let mut composer = ZoneComposer::new(registry, &ZoneConfig::default());
        let mut graph = SceneGraph::new();
        let mut labels = LabelProjector::new(&LabelConfig::default());
        let mut backend = Exhausted {
            inner: HeadlessBackend::new(),
            budget: 2,
        };
        backend.init(Viewport::default()).unwrap();
        composer.mount("a", &mut graph, &mut labels, &mut backend).unwrap();

        composer.switch_to("b", Vec3::X, &mut graph).unwrap();
        let mut event = None;
        for _ in 0..200 {
            event = composer.step(0.1, &mut graph, &mut labels, &mut backend);
            if event.is_some() {
                break;
            }
        }

        match event {
            Some(ZoneEvent::Aborted { to, removed, error }) => {
                assert_eq!(to, "b");
                assert_eq!(removed, vec![ObjectId::from("x")]);
                assert!(matches!(error, StageError::BackendUnavailable(_)));
            }
            other => panic!("expected abort, got {:?}", other),
        }
        assert!(graph.is_empty());
        assert_eq!(backend.inner.mesh_count(), 0);
        assert!(!composer.is_switching());
    }
}
