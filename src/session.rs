use glam::Vec2;
use log::{debug, error, info, warn};
use std::mem;

use crate::animator::ProceduralAnimator;
use crate::camera::Camera;
use crate::config::StageConfig;
use crate::core::{Clock, FrameTime, InputEvent, InputQueue, Intent, PointerUpdate, Viewport};
use crate::diagrams::Diagram;
use crate::director::CameraDirector;
use crate::error::{StageError, StageResult};
use crate::focus::{FocusChange, FocusController, FocusState};
use crate::labels::{LabelPlacement, LabelProjector};
use crate::picker::{CursorHint, PointerPicker};
use crate::render::RenderBackend;
use crate::scene::{ObjectId, SceneGraph, SceneObject, SemanticRecord};
use crate::zones::{SwitchOutcome, ZoneComposer, ZoneEvent};

/// Something the host may want to react to, emitted during a tick or by a
/// host call since the previous tick
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    FocusChanged(FocusChange),
    CameraArrived,
    /// Old zone disposed, new zone built. `controls` are the host controls
    /// to show from now on.
    ZoneSwapped {
        from: Option<String>,
        to: String,
        controls: Vec<String>,
    },
    ZoneSettled(String),
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub time: FrameTime,
    pub labels: Vec<LabelPlacement>,
    pub cursor: CursorHint,
    pub focus: FocusState,
    pub events: Vec<StageEvent>,
}

/// One running visualization: owns the scene and every component that
/// drives it. Built on scene init, dropped on teardown.
pub struct VisualizationSession<B: RenderBackend> {
    config: StageConfig,
    title: String,
    clock: Clock,
    viewport: Viewport,
    camera: Camera,
    graph: SceneGraph,
    animator: ProceduralAnimator,
    picker: PointerPicker,
    focus: FocusController,
    director: CameraDirector,
    labels: LabelProjector,
    zones: Option<ZoneComposer>,
    input: InputQueue,
    pointer: Option<Vec2>,
    pending: Vec<StageEvent>,
    backend: B,
}

impl<B: RenderBackend> VisualizationSession<B> {
    /// Initialise the backend and build the diagram. Nothing is returned if
    /// the backend cannot start.
    pub fn new(diagram: Diagram, config: StageConfig, mut backend: B) -> StageResult<Self> {
        let viewport = config.viewport;
        backend.init(viewport).map_err(|err| {
            error!("Render backend failed to initialise: {}", err);
            match err {
                StageError::BackendUnavailable(_) => err,
                other => StageError::BackendUnavailable(other.to_string()),
            }
        })?;

        let mut graph = SceneGraph::new();
        for object in diagram.objects {
            graph.insert(object, &mut backend)?;
        }

        let mut labels = LabelProjector::new(&config.labels);
        for label in diagram.labels {
            labels.add(label);
        }

        let mut camera = Camera::from_config(&config.camera, viewport);
        let mut director = CameraDirector::new(diagram.presets);
        director.snap_to_preset(&mut camera, &diagram.initial_preset)?;

        let zones = match diagram.zones {
            Some(setup) => {
                let mut composer = ZoneComposer::new(setup.registry, &config.zones);
                composer.mount(&setup.initial, &mut graph, &mut labels, &mut backend)?;
                Some(composer)
            }
            None => None,
        };

        info!(
            "Session ready: {} ({} objects, {} labels)",
            diagram.title,
            graph.len(),
            labels.len()
        );

        let mut session = Self {
            clock: Clock::new(config.clock.max_delta),
            animator: ProceduralAnimator::new(config.emphasis.rate),
            picker: PointerPicker::new(&config.picking),
            title: diagram.title,
            viewport,
            camera,
            graph,
            focus: FocusController::new(),
            director,
            labels,
            zones,
            input: InputQueue::new(),
            pointer: None,
            pending: Vec::new(),
            backend,
            config,
        };
        session.focus.apply_emphasis(&mut session.graph, &session.config.emphasis);
        for object in session.graph.iter_mut() {
            object.emphasis.scale.settle();
            object.emphasis.opacity.settle();
            object.emphasis.intensity.settle();
        }
        session.animator.animate(&mut session.graph, 0.0);
        session
            .labels
            .project_all(&session.camera, &session.viewport, &session.graph);
        Ok(session)
    }

    /// Advance by a synthetic delta, used as given, and run one frame
    pub fn tick(&mut self, delta: f32) -> StageResult<FrameReport> {
        let time = self.clock.advance(delta);
        self.run_frame(time)
    }

    /// Advance by measured wall time, clamped to the configured maximum, and run one frame
    pub fn tick_wall(&mut self) -> StageResult<FrameReport> {
        let time = self.clock.tick();
        self.run_frame(time)
    }

    fn run_frame(&mut self, time: FrameTime) -> StageResult<FrameReport> {
        let snapshot = self.input.drain();

        if let Some((width, height)) = snapshot.resize {
            self.resize(Viewport::new(width, height));
        }
        match snapshot.pointer {
            PointerUpdate::Unchanged => {}
            PointerUpdate::Moved(at) => self.pointer = Some(at),
            PointerUpdate::Left => self.pointer = None,
        }

        self.step_zones(time.delta)?;
        self.animator.animate(&mut self.graph, time.time);

        for intent in snapshot.intents {
            match intent {
                Intent::Click(at) => self.click(at),
                Intent::Dismiss => self.release_focus(),
            }
        }

        let candidate = self
            .picker
            .resolve(self.pointer, &self.viewport, &self.camera, &self.graph);
        if let Some(change) = self.focus.hover(candidate) {
            self.on_focus_change(change);
        }
        self.focus.apply_emphasis(&mut self.graph, &self.config.emphasis);

        if self.director.step(&mut self.camera, time.delta) {
            debug!("Camera arrived at {:?}", self.camera.position);
            self.pending.push(StageEvent::CameraArrived);
        }

        let labels = self
            .labels
            .project_all(&self.camera, &self.viewport, &self.graph)
            .to_vec();
        self.backend
            .render_frame(&self.camera.to_uniform(), &self.graph.instances())?;

        Ok(FrameReport {
            time,
            labels,
            cursor: self.picker.cursor(),
            focus: self.focus.state().clone(),
            events: mem::take(&mut self.pending),
        })
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
        self.backend.resize(viewport);
    }

    fn step_zones(&mut self, delta: f32) -> StageResult<()> {
        let Some(composer) = self.zones.as_mut() else {
            return Ok(());
        };

        match composer.step(delta, &mut self.graph, &mut self.labels, &mut self.backend) {
            None => {}
            Some(ZoneEvent::Swapped { from, to, controls, removed }) => {
                self.forget(&removed);
                self.pending.push(StageEvent::ZoneSwapped { from, to, controls });
            }
            Some(ZoneEvent::Settled(zone)) => self.pending.push(StageEvent::ZoneSettled(zone)),
            Some(ZoneEvent::Aborted { to, removed, error }) => {
                // Ids were checked when the switch was accepted, so this is a resource failure
                error!("Zone {} could not be built: {}", to, error);
                self.forget(&removed);
                return Err(error);
            }
        }
        Ok(())
    }

    /// A focus or hover on a disposed object simply ends
    fn forget(&mut self, removed: &[ObjectId]) {
        if let Some(change) = self.focus.forget(removed) {
            self.on_focus_change(change);
        }
    }

    /// A click on an interactable focuses it; a click on nothing dismisses
    fn click(&mut self, at: Vec2) {
        if !self.viewport.contains(at) {
            return;
        }
        match self.picker.pick(at, &self.viewport, &self.camera, &self.graph) {
            Some(id) => {
                if let Some(change) = self.focus.focus(id) {
                    self.on_focus_change(change);
                }
            }
            None => self.release_focus(),
        }
    }

    fn release_focus(&mut self) {
        if let Some(change) = self.focus.dismiss() {
            self.on_focus_change(change);
        }
    }

    fn on_focus_change(&mut self, change: FocusChange) {
        match &change {
            FocusChange::Focused { id, .. } => {
                if let Some(object) = self.graph.get(id.as_str()) {
                    let target = object.live.transform.position;
                    self.director.focus_on(&self.camera, target, &self.config.focus);
                }
            }
            FocusChange::Released(_) => {
                self.director.return_to_rest(&self.camera);
            }
            FocusChange::Hovered { .. } | FocusChange::Unhovered(_) => {}
        }
        self.pending.push(StageEvent::FocusChanged(change));
    }

    /// Start switching to another zone. Idempotent for the current zone and
    /// ignored while a switch is running.
    pub fn switch_zone(&mut self, zone: &str) -> StageResult<SwitchOutcome> {
        let Some(composer) = self.zones.as_mut() else {
            warn!("Rejected switch to zone {}: diagram has no zones", zone);
            return Err(StageError::UnknownZone(zone.to_string()));
        };
        // Slide along the screen's horizontal axis
        composer.switch_to(zone, self.camera.right(), &mut self.graph)
    }

    /// Pin focus on an object. Returns `Ok(false)` if it was already focused
    /// or its zone is on its way out.
    pub fn focus_object(&mut self, id: &str) -> StageResult<bool> {
        let Some(object) = self.graph.get(id) else {
            warn!("Rejected focus on unknown object: {}", id);
            return Err(StageError::UnknownObject(id.to_string()));
        };
        if !object.is_pickable() {
            warn!("Rejected focus on non-interactable object: {}", id);
            return Err(StageError::NotInteractable(id.to_string()));
        }
        let departing = self
            .graph
            .group(&object.group)
            .is_some_and(|group| group.departing);
        if departing {
            return Ok(false);
        }

        match self.focus.focus(ObjectId::from(id)) {
            Some(change) => {
                self.on_focus_change(change);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns false if nothing was focused
    pub fn clear_focus(&mut self) -> bool {
        match self.focus.dismiss() {
            Some(change) => {
                self.on_focus_change(change);
                true
            }
            None => false,
        }
    }

    /// Move the camera to a named preset. A pinned focus is released first,
    /// since the camera can only serve one of them.
    pub fn set_camera_preset(&mut self, name: &str) -> StageResult<bool> {
        if self.director.preset(name).is_none() {
            warn!("Rejected unknown camera preset: {}", name);
            return Err(StageError::UnknownPreset(name.to_string()));
        }
        if let Some(change) = self.focus.dismiss() {
            self.pending.push(StageEvent::FocusChanged(change));
        }
        self.director.apply_preset(&self.camera, name)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn input(&mut self) -> &mut InputQueue {
        &mut self.input
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn time(&self) -> FrameTime {
        self.clock.now()
    }

    pub fn focus_state(&self) -> &FocusState {
        self.focus.state()
    }

    /// Record of whatever is hovered or focused
    pub fn subject_record(&self) -> Option<&SemanticRecord> {
        let id = self.focus.state().subject()?;
        self.graph.get(id.as_str())?.semantic.as_ref()
    }

    pub fn current_zone(&self) -> Option<&str> {
        self.zones.as_ref().and_then(ZoneComposer::current)
    }

    pub fn is_switching_zone(&self) -> bool {
        self.zones.as_ref().is_some_and(ZoneComposer::is_switching)
    }

    pub fn visible_controls(&self) -> &[String] {
        self.zones.as_ref().map(ZoneComposer::controls).unwrap_or(&[])
    }

    pub fn zone_ids(&self) -> Vec<String> {
        self.zones
            .as_ref()
            .map(|composer| composer.registry().ids().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.graph.get(id)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn director(&self) -> &CameraDirector {
        &self.director
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Placements from the last projection
    pub fn labels(&self) -> &[LabelPlacement] {
        self.labels.placements()
    }

    pub fn cursor(&self) -> CursorHint {
        self.picker.cursor()
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: RenderBackend> Drop for VisualizationSession<B> {
    fn drop(&mut self) {
        self.graph.clear(&mut self.backend);
    }
}
