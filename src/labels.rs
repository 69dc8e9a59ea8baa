use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::camera::Camera;
use crate::config::LabelConfig;
use crate::core::Viewport;
use crate::scene::{ObjectId, SceneGraph};

/// What a label sticks to
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    Point(Vec3),
    /// Follows the object's live position, plus a world-space offset
    Object { id: ObjectId, offset: Vec3 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: String,
    pub text: String,
    pub anchor: Anchor,
    /// Zone that owns the label; zone labels go away with their zone
    pub group: Option<String>,
    /// Multiply by the anchor object's live opacity
    pub inherit_opacity: bool,
}

impl Label {
    pub fn at_point(id: impl Into<String>, text: impl Into<String>, point: Vec3) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            anchor: Anchor::Point(point),
            group: None,
            inherit_opacity: false,
        }
    }

    pub fn on_object(id: impl Into<String>, text: impl Into<String>, object: impl Into<ObjectId>, offset: Vec3) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            anchor: Anchor::Object {
                id: object.into(),
                offset,
            },
            group: None,
            inherit_opacity: true,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Screen placement of one label for the current frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub id: String,
    pub text: String,
    /// Pixels from the top-left corner of the viewport
    pub x: f32,
    pub y: f32,
    pub depth: f32,
    pub opacity: f32,
    pub visible: bool,
}

impl LabelPlacement {
    fn hidden(label: &Label) -> Self {
        Self {
            id: label.id.clone(),
            text: label.text.clone(),
            x: 0.0,
            y: 0.0,
            depth: 0.0,
            opacity: 0.0,
            visible: false,
        }
    }
}

/// Re-projects every label onto the screen each frame
#[derive(Debug, Clone)]
pub struct LabelProjector {
    labels: Vec<Label>,
    placements: Vec<LabelPlacement>,
    fade_start: f32,
    fade_end: f32,
}

impl LabelProjector {
    pub fn new(config: &LabelConfig) -> Self {
        Self {
            labels: Vec::new(),
            placements: Vec::new(),
            fade_start: config.fade_start,
            fade_end: config.fade_end.max(config.fade_start),
        }
    }

    pub fn add(&mut self, label: Label) {
        self.labels.push(label);
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Drop every label owned by a zone
    pub fn remove_group(&mut self, group: &str) -> usize {
        let before = self.labels.len();
        self.labels.retain(|label| label.group.as_deref() != Some(group));
        self.placements.retain(|p| self.labels.iter().any(|l| l.id == p.id));
        before - self.labels.len()
    }

    /// Placements computed by the last `project_all`
    pub fn placements(&self) -> &[LabelPlacement] {
        &self.placements
    }

    /// Project a world point to pixels. `None` behind the camera or outside
    /// the depth range.
    pub fn project_point(camera: &Camera, viewport: &Viewport, world: Vec3) -> Option<(Vec2, f32)> {
        let projection = camera.project(world)?;
        if !(-1.0..=1.0).contains(&projection.ndc.z) {
            return None;
        }
        Some((viewport.to_pixels(projection.ndc.truncate()), projection.depth))
    }

    /// Opacity factor for a view depth: 1 up to `fade_start`, 0 from `fade_end`
    pub fn depth_fade(&self, depth: f32) -> f32 {
        if depth <= self.fade_start {
            return 1.0;
        }
        if depth >= self.fade_end {
            return 0.0;
        }
        1.0 - (depth - self.fade_start) / (self.fade_end - self.fade_start)
    }

    /// Recompute every placement from the current camera and live object state
    pub fn project_all(&mut self, camera: &Camera, viewport: &Viewport, graph: &SceneGraph) -> &[LabelPlacement] {
        let placements = self
            .labels
            .iter()
            .map(|label| self.place(label, camera, viewport, graph))
            .collect();
        self.placements = placements;
        &self.placements
    }

    fn place(&self, label: &Label, camera: &Camera, viewport: &Viewport, graph: &SceneGraph) -> LabelPlacement {
        let (world, anchor_opacity) = match &label.anchor {
            Anchor::Point(point) => (*point, 1.0),
            Anchor::Object { id, offset } => match graph.get(id.as_str()) {
                Some(object) => (object.live.transform.position + *offset, object.live.opacity),
                None => return LabelPlacement::hidden(label),
            },
        };

        let Some((pixel, depth)) = Self::project_point(camera, viewport, world) else {
            return LabelPlacement::hidden(label);
        };

        let mut opacity = self.depth_fade(depth);
        if label.inherit_opacity {
            opacity *= anchor_opacity;
        }

        LabelPlacement {
            id: label.id.clone(),
            text: label.text.clone(),
            x: pixel.x,
            y: pixel.y,
            depth,
            opacity,
            visible: opacity > 0.0,
        }
    }
}
