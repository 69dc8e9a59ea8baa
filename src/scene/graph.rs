use glam::Vec3;
use std::collections::HashMap;

use super::object::{ObjectId, SceneObject};
use crate::error::{StageError, StageResult};
use crate::render::{InstanceData, RenderBackend};

/// Group owning a diagram's permanent objects
pub const FIGURE_GROUP: &str = "figure";

/// Zone-level or figure-level parameters shared by a group's objects
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Group {
    /// Root offset added to every member's position
    pub offset: Vec3,
    /// Set while a zone slides out; departing objects are never picked
    pub departing: bool,
    pub accent: Option<[f32; 3]>,
}

/// Owns every scene object, keyed by id and grouped by zone or figure.
/// Objects are never shared between groups.
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: Vec<SceneObject>,
    index: HashMap<ObjectId, usize>,
    groups: HashMap<String, Group>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and create its mesh
    pub fn insert(&mut self, mut object: SceneObject, backend: &mut dyn RenderBackend) -> StageResult<()> {
        if self.index.contains_key(&object.id) {
            return Err(StageError::DuplicateObject(object.id.to_string()));
        }

        let mesh = backend.create_mesh(&object.shape, &object.material)?;
        object.mesh = Some(mesh);

        self.groups.entry(object.group.clone()).or_default();
        self.index.insert(object.id.clone(), self.objects.len());
        self.objects.push(object);
        Ok(())
    }

    /// Dispose every object of a group (meshes included) and forget the group.
    /// Returns the removed ids.
    pub fn remove_group(&mut self, group: &str, backend: &mut dyn RenderBackend) -> Vec<ObjectId> {
        let mut removed = Vec::new();
        self.objects.retain(|object| {
            if object.group != group {
                return true;
            }
            if let Some(mesh) = object.mesh {
                backend.remove_mesh(mesh);
            }
            removed.push(object.id.clone());
            false
        });
        self.groups.remove(group);
        self.reindex();
        removed
    }

    /// Dispose everything
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        for object in self.objects.drain(..) {
            if let Some(mesh) = object.mesh {
                backend.remove_mesh(mesh);
            }
        }
        self.index.clear();
        self.groups.clear();
    }

    fn reindex(&mut self) {
        self.index = self
            .objects
            .iter()
            .enumerate()
            .map(|(i, object)| (object.id.clone(), i))
            .collect();
    }

    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.index.get(id).map(|&i| &self.objects[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.index.get(id).map(|&i| &mut self.objects[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    pub fn in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a SceneObject> + 'a {
        self.objects.iter().filter(move |object| object.group == group)
    }

    /// Visit every object together with its group's root offset
    pub fn for_each_with_offset(&mut self, mut f: impl FnMut(&mut SceneObject, Vec3)) {
        let groups = &self.groups;
        for object in &mut self.objects {
            let offset = groups.get(&object.group).map(|g| g.offset).unwrap_or(Vec3::ZERO);
            f(object, offset);
        }
    }

    /// Objects the pointer may hit: interactable and not in a departing group
    pub fn pickable(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|object| {
            object.is_pickable()
                && !self
                    .groups
                    .get(&object.group)
                    .map(|g| g.departing)
                    .unwrap_or(false)
        })
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Get or create a group
    pub fn group_mut(&mut self, name: &str) -> &mut Group {
        self.groups.entry(name.to_string()).or_default()
    }

    /// Pack the frame's instance list for the render backend
    pub fn instances(&self) -> Vec<InstanceData> {
        self.objects.iter().filter_map(InstanceData::from_object).collect()
    }
}
