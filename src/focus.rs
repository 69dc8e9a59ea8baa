use log::debug;

use crate::config::{EmphasisConfig, EmphasisLevel};
use crate::scene::{ObjectId, SceneGraph};

/// What the viewer is attending to. Focus is pinned by a click; hover is
/// transient and suppressed while something is focused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Idle,
    Hovering(ObjectId),
    Focused(ObjectId),
}

impl FocusState {
    pub fn focused(&self) -> Option<&ObjectId> {
        match self {
            FocusState::Focused(id) => Some(id),
            _ => None,
        }
    }

    pub fn hovered(&self) -> Option<&ObjectId> {
        match self {
            FocusState::Hovering(id) => Some(id),
            _ => None,
        }
    }

    /// The object currently receiving emphasis, if any
    pub fn subject(&self) -> Option<&ObjectId> {
        match self {
            FocusState::Idle => None,
            FocusState::Hovering(id) | FocusState::Focused(id) => Some(id),
        }
    }
}

/// A transition that happened, for the session to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusChange {
    Hovered { id: ObjectId, previous: Option<ObjectId> },
    Unhovered(ObjectId),
    Focused { id: ObjectId, previous: Option<ObjectId> },
    /// Focus was dismissed or its object went away
    Released(ObjectId),
}

#[derive(Debug, Clone, Default)]
pub struct FocusController {
    state: FocusState,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// Feed this frame's hover candidate. Ignored while focused.
    pub fn hover(&mut self, candidate: Option<ObjectId>) -> Option<FocusChange> {
        let change = match (&self.state, candidate) {
            (FocusState::Focused(_), _) => return None,
            (FocusState::Idle, None) => return None,
            (FocusState::Idle, Some(id)) => FocusChange::Hovered { id, previous: None },
            (FocusState::Hovering(current), None) => FocusChange::Unhovered(current.clone()),
            (FocusState::Hovering(current), Some(id)) if *current == id => return None,
            (FocusState::Hovering(current), Some(id)) => FocusChange::Hovered {
                id,
                previous: Some(current.clone()),
            },
        };

        self.state = match &change {
            FocusChange::Hovered { id, .. } => FocusState::Hovering(id.clone()),
            _ => FocusState::Idle,
        };
        debug!("hover -> {:?}", self.state);
        Some(change)
    }

    /// Pin focus on an object. Re-focusing the current object is a no-op.
    pub fn focus(&mut self, id: ObjectId) -> Option<FocusChange> {
        let previous = match &self.state {
            FocusState::Focused(current) if *current == id => return None,
            FocusState::Focused(current) => Some(current.clone()),
            _ => None,
        };

        debug!("focus -> {} (previous {:?})", id, previous);
        self.state = FocusState::Focused(id.clone());
        Some(FocusChange::Focused { id, previous })
    }

    /// Drop a pinned focus. Hover is left alone; it re-resolves next frame.
    pub fn dismiss(&mut self) -> Option<FocusChange> {
        let FocusState::Focused(id) = &self.state else {
            return None;
        };
        let id = id.clone();
        debug!("focus released: {}", id);
        self.state = FocusState::Idle;
        Some(FocusChange::Released(id))
    }

    /// Objects were removed from the scene; let go of them if referenced
    pub fn forget(&mut self, removed: &[ObjectId]) -> Option<FocusChange> {
        let subject = self.state.subject()?;
        if !removed.contains(subject) {
            return None;
        }

        let change = match &self.state {
            FocusState::Focused(id) => FocusChange::Released(id.clone()),
            FocusState::Hovering(id) => FocusChange::Unhovered(id.clone()),
            FocusState::Idle => return None,
        };
        self.state = FocusState::Idle;
        Some(change)
    }

    /// Emphasis level an object should be heading toward in the current state
    pub fn level_for(&self, id: &ObjectId, levels: &EmphasisConfig) -> EmphasisLevel {
        match self.state.subject() {
            None => levels.baseline,
            Some(subject) if subject == id => levels.raised,
            Some(_) => levels.dimmed,
        }
    }

    /// Retarget every object's emphasis in one pass, so the previous subject
    /// drops in the same frame the new one rises
    pub fn apply_emphasis(&self, graph: &mut SceneGraph, levels: &EmphasisConfig) {
        for object in graph.iter_mut() {
            let level = self.level_for(&object.id, levels);
            object.emphasis.set_target(level);
        }
    }
}
