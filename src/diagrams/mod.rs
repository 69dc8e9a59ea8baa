pub mod common;
mod friction;
mod ladder;
mod light;
mod pace;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::director::CameraPreset;
use crate::labels::Label;
use crate::scene::SceneObject;
use crate::zones::ZoneRegistry;

pub use friction::FRICTION_ZONES;

/// The diagrams shipped with the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    /// Observable light: a source, nested observable rings, orbiting particles
    Light,
    /// Pace layers: stacked discs turning slower toward the bottom
    Pace,
    /// Abstraction ladder: rungs from concrete to abstract
    Ladder,
    /// Friction zones: open, gated and walled zones swapped in place
    Friction,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 4] = [
        DiagramKind::Light,
        DiagramKind::Pace,
        DiagramKind::Ladder,
        DiagramKind::Friction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DiagramKind::Light => "light",
            DiagramKind::Pace => "pace",
            DiagramKind::Ladder => "ladder",
            DiagramKind::Friction => "friction",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zones a diagram can swap between, and the one shown first
#[derive(Debug, Clone)]
pub struct ZoneSetup {
    pub registry: ZoneRegistry,
    pub initial: String,
}

/// Everything needed to start a session for one diagram
#[derive(Debug, Clone)]
pub struct Diagram {
    pub kind: DiagramKind,
    pub title: String,
    /// Permanent objects, outside any zone
    pub objects: Vec<SceneObject>,
    pub labels: Vec<Label>,
    pub presets: Vec<CameraPreset>,
    pub initial_preset: String,
    pub zones: Option<ZoneSetup>,
}

pub fn build(kind: DiagramKind) -> Diagram {
    match kind {
        DiagramKind::Light => light::build(),
        DiagramKind::Pace => pace::build(),
        DiagramKind::Ladder => ladder::build(),
        DiagramKind::Friction => friction::build(),
    }
}
