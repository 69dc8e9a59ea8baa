pub mod animator;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod diagrams;
pub mod director;
pub mod error;
pub mod focus;
pub mod labels;
pub mod math;
pub mod picker;
pub mod render;
pub mod scene;
pub mod session;
pub mod zones;

pub use config::StageConfig;
pub use error::{StageError, StageResult};
pub use render::{HeadlessBackend, RenderBackend};
pub use session::{FrameReport, StageEvent, VisualizationSession};
