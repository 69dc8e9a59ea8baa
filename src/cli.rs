// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::diagrams::DiagramKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "concept-stage")]
#[command(about = "Interactive 3D concept diagrams", long_about = None)]
pub struct Cli {
    /// Diagram to stage
    #[arg(long, value_enum, default_value_t = DiagramKind::Light)]
    pub diagram: DiagramKind,

    /// JSON stage config; missing fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 240)]
    pub frames: u32,

    /// Fixed frame rate of the headless timeline
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Switch to this zone after the first frame
    #[arg(long)]
    pub zone: Option<String>,

    /// Focus this object after the first frame
    #[arg(long)]
    pub focus: Option<String>,

    /// Move the camera to this preset after the first frame
    #[arg(long)]
    pub preset: Option<String>,

    /// Open a window and take pointer input instead of running headless
    #[arg(long, default_value = "false")]
    pub windowed: bool,

    /// Only log events, not per-frame label placements
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Seconds per headless frame
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.fps.max(1.0)
    }
}
