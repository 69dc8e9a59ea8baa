use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorIcon, Window, WindowId},
};

use concept_stage::cli::Cli;
use concept_stage::core::{InputEvent, WinitInput};
use concept_stage::diagrams;
use concept_stage::picker::CursorHint;
use concept_stage::{FrameReport, HeadlessBackend, StageConfig, StageEvent, VisualizationSession};

type Session = VisualizationSession<HeadlessBackend>;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => StageConfig::load(path)?,
        None => StageConfig::default(),
    };

    let diagram = diagrams::build(cli.diagram);
    let session = VisualizationSession::new(diagram, config, HeadlessBackend::new())
        .with_context(|| format!("Failed to start the {} diagram", cli.diagram))?;

    if cli.windowed {
        run_windowed(session)
    } else {
        run_headless(session, &cli)
    }
}

/// Apply the host calls given on the command line
fn apply_host_calls(session: &mut Session, cli: &Cli) -> Result<()> {
    if let Some(zone) = &cli.zone {
        let outcome = session
            .switch_zone(zone)
            .with_context(|| format!("Cannot switch to zone {}", zone))?;
        info!("switch_zone({}) -> {:?}", zone, outcome);
    }
    if let Some(preset) = &cli.preset {
        session
            .set_camera_preset(preset)
            .with_context(|| format!("Cannot apply camera preset {}", preset))?;
    }
    if let Some(id) = &cli.focus {
        session
            .focus_object(id)
            .with_context(|| format!("Cannot focus object {}", id))?;
    }
    Ok(())
}

fn run_headless(mut session: Session, cli: &Cli) -> Result<()> {
    let delta = cli.frame_delta();
    println!(
        "{} - {} frames at {:.0} fps (headless)",
        session.title(),
        cli.frames,
        1.0 / delta
    );

    for frame in 0..cli.frames {
        let report = session.tick(delta)?;
        if frame == 0 {
            apply_host_calls(&mut session, cli)?;
        }
        log_events(&report);

        if !cli.quiet && frame % 60 == 0 {
            print_labels(&report);
        }
    }

    let time = session.time();
    println!(
        "Done: {} frames, {:.2}s, {} objects, zone {:?}, focus {:?}",
        time.number,
        time.time,
        session.graph().len(),
        session.current_zone(),
        session.focus_state()
    );
    Ok(())
}

fn log_events(report: &FrameReport) {
    for event in &report.events {
        match event {
            StageEvent::ZoneSwapped { from, to, controls } => {
                info!("[{:.2}s] zone {:?} -> {} (controls: {:?})", report.time.time, from, to, controls)
            }
            other => info!("[{:.2}s] {:?}", report.time.time, other),
        }
    }
}

fn print_labels(report: &FrameReport) {
    println!("t={:.2}s", report.time.time);
    for label in report.labels.iter().filter(|l| l.visible) {
        println!(
            "  {:<16} ({:7.1}, {:7.1}) depth {:5.1} opacity {:.2}",
            label.text, label.x, label.y, label.depth, label.opacity
        );
    }
}

fn run_windowed(session: Session) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(session);

    println!("Concept Stage - hover and click objects, Escape to release focus");
    event_loop.run_app(&mut app)?;

    Ok(())
}

struct App {
    window: Option<Arc<Window>>,
    session: Session,
    input: WinitInput,
    cursor: CursorHint,
    title: String,
}

impl App {
    fn new(session: Session) -> Self {
        let title = session.title().to_string();
        Self {
            window: None,
            session,
            input: WinitInput::new(),
            cursor: CursorHint::Default,
            title,
        }
    }

    /// Reflect the frame in the window: cursor affordance and subject title
    fn present(&mut self, window: &Window, report: &FrameReport) {
        if report.cursor != self.cursor {
            self.cursor = report.cursor;
            window.set_cursor(match report.cursor {
                CursorHint::Pointer => CursorIcon::Pointer,
                CursorHint::Default => CursorIcon::Default,
            });
        }

        let title = match self.session.subject_record() {
            Some(record) => format!("{} - {}", self.session.title(), record.title),
            None => self.session.title().to_string(),
        };
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let viewport = self.session.viewport();
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.session.title())
                .with_inner_size(winit::dpi::PhysicalSize::new(viewport.width, viewport.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                eprintln!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.session.push_input(InputEvent::Resized {
            width: size.width,
            height: size.height,
        });
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                let report = match self.session.tick_wall() {
                    Ok(report) => report,
                    Err(e) => {
                        error!("Frame failed: {}", e);
                        event_loop.exit();
                        return;
                    }
                };
                log_events(&report);
                if let Some(window) = self.window.clone() {
                    self.present(&window, &report);
                }
            }
            other => {
                if let Some(input) = self.input.translate(&other) {
                    self.session.push_input(input);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
