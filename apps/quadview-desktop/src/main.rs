mod platform;
mod startup;

use anyhow::{Context, Result};
use clap::Parser;
use platform::{WinitPlatform, map_key};
use quadview_common::{BackendChoice, ViewerConfig};
use quadview_input::InputEvent;
use quadview_kernel::{AppState, Clock, FrameLoop, Platform, SystemClock, help_text};
use quadview_render_wgpu::SimpleScene;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "quadview-desktop", about = "Quadview OpenGL viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Graphics backend: gl, primary or all
    #[arg(long)]
    backend: Option<BackendChoice>,

    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,
}

impl Cli {
    fn load_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(title) = &self.title {
            config.window.title = title.clone();
        }
        if let Some(backend) = self.backend {
            config.renderer.backend = backend;
        }
        if self.no_vsync {
            config.window.vsync = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Everything that exists once the window and GPU are up.
///
/// Field order matters for teardown: the scene and its GPU resources are
/// dropped before the window they render into.
struct Viewer {
    state: AppState<SimpleScene>,
    platform: WinitPlatform,
    frame_loop: FrameLoop,
    clock: SystemClock,
    /// Accumulated raw mouse motion, fed to the router as a cursor position.
    cursor: (f64, f64),
    window: Arc<Window>,
}

impl Viewer {
    fn start(event_loop: &ActiveEventLoop, config: &ViewerConfig) -> Result<Self> {
        let window = startup::create_window(event_loop, config)?;
        let scene = startup::create_scene(window.clone(), config)?;
        let state = AppState::bootstrap(scene, config)?;

        let mut platform = WinitPlatform::new(window.clone());
        platform.set_cursor_mode(state.cursor_mode());

        let clock = SystemClock::new();
        let frame_loop = FrameLoop::new(config.window.title.clone(), &config.timing, clock.now());

        Ok(Self {
            state,
            platform,
            frame_loop,
            clock,
            cursor: (0.0, 0.0),
            window,
        })
    }

    fn push(&mut self, event: InputEvent) {
        if self.state.queue.push(event).is_ok() {
            return;
        }
        match event {
            InputEvent::CloseRequested => self.state.request_close(),
            InputEvent::FocusLost => self.state.router.release_all(),
            _ => {}
        }
    }
}

struct GpuApp {
    config: ViewerConfig,
    viewer: Option<Viewer>,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            viewer: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }
        match Viewer::start(event_loop, &self.config) {
            Ok(viewer) => {
                println!("{}", help_text(&self.config.input.bindings));
                self.viewer = Some(viewer);
            }
            Err(e) => self.fail(event_loop, e.context("startup failed")),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => viewer.push(InputEvent::CloseRequested),
            WindowEvent::Focused(false) => viewer.push(InputEvent::FocusLost),
            WindowEvent::Resized(size) => {
                // Minimized windows report a zero size
                if size.width > 0 && size.height > 0 {
                    viewer.push(InputEvent::Resized {
                        width: size.width,
                        height: size.height,
                    });
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let Some(code) = map_key(event.physical_key) {
                    viewer.push(InputEvent::Key {
                        code,
                        pressed: event.state == ElementState::Pressed,
                    });
                }
            }
            WindowEvent::RedrawRequested => {
                let result = viewer.frame_loop.run_frame(
                    &mut viewer.state,
                    &mut viewer.platform,
                    &viewer.clock,
                );
                match result {
                    Ok(report) if !report.running => {
                        tracing::info!(frames = report.frame_index + 1, "viewer closing");
                        event_loop.exit();
                    }
                    Ok(_) => {}
                    Err(e) => self.fail(event_loop, anyhow::Error::new(e).context("frame failed")),
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta } = event {
            viewer.cursor.0 += delta.0;
            viewer.cursor.1 += delta.1;
            let (x, y) = viewer.cursor;
            viewer.push(InputEvent::CursorMoved { x, y });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &self.viewer {
            viewer.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = self.viewer.take() {
            let Viewer { state, window, .. } = viewer;
            drop(state.into_scene());
            drop(window);
            tracing::info!("resources released");
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.load_config()?;
    tracing::info!(
        width = config.window.width,
        height = config.window.height,
        backend = ?config.renderer.backend,
        vsync = config.window.vsync,
        "quadview-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
