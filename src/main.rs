use anyhow::{bail, Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use viewer_navigation::cli::Cli;
use viewer_navigation::core::{InputEvent, InputSurface, SharedInputSurface, WinitInputAdapter};
use viewer_navigation::traits::Button;
use viewer_navigation::{
    create_gallery_scene, Camera, FixedStepFrames, FlyMode, FrameIterator, ModeCoordinator,
    ModeKind, NavigationConfig, WalkMode, WaypointEngine,
};

// === Constants ===

/// Pause on each waypoint before the tour moves on
const TOUR_DWELL_MS: f64 = 500.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
/// Windowed runs log the camera pose this often
const WINDOW_REPORT_INTERVAL_MS: f64 = 1000.0;

fn describe(camera: &Camera, time_ms: f64) -> String {
    let dir = camera.look_direction();
    format!(
        "[{:>8.1} ms] {} pos ({:.2}, {:.2}, {:.2}) dir ({:.2}, {:.2}, {:.2}) fov {:.1}",
        time_ms,
        camera.name,
        camera.position.x,
        camera.position.y,
        camera.position.z,
        dir.x,
        dir.y,
        dir.z,
        camera.fov.to_degrees()
    )
}

// === Windowed mode ===

struct ViewerApp {
    window: Option<Window>,
    coordinator: ModeCoordinator,
    surface: SharedInputSurface,
    adapter: WinitInputAdapter,
    frames: FrameIterator,
    last_report_ms: f64,
}

impl ViewerApp {
    fn new(coordinator: ModeCoordinator, surface: SharedInputSurface) -> Self {
        Self {
            window: None,
            coordinator,
            surface,
            adapter: WinitInputAdapter::new(),
            frames: FrameIterator::new(),
            last_report_ms: 0.0,
        }
    }

    fn mode_for_key(key: KeyCode) -> Option<ModeKind> {
        match key {
            KeyCode::Digit1 => Some(ModeKind::Fly),
            KeyCode::Digit2 => Some(ModeKind::Walk),
            KeyCode::Digit3 => Some(ModeKind::Waypoint),
            _ => None,
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match event_loop.create_window(
                Window::default_attributes()
                    .with_title("viewer-nav")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(window) => self.window = Some(window),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } if Self::mode_for_key(key).is_some() => {
                if let Some(kind) = Self::mode_for_key(key) {
                    self.coordinator.switch_to(kind);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(frame) = self.frames.next() {
                    self.coordinator.update(&frame);
                    if frame.time_ms - self.last_report_ms >= WINDOW_REPORT_INTERVAL_MS {
                        self.last_report_ms = frame.time_ms;
                        if let Some(camera) = self.coordinator.camera() {
                            log::info!("{}", describe(camera, frame.time_ms));
                        }
                    }
                }
            }
            other => self.adapter.forward(&other, &mut self.surface.borrow_mut()),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run_windowed(coordinator: ModeCoordinator, surface: SharedInputSurface) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = ViewerApp::new(coordinator, surface);

    println!("viewer-nav - 1/2/3 switch fly/walk/waypoint, WASD move, drag to look, arrows step the tour");
    event_loop.run_app(&mut app).context("event loop failed")?;
    app.coordinator.dispose();
    Ok(())
}

// === Headless mode ===

fn run_headless(cli: &Cli, mut coordinator: ModeCoordinator, surface: SharedInputSurface, transition_ms: f64) {
    let mode = coordinator.active_kind();
    let frames = FixedStepFrames::new(cli.fps);
    let step_ms = frames.step_ms();
    let touring = cli.tour && mode == Some(ModeKind::Waypoint);
    let tour_interval = ((transition_ms + TOUR_DWELL_MS) / step_ms).ceil().max(1.0) as u64;
    let report_interval = (1000.0 / step_ms).round().max(1.0) as u64;

    for frame in frames.take(cli.frames as usize) {
        if touring && frame.number > 0 && frame.number % tour_interval == 0 {
            surface.borrow_mut().extend([
                InputEvent::KeyDown(Button::ArrowRight),
                InputEvent::KeyUp(Button::ArrowRight),
            ]);
        }

        coordinator.update(&frame);

        if frame.number % report_interval == 0 {
            if let Some(camera) = coordinator.camera() {
                println!("{}", describe(camera, frame.time_ms));
            }
        }
    }

    if let Some(camera) = coordinator.camera() {
        println!("final {}", describe(camera, cli.frames as f64 * step_ms));
    }
    coordinator.dispose();
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => NavigationConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => NavigationConfig::default(),
    };
    if let Some(path) = &cli.waypoints {
        config.waypoints.data_path = path.clone();
    }

    let scene = create_gallery_scene().into_shared();
    let surface = InputSurface::shared();
    let mut coordinator = ModeCoordinator::new(scene.clone(), surface.clone());
    coordinator.register(Box::new(FlyMode::new(config.fly.clone())));
    coordinator.register(Box::new(WalkMode::new(config.walk.clone())));
    if !coordinator.register(Box::new(WaypointEngine::new(config.waypoints.clone()))) {
        log::warn!(
            "waypoint tour unavailable, could not use {}",
            config.waypoints.data_path.display()
        );
    }

    let mode = ModeKind::from(cli.mode);
    if !coordinator.switch_to(mode) {
        bail!("{} mode is not available (available: {:?})", mode, coordinator.available());
    }
    if cli.tour && mode != ModeKind::Waypoint {
        log::warn!("--tour only applies to waypoint mode");
    }

    println!(
        "viewer-nav: {} mode in scene with {} waypoint markers",
        mode,
        scene.borrow().markers().len()
    );

    if cli.window {
        run_windowed(coordinator, surface)
    } else {
        run_headless(&cli, coordinator, surface, config.waypoints.transition_ms);
        Ok(())
    }
}
