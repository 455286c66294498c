//! Platform layer: windowing & event loop.
//!
//! Owns the window, the GPU state and the application object, translates
//! winit events into [`InputHandler`] calls and drives the fixed-rate tick.
//! Everything runs on the event-loop thread.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use asset::texture::TextureData;
use corelib::{
    Viewer,
    input::{DragButtons, Flow, InputHandler, Key},
    tick::FixedTicker,
};
use renderer::GpuState;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Pixels of trackpad scroll treated as one wheel line.
const PIXELS_PER_LINE: f64 = 20.0;

/// Window and scheduling settings.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub backends: wgpu::Backends,
    pub ticks_per_second: u32,
}

/// Open the window and run until it is closed or the viewer asks to exit.
pub fn run_viewer(config: ViewerConfig, viewer: Viewer, ground: TextureData) -> Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config, viewer, ground);

    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: ViewerConfig,
    viewer: Viewer,
    ground: TextureData,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    ticker: FixedTicker,
    last_time: Instant,
    cursor: Option<PhysicalPosition<f64>>,
    buttons: DragButtons,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig, viewer: Viewer, ground: TextureData) -> Self {
        let ticker = FixedTicker::new(config.ticks_per_second);
        Self {
            config,
            viewer,
            ground,
            window: None,
            gpu: None,
            ticker,
            last_time: Instant::now(),
            cursor: None,
            buttons: DragButtons::default(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(true);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );
        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.backends,
            &self.ground,
        ))?;

        self.viewer.on_resize(size.width, size.height);
        self.gpu = Some(gpu);
        self.window = Some(window);
        self.last_time = Instant::now();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        match gpu.render(&self.viewer) {
            Ok(()) => {}
            Err(e) if GpuState::is_surface_lost(&e) => {
                log::warn!("Surface lost/outdated, reconfiguring");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU out of memory"));
            }
            Err(e) => log::warn!("Frame skipped: {e:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                log::info!("Resized: {}x{}", size.width, size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
                self.viewer.on_resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if let Some(key) = map_key(code) {
                    if self.viewer.on_key(key) == Flow::Exit {
                        log::info!("Exit requested.");
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.buttons.primary = pressed,
                    MouseButton::Right => self.buttons.secondary = pressed,
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(prev) = self.cursor {
                    if self.buttons.primary || self.buttons.secondary {
                        let (dx, dy) = drag_delta(prev, position);
                        self.viewer.on_drag(dx, dy, self.buttons);
                    }
                }
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            WindowEvent::MouseWheel { delta, .. } => {
                self.viewer.on_scroll(scroll_lines(delta));
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let now = Instant::now();
        let ticks = self.ticker.advance(now - self.last_time);
        self.last_time = now;

        for _ in 0..ticks {
            self.viewer.on_tick();
        }
        if ticks > 0 {
            window.request_redraw();
        }
        let wait: Duration = self.ticker.until_next();
        event_loop.set_control_flow(ControlFlow::WaitUntil(now + wait));
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

/// Pointer movement with y flipped to point up.
fn drag_delta(prev: PhysicalPosition<f64>, now: PhysicalPosition<f64>) -> (f32, f32) {
    ((now.x - prev.x) as f32, (prev.y - now.y) as f32)
}

fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
    }
}
