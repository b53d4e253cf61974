use anyhow::Result;
use arena_core::{FrameOutcome, InputEvent, InputQueue, MovementBasis, SceneVariant, SimParams, SimState};
use arena_render::Renderer;
use clap::Parser;
use glam::Vec2;
use std::sync::Arc;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowBuilder};

mod keys;

const TITLE: &str = "Touch Arena (native)";

#[derive(Parser)]
#[command(name = "arena-native", about = "Orbit-camera avatar demo on the desktop")]
struct Cli {
    /// Scene variant: basic or bloom
    #[arg(long, default_value = "basic")]
    variant: SceneVariant,

    /// Movement basis: camera or yaw
    #[arg(long, default_value = "camera")]
    basis: MovementBasis,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Window input translated into simulation events.
#[derive(Default)]
struct PointerState {
    cursor: Vec2,
    dragging: bool,
}

struct App {
    window: Arc<Window>,
    renderer: Renderer<'static>,
    sim: SimState,
    queue: InputQueue,
    stick: keys::KeyStick,
    pointer: PointerState,
    last_paused: bool,
}

impl App {
    fn on_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(size) => self.renderer.resize_if_needed(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = *state == ElementState::Pressed;
                if let Some(ev) = self.stick.update(*code, pressed) {
                    self.queue.push(ev);
                } else if pressed && !repeat {
                    if let Some(ev) = keys::press_event(*code) {
                        self.queue.push(ev);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.cursor = Vec2::new(position.x as f32, position.y as f32);
                if self.pointer.dragging {
                    self.queue.push(InputEvent::SwipeMove(self.pointer.cursor));
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.pointer.dragging = *state == ElementState::Pressed;
                if self.pointer.dragging {
                    self.queue.push(InputEvent::SwipeStart(self.pointer.cursor));
                }
            }
            _ => {}
        }
    }

    /// One display frame. Returns false when the app should exit.
    fn frame(&mut self) -> bool {
        let outcome = self.sim.step(self.queue.drain());
        if self.sim.paused != self.last_paused {
            self.last_paused = self.sim.paused;
            let title = if self.last_paused {
                format!("{} (paused)", TITLE)
            } else {
                TITLE.to_string()
            };
            self.window.set_title(&title);
        }
        let FrameOutcome::Advanced(scene) = outcome else {
            return true;
        };
        match self.renderer.render(&scene) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.renderer.resize_if_needed(size.width, size.height);
                self.renderer.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory; exiting");
                false
            }
            Err(e) => {
                log::warn!("frame dropped: {:?}", e);
                true
            }
        }
    }
}

/// How the loop waits after a frame, and whether to ask for another redraw.
/// Nothing is presented while paused, so the loop sleeps until input arrives
/// instead of spinning on redraw requests.
fn pacing(paused: bool) -> (ControlFlow, bool) {
    if paused {
        (ControlFlow::Wait, false)
    } else {
        (ControlFlow::Poll, true)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let params = SimParams {
        variant: cli.variant,
        basis: cli.basis,
        ..SimParams::default()
    };
    log::info!("variant={} basis={}", params.variant, params.basis);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
            .build(&event_loop)?,
    );

    let size = window.inner_size();
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let renderer = pollster::block_on(Renderer::new(&instance, surface, size.width, size.height))?;

    let sim = SimState::new(params);
    let mut app = App {
        window,
        renderer,
        last_paused: sim.paused,
        sim,
        queue: InputQueue::new(),
        stick: keys::KeyStick::default(),
        pointer: PointerState::default(),
    };

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent { event, .. } => app.on_window_event(&event),
        Event::AboutToWait => {
            if !app.frame() {
                elwt.exit();
                return;
            }
            let (flow, redraw) = pacing(app.sim.paused);
            elwt.set_control_flow(flow);
            if redraw {
                app.window.request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}
