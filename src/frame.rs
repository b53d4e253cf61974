use crate::constants::FPS_LOG_INTERVAL_SEC;
use crate::events::SharedQueue;
use crate::overlay;
use arena_core::{FrameOutcome, SimState};
use arena_render::Renderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub sim: SimState,
    pub queue: SharedQueue,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub renderer: Renderer<'static>,

    pub last_paused: bool,
    pub last_instant: Instant,
    pub fps_frames: u32,
    pub fps_elapsed: f32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // drain before stepping so listeners can push while we run
        let events = self.queue.borrow_mut().drain();
        let outcome = self.sim.step(events);

        if self.sim.paused != self.last_paused {
            self.last_paused = self.sim.paused;
            overlay::sync_paused(&self.document, self.last_paused);
        }

        let FrameOutcome::Advanced(scene) = outcome else {
            return;
        };
        self.renderer
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        match self.renderer.render(&scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost; reconfiguring");
                self.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
            }
            Err(e) => log::error!("render error: {:?}", e),
        }

        self.fps_frames += 1;
        self.fps_elapsed += dt_sec;
        if self.fps_elapsed >= FPS_LOG_INTERVAL_SEC {
            log::debug!(
                "[frame] {:.1} fps, frame {}",
                self.fps_frames as f32 / self.fps_elapsed,
                scene.frame_index
            );
            self.fps_frames = 0;
            self.fps_elapsed = 0.0;
        }
    }
}

pub async fn init_renderer(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Renderer<'static>> {
    let instance = wgpu::Instance::default();
    // the surface owns its own canvas handle, so it can outlive this call
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    Renderer::new(&instance, surface, canvas.width(), canvas.height()).await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
