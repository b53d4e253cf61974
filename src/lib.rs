#![cfg(target_arch = "wasm32")]
use arena_core::{InputQueue, SimParams, SimState};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Variant and movement basis from `?variant=..&basis=..`. Unknown values are
/// logged and the defaults kept.
fn params_from_location(window: &web::Window) -> SimParams {
    let search = window.location().search().unwrap_or_default();
    match SimParams::default().with_query(&search) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("ignoring query parameters: {}", e);
            SimParams::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("arena-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    overlay::wire_orientation(&window, &document);
    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let params = params_from_location(&window);
    log::info!("variant={} basis={}", params.variant, params.basis);

    let queue: events::SharedQueue = Rc::new(RefCell::new(InputQueue::new()));
    let toggles = events::wire_toggles(&document, queue.clone());
    events::wire_joystick(&document, queue.clone());
    events::wire_swipe(&canvas, queue.clone());
    events::wire_buttons(&document, queue.clone());
    events::wire_keyboard(&window, queue.clone());

    let renderer = frame::init_renderer(&canvas).await?;
    let sim = SimState::new(params).with_toggles(toggles);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        last_paused: sim.paused,
        sim,
        queue,
        canvas,
        document,
        renderer,
        last_instant: Instant::now(),
        fps_frames: 0,
        fps_elapsed: 0.0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
