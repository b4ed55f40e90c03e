#![cfg(target_arch = "wasm32")]
//! Browser frontend: canvas setup, DOM events, WebGPU rendering, and the
//! requestAnimationFrame loop around one [`app_core::SceneContext`].

mod assets;
mod dom;
mod events;
mod frame;
mod render;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use app_core::SceneContext;

const SCENE_SEED: u64 = 42;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::scene_canvas(&document)?;
    dom::sync_canvas_backing_size(&canvas);

    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let ctx = Rc::new(RefCell::new(SceneContext::new(SCENE_SEED, aspect)?));

    // Leak a canvas clone to satisfy the 'static lifetime on the surface.
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let gpu = render::GpuState::new(leaked_canvas).await?;

    events::register(&canvas, &ctx);
    let clouds = assets::load_models(&ctx);
    frame::start_loop(canvas, ctx, gpu, clouds);
    Ok(())
}
