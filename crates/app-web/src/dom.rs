use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn scene_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id("scene-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #scene-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Keep the canvas internal pixel size at CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Client (CSS px) coordinates to normalized device coordinates on the canvas.
pub fn client_to_ndc(canvas: &web::HtmlCanvasElement, client_x: f32, client_y: f32) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let x = (client_x - rect.left() as f32) / rect.width().max(1.0) as f32;
    let y = (client_y - rect.top() as f32) / rect.height().max(1.0) as f32;
    (2.0 * x - 1.0, 1.0 - 2.0 * y)
}
