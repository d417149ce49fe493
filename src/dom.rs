use crate::config::{SiteConfig, ATTR_BASE_PATH, ATTR_MAX_DPR, ATTR_SMOOTHING};
use crate::scroll::ScrollMetrics;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Device pixel ratio clamped to `[1, max]`.
#[inline]
pub fn clamped_device_pixel_ratio(window: &web::Window, max: f64) -> f64 {
    let dpr = window.device_pixel_ratio();
    if dpr.is_finite() {
        dpr.clamp(1.0, max.max(1.0))
    } else {
        1.0
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, max_dpr: f64) {
    if let Some(w) = web::window() {
        let dpr = clamped_device_pixel_ratio(&w, max_dpr);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Current scroll offset, document height and viewport height in CSS pixels.
pub fn scroll_metrics(window: &web::Window) -> ScrollMetrics {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    ScrollMetrics {
        scroll_y,
        document_height,
        viewport_height,
    }
}

/// Read site configuration from the canvas `data-*` attributes.
pub fn site_config(canvas: &web::HtmlCanvasElement) -> SiteConfig {
    SiteConfig::from_lookup(|name| match name {
        ATTR_BASE_PATH | ATTR_SMOOTHING | ATTR_MAX_DPR => canvas.get_attribute(name),
        _ => None,
    })
}
