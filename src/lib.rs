#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod asset_path;
mod atmosphere;
mod camera;
mod composer;
mod config;
mod constants;
mod dom;
mod frame;
mod host;
mod labels;
mod lifecycle;
mod loader;
mod overlay;
mod render;
mod scene;
mod scroll;
mod stations;
mod textures;
mod travel;

use host::SceneHost;
use lifecycle::{DetachRequest, HostError};

const CANVAS_ID: &str = "app-canvas";

thread_local! {
    static HOST: RefCell<Option<SceneHost>> = const { RefCell::new(None) };
    // Set while `init` awaits the attach; `shutdown` signals through it.
    static ATTACHING: RefCell<Option<DetachRequest>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portfolio-web starting");

    overlay_wiring();
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear the scene down: listeners removed, loop stopped, late texture loads
/// discarded. Safe to call more than once, including while the scene is
/// still starting up.
#[wasm_bindgen]
pub fn shutdown() {
    if let Some(mut host) = HOST.with(|h| h.borrow_mut().take()) {
        host.detach();
    } else {
        ATTACHING.with(|a| {
            if let Some(request) = a.borrow().as_ref() {
                request.request();
            }
        });
    }
}

fn overlay_wiring() {
    if let Some(document) = dom::window_document() {
        overlay::wire_back_to_top(&document);
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = dom::site_config(&canvas);
    log::info!(
        "[host] base path {:?}, smoothing {:?}, max dpr {}",
        config.base_path,
        config.smoothing,
        config.max_device_pixel_ratio
    );

    if HOST.with(|h| h.borrow().is_some()) || ATTACHING.with(|a| a.borrow().is_some()) {
        return Err(HostError::AlreadyAttached.into());
    }
    let request = DetachRequest::default();
    ATTACHING.with(|a| *a.borrow_mut() = Some(request.clone()));
    let mut host = SceneHost::new(window, canvas, config);
    let attached = host.attach(&request).await;
    ATTACHING.with(|a| a.borrow_mut().take());
    match attached {
        Ok(()) => {
            HOST.with(|h| *h.borrow_mut() = Some(host));
            Ok(())
        }
        // `host` drops here and detaches what attach had registered.
        Err(HostError::Detached) if request.is_requested() => {
            log::info!("[host] shutdown requested during attach");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
