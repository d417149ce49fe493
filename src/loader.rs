//! Browser side of texture loading: fetch, decode, hand back to the registry.

use crate::textures::{decode_png, DecodedImage, TextureLoadError, TextureRegistry};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Start a fetch for every texture still waiting in the registry.
///
/// Each task holds only a weak handle, so a load that finishes after the host
/// is gone finds nothing to publish into and is dropped.
pub fn spawn_pending(registry: &Rc<RefCell<TextureRegistry>>) -> usize {
    let jobs = registry.borrow_mut().start_pending();
    let count = jobs.len();
    for (id, url) in jobs {
        let weak: Weak<RefCell<TextureRegistry>> = Rc::downgrade(registry);
        spawn_local(async move {
            let result = fetch_image(&url).await;
            match weak.upgrade() {
                Some(reg) => {
                    reg.borrow_mut().complete(id, result);
                }
                None => log::debug!("[texture] {} finished after teardown, discarded", url),
            }
        });
    }
    count
}

async fn fetch_image(url: &str) -> Result<DecodedImage, TextureLoadError> {
    let bytes = fetch_bytes(url).await?;
    decode_png(&bytes)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, TextureLoadError> {
    let window = web::window().ok_or_else(|| TextureLoadError::Fetch("no window".into()))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        return Err(TextureLoadError::Status(resp.status()));
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

fn js_err(e: JsValue) -> TextureLoadError {
    TextureLoadError::Fetch(format!("{:?}", e))
}
