use crate::dom;
use web_sys as web;

pub const LOADING_OVERLAY_ID: &str = "loading-overlay";
pub const BACK_TO_TOP_ID: &str = "back-to-top";

#[inline]
pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback for pages without the stylesheet
        _ = el.set_attribute("style", "display:none");
    }
}

/// Smooth-scroll back to the intro when the footer button is clicked.
pub fn wire_back_to_top(document: &web::Document) {
    dom::add_click_listener(document, BACK_TO_TOP_ID, || {
        if let Some(w) = web::window() {
            let opts = web::ScrollToOptions::new();
            opts.set_top(0.0);
            opts.set_behavior(web::ScrollBehavior::Smooth);
            w.scroll_to_with_scroll_to_options(&opts);
        }
    });
}
