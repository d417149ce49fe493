use crate::camera::Camera;
use crate::scene::{NodeId, SceneGraph};
use crate::stations::Label;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const LABEL_LAYER_ID: &str = "scene-labels";
const LABEL_CLASS: &str = "scene-label";

/// HTML text pinned to scene nodes. Positions are recomputed every frame from
/// the anchor's world position.
pub struct LabelLayer {
    items: Vec<(NodeId, web::HtmlElement)>,
}

impl LabelLayer {
    pub fn new<'l>(
        document: &web::Document,
        labels: impl Iterator<Item = &'l Label>,
    ) -> anyhow::Result<Self> {
        let parent: web::Node = match document.get_element_by_id(LABEL_LAYER_ID) {
            Some(el) => el.into(),
            None => document
                .body()
                .ok_or_else(|| anyhow::anyhow!("no document body"))?
                .into(),
        };
        let mut items = Vec::new();
        for label in labels {
            let el = document
                .create_element("div")
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
            el.set_class_name(LABEL_CLASS);
            el.set_text_content(Some(label.text));
            let el: web::HtmlElement = el
                .dyn_into()
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
            _ = el.style().set_property("display", "none");
            parent
                .append_child(&el)
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
            items.push((label.anchor, el));
        }
        Ok(Self { items })
    }

    /// Place each label over its anchor in a `width` x `height` CSS-pixel
    /// viewport. Anchors that are hidden, behind the camera or off screen
    /// hide their label.
    pub fn update(&self, graph: &SceneGraph, camera: &Camera, width: f32, height: f32) {
        for (anchor, el) in &self.items {
            let style = el.style();
            let screen = if graph.is_visible_in_world(*anchor) {
                camera.project_to_screen(graph.world_position(*anchor), width, height)
            } else {
                None
            };
            match screen {
                Some([x, y]) => {
                    _ = style.set_property(
                        "transform",
                        &format!("translate({:.1}px, {:.1}px) translate(-50%, -50%)", x, y),
                    );
                    _ = style.set_property("display", "block");
                }
                None => {
                    _ = style.set_property("display", "none");
                }
            }
        }
    }

    /// Take the label elements out of the page.
    pub fn remove(&mut self) {
        for (_, el) in self.items.drain(..) {
            el.remove();
        }
    }
}

impl Drop for LabelLayer {
    fn drop(&mut self) {
        self.remove();
    }
}
