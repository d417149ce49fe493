use crate::atmosphere::Atmosphere;
use crate::camera::Camera;
use crate::composer::SceneComposer;
use crate::labels::LabelLayer;
use crate::render;
use crate::scene::draw_list::DrawList;
use crate::scroll::ScrollProgress;
use crate::textures::TextureRegistry;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub composer: SceneComposer,
    pub textures: Rc<RefCell<TextureRegistry>>,
    pub progress: Rc<Cell<ScrollProgress>>,

    pub canvas: web::HtmlCanvasElement,
    pub camera: Camera,
    pub gpu: Option<render::GpuState<'a>>,
    pub labels: Option<LabelLayer>,
    pub draw_list: DrawList,

    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        // One read per frame; scroll events only publish.
        let progress = self.progress.get();
        self.composer.tick(dt_sec, progress);
        let atmosphere = Atmosphere::at(progress);

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            g.upload_textures(&mut self.textures.borrow_mut());
            self.draw_list.rebuild(
                self.composer.graph(),
                &self.textures.borrow(),
                self.camera.view(),
            );
            if let Err(e) = g.render(&self.draw_list, &atmosphere, &self.camera) {
                log::error!("[gpu] render error: {:?}", e);
            }
        }

        if let Some(labels) = &self.labels {
            let css_w = self.canvas.client_width() as f32;
            let css_h = self.canvas.client_height() as f32;
            labels.update(self.composer.graph(), &self.camera, css_w, css_h);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Handle to a running `requestAnimationFrame` loop.
///
/// `stop` cancels the pending callback and drops the frame context, which
/// releases the GPU state, the composer and the labels.
pub struct FrameLoop {
    ctx: Rc<RefCell<Option<FrameContext<'static>>>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

pub fn start_loop(frame_ctx: FrameContext<'static>) -> FrameLoop {
    let ctx = Rc::new(RefCell::new(Some(frame_ctx)));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let ctx_tick = ctx.clone();
    let raf_tick = raf_id.clone();
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        match ctx_tick.borrow_mut().as_mut() {
            Some(ctx) => ctx.frame(),
            None => return,
        }
        if let Some(cb) = tick_clone.borrow().as_ref() {
            raf_tick.set(request_frame(cb));
        }
    }) as Box<dyn FnMut()>));
    if let Some(cb) = tick.borrow().as_ref() {
        raf_id.set(request_frame(cb));
    }
    FrameLoop { ctx, raf_id, tick }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window().and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
}

impl FrameLoop {
    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.ctx.borrow_mut().take();
        // Nothing is scheduled any more, so the closure can go.
        self.tick.borrow_mut().take();
    }
}
