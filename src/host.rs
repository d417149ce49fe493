use crate::asset_path::AssetResolver;
use crate::camera::Camera;
use crate::composer::SceneComposer;
use crate::config::SiteConfig;
use crate::dom;
use crate::frame::{self, FrameContext, FrameLoop};
use crate::labels::LabelLayer;
use crate::lifecycle::{DetachRequest, HostError, HostPhase};
use crate::loader;
use crate::overlay;
use crate::scene::draw_list::DrawList;
use crate::scroll::{ScrollProgress, ScrollTracker};
use crate::textures::TextureRegistry;
use crate::travel::StationLayout;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Owns everything the page registers on the browser: the scroll and resize
/// listeners, the frame loop and the texture registry.
///
/// Attach once, detach once. Dropping an attached host detaches it.
pub struct SceneHost {
    phase: HostPhase,
    window: web::Window,
    canvas: web::HtmlCanvasElement,
    config: SiteConfig,

    tracker: Rc<RefCell<ScrollTracker>>,
    progress: Rc<Cell<ScrollProgress>>,
    textures: Rc<RefCell<TextureRegistry>>,

    scroll_listener: Option<Closure<dyn FnMut()>>,
    resize_listener: Option<Closure<dyn FnMut()>>,
    frame_loop: Option<FrameLoop>,
}

impl SceneHost {
    pub fn new(window: web::Window, canvas: web::HtmlCanvasElement, config: SiteConfig) -> Self {
        Self {
            phase: HostPhase::default(),
            window,
            canvas,
            config,
            tracker: Rc::new(RefCell::new(ScrollTracker::new())),
            progress: Rc::new(Cell::new(ScrollProgress::START)),
            textures: Rc::new(RefCell::new(TextureRegistry::new())),
            scroll_listener: None,
            resize_listener: None,
            frame_loop: None,
        }
    }

    /// Register listeners, request textures and start the frame loop.
    ///
    /// A `detach` requested through `detach_request` while the GPU is being
    /// set up makes this return `HostError::Detached`; dropping the host then
    /// undoes whatever was registered.
    pub async fn attach(&mut self, detach_request: &DetachRequest) -> Result<(), HostError> {
        self.phase.begin_attach()?;
        let document = self
            .window
            .document()
            .ok_or_else(|| HostError::Environment("no document".into()))?;

        dom::sync_canvas_backing_size(&self.canvas, self.config.max_device_pixel_ratio);
        self.listen_scroll()?;
        self.listen_resize()?;
        // Sample once so the first frame starts at the restored position.
        self.sample_scroll();

        let assets = AssetResolver::new(self.config.base_path.as_deref());
        let composer = SceneComposer::new(
            StationLayout::default(),
            self.config.smoothing,
            &mut self.textures.borrow_mut(),
            &assets,
        );
        let started = loader::spawn_pending(&self.textures);
        log::info!("[host] requested {} textures from base '{}'", started, assets.base_path());

        let labels = match LabelLayer::new(&document, composer.labels()) {
            Ok(l) => Some(l),
            Err(e) => {
                log::warn!("[host] labels unavailable: {:?}", e);
                None
            }
        };
        let gpu = frame::init_gpu(&self.canvas).await;
        if gpu.is_none() {
            log::warn!("[host] no WebGPU; page stays scrollable without the scene");
        }
        self.phase.finish_attach(detach_request.is_requested())?;

        self.frame_loop = Some(frame::start_loop(FrameContext {
            composer,
            textures: self.textures.clone(),
            progress: self.progress.clone(),
            canvas: self.canvas.clone(),
            camera: Camera::default(),
            gpu,
            labels,
            draw_list: DrawList::new(),
            last_instant: Instant::now(),
        }));
        overlay::hide_loading(&document);
        log::info!("[host] attached at progress {:.3}", self.progress.get().get());
        Ok(())
    }

    /// Remove listeners, stop the loop and close the texture registry.
    /// Later calls are no-ops.
    pub fn detach(&mut self) {
        if !self.phase.begin_detach() {
            return;
        }
        if let Some(cb) = self.scroll_listener.take() {
            _ = self
                .window
                .remove_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = self.resize_listener.take() {
            _ = self
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }
        if let Some(fl) = self.frame_loop.take() {
            fl.stop();
        }
        self.textures.borrow_mut().close();
        log::info!(
            "[host] detached after {} scroll samples",
            self.tracker.borrow().sample_count()
        );
    }

    fn sample_scroll(&self) {
        let p = self
            .tracker
            .borrow_mut()
            .sample(dom::scroll_metrics(&self.window));
        self.progress.set(p);
    }

    fn listen_scroll(&mut self) -> Result<(), HostError> {
        let window = self.window.clone();
        let tracker = self.tracker.clone();
        let progress = self.progress.clone();
        let cb = Closure::wrap(Box::new(move || {
            let p = tracker.borrow_mut().sample(dom::scroll_metrics(&window));
            progress.set(p);
        }) as Box<dyn FnMut()>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        self.window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                cb.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(|e| HostError::Environment(format!("{:?}", e)))?;
        self.scroll_listener = Some(cb);
        Ok(())
    }

    fn listen_resize(&mut self) -> Result<(), HostError> {
        let window = self.window.clone();
        let canvas = self.canvas.clone();
        let tracker = self.tracker.clone();
        let progress = self.progress.clone();
        let max_dpr = self.config.max_device_pixel_ratio;
        let cb = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas, max_dpr);
            // The scrollable range changes with the viewport height.
            let p = tracker.borrow_mut().sample(dom::scroll_metrics(&window));
            progress.set(p);
        }) as Box<dyn FnMut()>);
        self.window
            .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
            .map_err(|e| HostError::Environment(format!("{:?}", e)))?;
        self.resize_listener = Some(cb);
        Ok(())
    }
}

impl Drop for SceneHost {
    fn drop(&mut self) {
        self.detach();
    }
}
