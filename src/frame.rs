use crate::constants::{
    CORRIDOR_PERSPECTIVE_PX, MAX_FRAME_DT_SEC, SPOTLIGHT_VAR_X, SPOTLIGHT_VAR_Y,
};
use crate::dom::set_style;
use crate::intro::SharedIntro;
use crate::render::ForestRenderer;
use instant::Instant;
use portal_core::{CameraRig, Forest, ForestInstances, ParallaxMapper, SceneTransform};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Elements that receive the smoothed pointer motion.
pub struct BindTargets {
    /// `[data-parallax]` layers, moved with `translate3d`.
    pub layers: Vec<web::HtmlElement>,
    /// Corridor container, rotated under a fixed perspective.
    pub rig: Option<web::HtmlElement>,
    /// Carries the spotlight custom properties.
    pub body: Option<web::HtmlElement>,
}

impl BindTargets {
    pub fn apply(&self, t: &SceneTransform) {
        if let Some(css) = t.css_translate() {
            for el in &self.layers {
                set_style(el, "transform", &css);
            }
        }
        if let (Some(rig), Some(css)) = (&self.rig, t.css_tilt(CORRIDOR_PERSPECTIVE_PX)) {
            set_style(rig, "transform", &css);
        }
        if let (Some(body), Some(p)) = (&self.body, t.spotlight) {
            set_style(body, SPOTLIGHT_VAR_X, &format!("{:.1}px", p.x));
            set_style(body, SPOTLIGHT_VAR_Y, &format!("{:.1}px", p.y));
        }
    }
}

/// 3D forest pieces. The renderer arrives later, once the adapter resolves.
pub struct ForestView {
    pub canvas: web::HtmlCanvasElement,
    pub forest: Forest,
    pub rig: CameraRig,
    pub instances: ForestInstances,
    pub gpu: Option<ForestRenderer>,
}

impl ForestView {
    fn frame(&mut self, elapsed_sec: f32, t: &SceneTransform) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        self.rig.set_aspect(gpu.aspect());
        let camera = self.rig.update(elapsed_sec, t.tilt);
        gpu.set_camera(camera);
        self.forest.instances_into(elapsed_sec, &mut self.instances);
        gpu.upload_instances(&self.instances);
        match gpu.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
    }
}

pub struct FrameContext {
    pub mapper: Rc<RefCell<ParallaxMapper>>,
    pub targets: BindTargets,
    pub forest: Option<ForestView>,
    pub intro: Option<SharedIntro>,
    pub portal: Rc<RefCell<Option<SharedIntro>>>,
    pub origin: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);
        let elapsed_sec = (now - self.origin).as_secs_f32();

        let transform = self.mapper.borrow_mut().tick(dt_sec);
        self.targets.apply(&transform);

        if let Some(intro) = &self.intro {
            intro.borrow_mut().tick();
        }
        if let Some(portal) = self.portal.borrow().as_ref() {
            portal.borrow_mut().tick();
        }
        if let Some(forest) = self.forest.as_mut() {
            forest.frame(elapsed_sec, &transform);
        }
    }
}

/// Running `requestAnimationFrame` loop; dropping it cancels the pending frame.
pub struct FrameLoop {
    window: web::Window,
    handle: Rc<Cell<i32>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> anyhow::Result<FrameLoop> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = Rc::new(Cell::new(0));

    // The closure holds only a weak link to itself so the loop can be freed
    let tick_weak = Rc::downgrade(&tick);
    let handle_tick = handle.clone();
    let w = window.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let Some(tick) = tick_weak.upgrade() {
            if let Some(cb) = tick.borrow().as_ref() {
                if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    handle_tick.set(id);
                }
            }
        }
    }) as Box<dyn FnMut()>));

    let id = match tick.borrow().as_ref() {
        Some(cb) => window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("requestAnimationFrame: {:?}", e))?,
        None => anyhow::bail!("frame closure missing"),
    };
    handle.set(id);
    Ok(FrameLoop {
        window,
        handle,
        tick,
    })
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        _ = self.window.cancel_animation_frame(self.handle.get());
        self.tick.borrow_mut().take();
        log::debug!("[frame] loop stopped");
    }
}
