#![cfg(target_arch = "wasm32")]
use crate::constants::{
    CORRIDOR_RIG_ID, ENTER_PORTAL_ID, FOREST_CANVAS_ID, PARALLAX_SELECTOR, SCENE_ATTR, SEED_ATTR,
};
use crate::dom::EventListener;
use crate::events::{KeyAction, PointerSubscription};
use crate::frame::{BindTargets, FrameContext, FrameLoop, ForestView};
use crate::intro::SharedIntro;
use instant::Instant;
use portal_core::forest::{self, ForestParams};
use portal_core::{
    Camera, CameraRig, ForestInstances, IntroTimeline, ParallaxMapper, SceneConfig, ScenePreset,
    ViewportBounds,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod intro;
mod overlay;
mod render;
mod timer;

/// Everything one page keeps alive. Dropping it detaches the page.
struct View {
    scene: ScenePreset,
    _pointer: PointerSubscription,
    _keys: EventListener,
    _enter: Option<EventListener>,
    _canvas_resize: Option<EventListener>,
    _pagehide: EventListener,
    _frame_loop: FrameLoop,
}

thread_local! {
    static VIEW: RefCell<Option<View>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portal-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Detach the current page: listeners, timers and the frame loop are released.
#[wasm_bindgen]
pub fn stop() {
    let view = VIEW.with(|v| v.borrow_mut().take());
    if let Some(view) = view {
        log::info!("[view] {} detached", view.scene);
    }
}

fn resolve_scene(document: &web::Document) -> anyhow::Result<ScenePreset> {
    match dom::body_data(document, SCENE_ATTR) {
        Some(name) => Ok(name.parse::<ScenePreset>()?),
        None => Ok(ScenePreset::Landing),
    }
}

fn forest_seed(document: &web::Document) -> u64 {
    dom::body_data(document, SEED_ATTR)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64)
}

fn bind_targets(document: &web::Document) -> BindTargets {
    BindTargets {
        layers: dom::query_html_elements(document, PARALLAX_SELECTOR),
        rig: dom::html_element_by_id(document, CORRIDOR_RIG_ID),
        body: document.body(),
    }
}

fn build_forest(
    document: &web::Document,
    config: &SceneConfig,
) -> anyhow::Result<Option<ForestView>> {
    let Some(el) = document.get_element_by_id(FOREST_CANVAS_ID) else {
        log::warn!("[forest] missing #{FOREST_CANVAS_ID}, rendering disabled");
        return Ok(None);
    };
    let canvas: web::HtmlCanvasElement = el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    let seed = forest_seed(document);
    let mut rng = StdRng::seed_from_u64(seed);
    let forest = forest::generate(&mut rng, &ForestParams::default());
    log::info!("[forest] seed={}", seed);

    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let mut rig = CameraRig::new(Camera::forest(aspect));
    if let Some(dolly) = config.dolly {
        rig = rig.with_dolly(dolly);
    }
    Ok(Some(ForestView {
        canvas,
        forest,
        rig,
        instances: ForestInstances::default(),
        gpu: None,
    }))
}

/// Opens the renderer once the adapter is ready; the page keeps working without it.
fn spawn_gpu_init(ctx: &Rc<RefCell<FrameContext>>) {
    let Some(canvas) = ctx.borrow().forest.as_ref().map(|f| f.canvas.clone()) else {
        return;
    };
    let weak = Rc::downgrade(ctx);
    spawn_local(async move {
        match render::ForestRenderer::new(&canvas).await {
            Ok(gpu) => {
                if let Some(ctx) = weak.upgrade() {
                    if let Some(forest) = ctx.borrow_mut().forest.as_mut() {
                        forest.gpu = Some(gpu);
                    }
                }
            }
            Err(e) => log::error!("[gpu] init failed, forest stays static: {:?}", e),
        }
    });
}

fn enter_portal_action(
    document: &web::Document,
    portal: &Rc<RefCell<Option<SharedIntro>>>,
) -> Rc<dyn Fn()> {
    let document = document.clone();
    let portal = portal.clone();
    Rc::new(move || {
        if portal.borrow().is_some() {
            return;
        }
        match intro::start_portal(&document, IntroTimeline::portal()) {
            Ok(driver) => *portal.borrow_mut() = Some(driver),
            Err(e) => {
                log::error!("[portal] could not start warp: {:?}", e);
                dom::navigate(portal_core::constants::PORTAL_ROUTE);
            }
        }
    })
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let scene = resolve_scene(&document)?;
    let config = scene.config();
    log::info!("[view] scene={}", scene);

    let (w, h) = dom::viewport_size(&window);
    let mapper = Rc::new(RefCell::new(ParallaxMapper::from_config(
        ViewportBounds::new(w, h),
        &config,
    )));
    let pointer = PointerSubscription::attach(&window, mapper.clone())?;

    let intro = match config.intro {
        Some(timeline) => intro::start_wormhole(&document, timeline)?,
        None => None,
    };

    let forest_view = if config.dolly.is_some() {
        build_forest(&document, &config)?
    } else {
        None
    };
    let canvas_resize = match forest_view.as_ref() {
        Some(f) => {
            let canvas = f.canvas.clone();
            Some(EventListener::new(&window, "resize", move |_| {
                dom::sync_canvas_backing_size(&canvas);
            })?)
        }
        None => None,
    };

    let portal: Rc<RefCell<Option<SharedIntro>>> = Rc::new(RefCell::new(None));
    let enter_action = document
        .get_element_by_id(ENTER_PORTAL_ID)
        .map(|_| enter_portal_action(&document, &portal));
    let enter = match enter_action.clone() {
        Some(action) => dom::add_click_listener(&document, ENTER_PORTAL_ID, move || action())?,
        None => None,
    };

    let keys = {
        let intro = intro.clone();
        events::keyboard::wire_keydown(&window, move |action| match action {
            KeyAction::SkipIntro => {
                if let Some(i) = &intro {
                    i.borrow_mut().skip();
                }
            }
            KeyAction::EnterPortal => {
                let intro_running = intro.as_ref().is_some_and(|i| !i.borrow().is_done());
                if let (false, Some(action)) = (intro_running, &enter_action) {
                    action();
                }
            }
        })?
    };

    let now = Instant::now();
    let ctx = Rc::new(RefCell::new(FrameContext {
        mapper,
        targets: bind_targets(&document),
        forest: forest_view,
        intro,
        portal,
        origin: now,
        last_instant: now,
    }));
    spawn_gpu_init(&ctx);
    let frame_loop = frame::start_loop(ctx)?;

    // Released from a fresh task, never from inside the pagehide handler itself
    let pagehide = EventListener::new(&window, "pagehide", |_| spawn_local(async { stop() }))?;

    let previous = VIEW.with(|v| {
        v.borrow_mut().replace(View {
            scene,
            _pointer: pointer,
            _keys: keys,
            _enter: enter,
            _canvas_resize: canvas_resize,
            _pagehide: pagehide,
            _frame_loop: frame_loop,
        })
    });
    drop(previous);
    log::info!("[view] {} attached", scene);
    Ok(())
}
