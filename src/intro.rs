use crate::constants::{
    ENTER_PORTAL_ID, INTRO_OVERLAY_ID, INTRO_SKIP_ID, INTRO_TUNNEL_ID, PORTAL_OVERLAY_ID,
    WARPING_CLASS,
};
use crate::dom::{self, EventListener};
use crate::overlay;
use crate::timer::Timeout;
use instant::Instant;
use portal_core::constants::PORTAL_ROUTE;
use portal_core::{IntroPhase, IntroSequencer, IntroTimeline};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroKind {
    /// Full-screen tunnel over the landing page.
    Wormhole,
    /// Warp played after "enter", ending in navigation.
    Portal,
}

/// Browser side of one intro run.
///
/// Owns the failsafe timer and the skip button listener. Both are cancelled
/// as soon as the sequence completes and released on the next frame tick.
pub struct IntroDriver {
    kind: IntroKind,
    seq: IntroSequencer,
    origin: Instant,
    overlay: Option<web::HtmlElement>,
    tunnel: Option<web::HtmlElement>,
    failsafe: Option<Timeout>,
    skip: Option<EventListener>,
}

pub type SharedIntro = Rc<RefCell<IntroDriver>>;

impl IntroDriver {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    pub fn is_done(&self) -> bool {
        self.seq.is_done()
    }

    pub fn skip(&mut self) -> bool {
        let now = self.now();
        let fired = self.seq.skip(now);
        if fired {
            self.cancel_timer();
        }
        fired
    }

    fn on_failsafe(&mut self) {
        let now = self.now();
        if self.seq.failsafe(now) {
            log::warn!("[intro] {:?} forced complete after {:.2}s", self.kind, now);
        }
    }

    fn cancel_timer(&self) {
        if let Some(t) = &self.failsafe {
            t.cancel();
        }
    }

    /// Advance from the frame loop and paint the overlay.
    pub fn tick(&mut self) {
        if self.seq.is_done() {
            self.failsafe = None;
            self.skip = None;
            return;
        }
        let now = self.now();
        let phase = self.seq.tick(now);
        if phase == IntroPhase::Done {
            self.cancel_timer();
            return;
        }
        if self.kind == IntroKind::Wormhole {
            if let Some(el) = &self.overlay {
                overlay::apply_wormhole(el, self.tunnel.as_ref(), self.seq.wormhole_frame(now));
            }
        }
    }
}

fn launch(
    document: &web::Document,
    kind: IntroKind,
    mut seq: IntroSequencer,
    overlay: Option<web::HtmlElement>,
    tunnel: Option<web::HtmlElement>,
    skip_button: Option<&str>,
) -> anyhow::Result<SharedIntro> {
    let failsafe_sec = seq.timeline().failsafe_sec;
    seq.start(0.0);
    let driver = Rc::new(RefCell::new(IntroDriver {
        kind,
        seq,
        origin: Instant::now(),
        overlay,
        tunnel,
        failsafe: None,
        skip: None,
    }));

    let weak: Weak<RefCell<IntroDriver>> = Rc::downgrade(&driver);
    let failsafe = Timeout::from_secs(failsafe_sec, move || {
        if let Some(d) = weak.upgrade() {
            d.borrow_mut().on_failsafe();
        }
    })?;

    let skip = match skip_button {
        Some(id) => {
            let weak = Rc::downgrade(&driver);
            dom::add_click_listener(document, id, move || {
                if let Some(d) = weak.upgrade() {
                    d.borrow_mut().skip();
                }
            })?
        }
        None => None,
    };

    {
        let mut d = driver.borrow_mut();
        d.failsafe = Some(failsafe);
        d.skip = skip;
    }
    log::info!("[intro] {:?} started, failsafe {:.1}s", kind, failsafe_sec);
    Ok(driver)
}

/// Start the landing wormhole if the page carries its overlay.
pub fn start_wormhole(
    document: &web::Document,
    timeline: IntroTimeline,
) -> anyhow::Result<Option<SharedIntro>> {
    let Some(overlay_el) = dom::html_element_by_id(document, INTRO_OVERLAY_ID) else {
        log::debug!("[intro] no #{INTRO_OVERLAY_ID}, skipping wormhole");
        return Ok(None);
    };
    let tunnel = dom::html_element_by_id(document, INTRO_TUNNEL_ID);
    overlay::show(&overlay_el);

    let release = overlay_el.clone();
    let seq = IntroSequencer::new(timeline, move || overlay::hide(&release));
    launch(
        document,
        IntroKind::Wormhole,
        seq,
        Some(overlay_el),
        tunnel,
        Some(INTRO_SKIP_ID),
    )
    .map(Some)
}

/// Play the portal warp, then open the portfolio hub.
pub fn start_portal(
    document: &web::Document,
    timeline: IntroTimeline,
) -> anyhow::Result<SharedIntro> {
    let overlay_el = dom::html_element_by_id(document, PORTAL_OVERLAY_ID);
    if let Some(el) = &overlay_el {
        overlay::show(el);
    }
    if let Some(body) = document.body() {
        _ = body.class_list().add_1(WARPING_CLASS);
    }
    if let Some(button) = dom::html_element_by_id(document, ENTER_PORTAL_ID) {
        overlay::hide(&button);
    }
    let seq = IntroSequencer::new(timeline, || dom::navigate(PORTAL_ROUTE));
    launch(document, IntroKind::Portal, seq, overlay_el, None, None)
}
