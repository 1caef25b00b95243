use crate::dom::{self, EventListener};
use portal_core::ParallaxMapper;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Window-level pointer, touch and resize listeners feeding one mapper.
///
/// Handlers only record the newest sample; the frame loop reads it on its
/// next tick. Dropping the subscription unregisters all three listeners.
pub struct PointerSubscription {
    _listeners: [EventListener; 3],
}

impl PointerSubscription {
    pub fn attach(
        window: &web::Window,
        mapper: Rc<RefCell<ParallaxMapper>>,
    ) -> anyhow::Result<Self> {
        let pointermove = {
            let mapper = mapper.clone();
            EventListener::typed(window, "pointermove", move |ev: web::PointerEvent| {
                mapper
                    .borrow_mut()
                    .record(ev.client_x() as f32, ev.client_y() as f32, ev.time_stamp());
            })?
        };

        let touchmove = {
            let mapper = mapper.clone();
            EventListener::typed(window, "touchmove", move |ev: web::TouchEvent| {
                if let Some(touch) = ev.touches().get(0) {
                    mapper.borrow_mut().record(
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                        ev.time_stamp(),
                    );
                }
            })?
        };

        let resize = {
            let win = window.clone();
            EventListener::new(window, "resize", move |_| {
                let (w, h) = dom::viewport_size(&win);
                mapper.borrow_mut().resize(w, h);
            })?
        };

        Ok(Self {
            _listeners: [pointermove, touchmove, resize],
        })
    }
}
