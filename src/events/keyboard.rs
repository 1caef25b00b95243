use super::keymap::{key_action, should_handle, KeyAction};
use crate::dom::EventListener;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Route key presses to the page actions. `on_action` runs inside the
/// keydown handler, so it must not drop this listener.
pub fn wire_keydown(
    window: &web::Window,
    mut on_action: impl FnMut(KeyAction) + 'static,
) -> anyhow::Result<EventListener> {
    EventListener::typed(window, "keydown", move |ev: web::KeyboardEvent| {
        let tag = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|el| el.tag_name());
        if !should_handle(ev.repeat(), tag.as_deref()) {
            return;
        }
        if let Some(action) = key_action(&ev.key()) {
            log::debug!("[keys] {:?}", action);
            ev.prevent_default();
            on_action(action);
        }
    })
}
