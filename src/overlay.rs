use crate::constants::HIDDEN_CLASS;
use crate::dom::set_style;
use portal_core::WormholeFrame;
use web_sys as web;

#[inline]
pub fn show(el: &web::HtmlElement) {
    _ = el.class_list().remove_1(HIDDEN_CLASS);
    // fallback for pages without the CSS class
    _ = el.style().remove_property("display");
    set_style(el, "opacity", "1");
}

#[inline]
pub fn hide(el: &web::HtmlElement) {
    _ = el.class_list().add_1(HIDDEN_CLASS);
    // fallback
    set_style(el, "display", "none");
    set_style(el, "pointer-events", "none");
}

/// Write one wormhole frame: overlay fade plus tunnel spin and shrink.
pub fn apply_wormhole(overlay: &web::HtmlElement, tunnel: Option<&web::HtmlElement>, f: WormholeFrame) {
    set_style(overlay, "opacity", &format!("{:.3}", f.overlay_opacity));
    if let Some(t) = tunnel {
        set_style(
            t,
            "transform",
            &format!(
                "rotate({:.2}deg) scale({:.4})",
                f.tunnel_rotate_deg, f.tunnel_scale
            ),
        );
    }
}
