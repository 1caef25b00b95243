use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One-shot `setTimeout` that is cleared when dropped.
pub struct Timeout {
    window: web::Window,
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(delay_ms: i32, callback: impl FnOnce() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(cb) = callback.take() {
                cb();
            }
        }) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.max(0),
            )
            .map_err(|e| anyhow::anyhow!("setTimeout: {:?}", e))?;
        Ok(Self {
            window,
            id,
            _closure: closure,
        })
    }

    pub fn from_secs(delay_sec: f32, callback: impl FnOnce() + 'static) -> anyhow::Result<Self> {
        Self::new((delay_sec * 1000.0).round() as i32, callback)
    }

    /// Stop the timer without releasing the closure. Safe from inside any handler.
    pub fn cancel(&self) {
        self.window.clear_timeout_with_handle(self.id);
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
