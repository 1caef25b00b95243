pub mod keyboard;
pub mod keymap;
pub mod pointer;

pub use keymap::KeyAction;
pub use pointer::PointerSubscription;
