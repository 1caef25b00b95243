pub mod binder;
pub mod camera;
pub mod constants;
pub mod ease;
pub mod error;
pub mod forest;
pub mod intro;
pub mod normalize;
pub mod parallax;
pub mod pointer;
pub mod preset;
pub mod spring;

pub use binder::*;
pub use camera::*;
pub use ease::Ease;
pub use error::PortalError;
pub use intro::*;
pub use normalize::*;
pub use parallax::ParallaxMapper;
pub use pointer::*;
pub use preset::*;
pub use spring::*;
