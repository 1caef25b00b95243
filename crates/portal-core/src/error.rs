use thiserror::Error;

/// Configuration errors surfaced by the core. Runtime input (pointer, time)
/// never fails; it is clamped or falls back instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PortalError {
    #[error("unknown scene preset `{0}`")]
    UnknownScene(String),
    #[error("invalid spring: stiffness={stiffness} damping={damping} mass={mass}")]
    InvalidSpring {
        stiffness: f32,
        damping: f32,
        mass: f32,
    },
    #[error("invalid output range: min={min} max={max}")]
    InvalidRange { min: f32, max: f32 },
}

pub type Result<T> = std::result::Result<T, PortalError>;
