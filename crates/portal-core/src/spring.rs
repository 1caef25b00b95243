//! Damped-spring smoothing for pointer-driven values.
//!
//! A mass-spring-damper integrated with semi-implicit Euler at a fixed
//! substep. Under-damped parameters overshoot a little, like the springs the
//! pages were tuned with; long frame gaps are truncated so a throttled tab
//! cannot make the integration blow up.

use crate::constants::{
    SPRING_MASS, SPRING_MAX_FRAME_SEC, SPRING_REST_DELTA, SPRING_REST_SPEED, SPRING_SUBSTEP_SEC,
};
use crate::error::{PortalError, Result};
use crate::normalize::NormalizedOffset;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub rest_delta: f32,
    pub rest_speed: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32) -> Result<Self> {
        Self::with_mass(stiffness, damping, SPRING_MASS)
    }

    pub fn with_mass(stiffness: f32, damping: f32, mass: f32) -> Result<Self> {
        let valid = stiffness.is_finite()
            && damping.is_finite()
            && mass.is_finite()
            && stiffness > 0.0
            && damping >= 0.0
            && mass > 0.0;
        if !valid {
            return Err(PortalError::InvalidSpring {
                stiffness,
                damping,
                mass,
            });
        }
        Ok(Self {
            stiffness,
            damping,
            mass,
            rest_delta: SPRING_REST_DELTA,
            rest_speed: SPRING_REST_SPEED,
        })
    }

    /// Unchecked constructor for compile-time presets.
    pub(crate) const fn preset((stiffness, damping): (f32, f32)) -> Self {
        Self {
            stiffness,
            damping,
            mass: SPRING_MASS,
            rest_delta: SPRING_REST_DELTA,
            rest_speed: SPRING_REST_SPEED,
        }
    }

    /// Damping ratio ζ; 1.0 is critical, below that the spring overshoots.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// One smoothed scalar.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    pub value: f32,
    pub velocity: f32,
    config: SpringConfig,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            config,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn is_at_rest(&self, target: f32) -> bool {
        (target - self.value).abs() <= self.config.rest_delta
            && self.velocity.abs() <= self.config.rest_speed
    }

    /// Advance by `dt_sec` toward `target` and return the new value.
    pub fn step(&mut self, target: f32, dt_sec: f32) -> f32 {
        if !target.is_finite() {
            return self.value;
        }
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, SPRING_MAX_FRAME_SEC)
        } else {
            0.0
        };
        if dt == 0.0 {
            return self.value;
        }
        let steps = (dt / SPRING_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let SpringConfig {
            stiffness: k,
            damping: c,
            mass: m,
            ..
        } = self.config;
        for _ in 0..steps {
            let accel = (k * (target - self.value) - c * self.velocity) / m;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }
        if self.is_at_rest(target) {
            self.value = target;
            self.velocity = 0.0;
        }
        self.value
    }

    /// Jump to `value` with no motion.
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }
}

/// Two-axis smoothed pointer offset; each axis has its own spring sharing one
/// configuration.
#[derive(Clone, Copy, Debug)]
pub struct SmoothedOffset {
    pub x: Spring,
    pub y: Spring,
}

impl SmoothedOffset {
    pub fn new(config: SpringConfig, initial: NormalizedOffset) -> Self {
        Self {
            x: Spring::new(config, initial.x),
            y: Spring::new(config, initial.y),
        }
    }

    pub fn step(&mut self, target: NormalizedOffset, dt_sec: f32) -> Vec2 {
        Vec2::new(self.x.step(target.x, dt_sec), self.y.step(target.y, dt_sec))
    }

    pub fn value(&self) -> Vec2 {
        Vec2::new(self.x.value, self.y.value)
    }

    pub fn is_at_rest(&self, target: NormalizedOffset) -> bool {
        self.x.is_at_rest(target.x) && self.y.is_at_rest(target.y)
    }
}
