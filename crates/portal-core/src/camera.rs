//! Camera description plus the pointer-driven rig and intro dolly used by the
//! 3D scenes.
//!
//! These types avoid platform APIs; the web renderer only consumes the
//! resulting matrices.

use crate::binder::CameraTilt;
use crate::constants::{
    DOLLY_FROM, DOLLY_LOOK_AT, DOLLY_SEC, DOLLY_TO, FOREST_FOV_DEG, FOREST_ZFAR, FOREST_ZNEAR,
};
use crate::ease::Ease;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn forest(aspect: f32) -> Self {
        Self {
            eye: DOLLY_TO,
            target: DOLLY_LOOK_AT,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                16.0 / 9.0
            },
            fovy_radians: FOREST_FOV_DEG.to_radians(),
            znear: FOREST_ZNEAR,
            zfar: FOREST_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Eased camera move played once when a 3D scene mounts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroDolly {
    pub from: Vec3,
    pub to: Vec3,
    pub look_at: Vec3,
    pub duration_sec: f32,
    pub ease: Ease,
}

impl Default for IntroDolly {
    fn default() -> Self {
        Self {
            from: DOLLY_FROM,
            to: DOLLY_TO,
            look_at: DOLLY_LOOK_AT,
            duration_sec: DOLLY_SEC,
            ease: Ease::OutQuad,
        }
    }
}

impl IntroDolly {
    pub fn eye_at(&self, elapsed_sec: f32) -> Vec3 {
        let t = if self.duration_sec > 0.0 {
            elapsed_sec / self.duration_sec
        } else {
            1.0
        };
        self.from.lerp(self.to, self.ease.apply(t))
    }

    pub fn is_finished(&self, elapsed_sec: f32) -> bool {
        elapsed_sec >= self.duration_sec
    }
}

/// Orbits the eye around the look target by pointer-driven yaw and pitch.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub camera: Camera,
    base_eye: Vec3,
    dolly: Option<IntroDolly>,
    tilt: CameraTilt,
}

impl CameraRig {
    pub fn new(camera: Camera) -> Self {
        Self {
            base_eye: camera.eye,
            camera,
            dolly: None,
            tilt: CameraTilt::default(),
        }
    }

    /// Attach an intro dolly; the rig starts at the dolly's first pose.
    pub fn with_dolly(mut self, dolly: IntroDolly) -> Self {
        self.base_eye = dolly.from;
        self.camera.target = dolly.look_at;
        self.dolly = Some(dolly);
        self.update_eye();
        self
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    pub fn tilt(&self) -> CameraTilt {
        self.tilt
    }

    /// Advance the dolly to `elapsed_sec` and apply `tilt`.
    pub fn update(&mut self, elapsed_sec: f32, tilt: Option<CameraTilt>) -> &Camera {
        if let Some(d) = &self.dolly {
            self.base_eye = d.eye_at(elapsed_sec);
        }
        if let Some(t) = tilt {
            self.tilt = t;
        }
        self.update_eye();
        &self.camera
    }

    fn update_eye(&mut self) {
        let offset = self.base_eye - self.camera.target;
        let rot = Quat::from_euler(
            EulerRot::YXZ,
            self.tilt.yaw_deg.to_radians(),
            self.tilt.pitch_deg.to_radians(),
            0.0,
        );
        self.camera.eye = self.camera.target + rot * offset;
    }
}
