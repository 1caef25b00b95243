use glam::Vec2;
use smallvec::SmallVec;

/// Per-axis coefficient applied to a smoothed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisMap {
    pub gain: f32,
    pub invert: bool,
}

impl AxisMap {
    pub const IDENTITY: Self = Self {
        gain: 1.0,
        invert: false,
    };
    pub const INVERTED: Self = Self {
        gain: 1.0,
        invert: true,
    };

    pub const fn scaled(gain: f32) -> Self {
        Self {
            gain,
            invert: false,
        }
    }

    #[inline]
    pub fn apply(&self, v: f32) -> f32 {
        let v = v * self.gain;
        if self.invert {
            -v
        } else {
            v
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneBinding {
    /// 2D translation of an overlay, in CSS pixels.
    Translate2D { x: AxisMap, y: AxisMap },
    /// Camera rotation in degrees: yaw follows x, pitch follows y.
    CameraTilt { yaw: AxisMap, pitch: AxisMap },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraTilt {
    pub yaw_deg: f32,
    pub pitch_deg: f32,
}

/// Visual parameters for one frame. `None` means the scene has no binding of
/// that kind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneTransform {
    pub translate: Option<Vec2>,
    pub tilt: Option<CameraTilt>,
    /// Raw pointer position in px, for pages with a pointer-following glow.
    pub spotlight: Option<Vec2>,
}

impl SceneTransform {
    pub fn css_translate(&self) -> Option<String> {
        self.translate
            .map(|t| format!("translate3d({:.3}px, {:.3}px, 0px)", t.x, t.y))
    }

    /// Rotation for a CSS 3D rig such as the corridor walls.
    pub fn css_tilt(&self, perspective_px: f32) -> Option<String> {
        self.tilt.map(|t| {
            format!(
                "perspective({:.0}px) rotateX({:.3}deg) rotateY({:.3}deg)",
                perspective_px, t.pitch_deg, t.yaw_deg
            )
        })
    }
}

/// Static per-scene mapping from smoothed offset to visual parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneBinder {
    bindings: SmallVec<[SceneBinding; 2]>,
}

impl SceneBinder {
    pub fn new(bindings: impl IntoIterator<Item = SceneBinding>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn bindings(&self) -> &[SceneBinding] {
        &self.bindings
    }

    /// Bindings of the same kind accumulate.
    pub fn apply(&self, smoothed: Vec2) -> SceneTransform {
        let mut out = SceneTransform::default();
        for b in &self.bindings {
            match *b {
                SceneBinding::Translate2D { x, y } => {
                    let t = out.translate.get_or_insert(Vec2::ZERO);
                    t.x += x.apply(smoothed.x);
                    t.y += y.apply(smoothed.y);
                }
                SceneBinding::CameraTilt { yaw, pitch } => {
                    let t = out.tilt.get_or_insert_with(CameraTilt::default);
                    t.yaw_deg += yaw.apply(smoothed.x);
                    t.pitch_deg += pitch.apply(smoothed.y);
                }
            }
        }
        out
    }
}
