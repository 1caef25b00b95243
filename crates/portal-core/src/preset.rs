use crate::binder::{AxisMap, SceneBinder, SceneBinding};
use crate::camera::IntroDolly;
use crate::constants::{
    RANGE_HUB_X, RANGE_HUB_Y, RANGE_WIDE_X, RANGE_WIDE_Y, SPRING_CORRIDOR, SPRING_FOREST,
    SPRING_OVERLAY, SPRING_SOFT,
};
use crate::error::PortalError;
use crate::intro::IntroTimeline;
use crate::normalize::AxisRanges;
use crate::spring::SpringConfig;
use std::fmt;
use std::str::FromStr;

/// Page selected by `<body data-scene="...">`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenePreset {
    Landing,
    About,
    Inspirations,
    Projects,
    Upcoming,
    Portfolio,
    Corridor,
    Forest,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 8] = [
        ScenePreset::Landing,
        ScenePreset::About,
        ScenePreset::Inspirations,
        ScenePreset::Projects,
        ScenePreset::Upcoming,
        ScenePreset::Portfolio,
        ScenePreset::Corridor,
        ScenePreset::Forest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Landing => "landing",
            ScenePreset::About => "about",
            ScenePreset::Inspirations => "inspirations",
            ScenePreset::Projects => "projects",
            ScenePreset::Upcoming => "upcoming",
            ScenePreset::Portfolio => "portfolio",
            ScenePreset::Corridor => "corridor",
            ScenePreset::Forest => "forest",
        }
    }

    pub fn config(self) -> SceneConfig {
        let overlay = SceneBinding::Translate2D {
            x: AxisMap::IDENTITY,
            y: AxisMap::IDENTITY,
        };
        let wide = AxisRanges::symmetric(RANGE_WIDE_X, RANGE_WIDE_Y);
        match self {
            // The wormhole plays over the corridor hub, so landing shares its motion
            ScenePreset::Landing => SceneConfig {
                ranges: AxisRanges::symmetric(RANGE_HUB_X, RANGE_HUB_Y),
                spring: SpringConfig::preset(SPRING_SOFT),
                binder: SceneBinder::new([overlay]),
                spotlight: true,
                intro: Some(IntroTimeline::wormhole()),
                dolly: None,
            },
            ScenePreset::About
            | ScenePreset::Inspirations
            | ScenePreset::Projects
            | ScenePreset::Upcoming => SceneConfig {
                ranges: wide,
                spring: SpringConfig::preset(SPRING_OVERLAY),
                binder: SceneBinder::new([overlay]),
                spotlight: false,
                intro: None,
                dolly: None,
            },
            ScenePreset::Portfolio => SceneConfig {
                ranges: AxisRanges::symmetric(RANGE_HUB_X, RANGE_HUB_Y),
                spring: SpringConfig::preset(SPRING_SOFT),
                binder: SceneBinder::new([overlay]),
                spotlight: false,
                intro: None,
                dolly: None,
            },
            // Looking up should tilt the corridor down, hence the inverted pitch
            ScenePreset::Corridor => SceneConfig {
                ranges: wide,
                spring: SpringConfig::preset(SPRING_CORRIDOR),
                binder: SceneBinder::new([SceneBinding::CameraTilt {
                    yaw: AxisMap::IDENTITY,
                    pitch: AxisMap::INVERTED,
                }]),
                spotlight: false,
                intro: None,
                dolly: None,
            },
            ScenePreset::Forest => SceneConfig {
                ranges: wide,
                spring: SpringConfig::preset(SPRING_FOREST),
                binder: SceneBinder::new([SceneBinding::CameraTilt {
                    yaw: AxisMap::scaled(0.5),
                    pitch: AxisMap {
                        gain: 0.5,
                        invert: true,
                    },
                }]),
                spotlight: false,
                intro: None,
                dolly: Some(IntroDolly::default()),
            },
        }
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenePreset {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ScenePreset::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| PortalError::UnknownScene(s.to_string()))
    }
}

/// Static configuration of one page.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub ranges: AxisRanges,
    pub spring: SpringConfig,
    pub binder: SceneBinder,
    /// Expose the raw pointer position for a pointer-following glow.
    pub spotlight: bool,
    pub intro: Option<IntroTimeline>,
    pub dolly: Option<IntroDolly>,
}
