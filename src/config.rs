use serde::{Deserialize, Serialize};

use crate::telemetry::LogLevel;

pub const DEFAULT_SETTLE_DELAY_MS: u32 = 500;
pub const DEFAULT_LOAD_FALLBACK_MS: u32 = 3_000;
pub const DEFAULT_VISIBILITY_FALLBACK_MS: u32 = 5_000;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.8;
pub const DEFAULT_SKILLS_LIMIT: usize = 8;
pub const DEFAULT_SKILLS_SETTLE_MS: u32 = 50;
pub const DEFAULT_NAV_SCROLL_DELAY_MS: u32 = 300;
pub const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const DEFAULT_AMBIENT_PARTICLES: usize = 50;
pub const DEFAULT_PORTFOLIO_PARTICLES: usize = 15;
pub const DEFAULT_SKILLS_PARTICLES: usize = 12;
pub const DEFAULT_CONTACT_PARTICLES: usize = 10;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SETTLE_DELAY_MS_BOUNDS: (u32, u32) = (0, 5_000);
const LOAD_FALLBACK_MS_BOUNDS: (u32, u32) = (100, 30_000);
const VISIBILITY_FALLBACK_MS_BOUNDS: (u32, u32) = (100, 60_000);
const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.5, 1.0);
const SKILLS_LIMIT_BOUNDS: (usize, usize) = (1, 64);
const SKILLS_SETTLE_MS_BOUNDS: (u32, u32) = (0, 1_000);
const NAV_SCROLL_DELAY_MS_BOUNDS: (u32, u32) = (0, 2_000);
const MOBILE_BREAKPOINT_PX_BOUNDS: (f64, f64) = (240.0, 2_048.0);
const PARTICLE_COUNT_BOUNDS: (usize, usize) = (0, 200);
const PARALLAX_AMPLITUDE_BOUNDS: (f64, f64) = (0.0, 200.0);
const PARALLAX_COEFFICIENT_BOUNDS: (f64, f64) = (-5.0, 5.0);
const PARALLAX_DURATION_BOUNDS: (f64, f64) = (0.0, 5.0);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("motion config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning for the intro, choreography and decorative effects.
///
/// Every source goes through [`MotionConfig::sanitized`]; a value outside its
/// bounds reverts to its default instead of failing the whole document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    pub settle_delay_ms: u32,
    pub load_fallback_ms: u32,
    pub visibility_fallback_ms: u32,
    pub reveal_threshold: f64,
    pub skills_limit: usize,
    pub skills_settle_ms: u32,
    pub nav_scroll_delay_ms: u32,
    pub mobile_breakpoint_px: f64,
    pub particles: ParticleCounts,
    pub parallax: ParallaxConfig,
    pub log_level: LogLevel,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            load_fallback_ms: DEFAULT_LOAD_FALLBACK_MS,
            visibility_fallback_ms: DEFAULT_VISIBILITY_FALLBACK_MS,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            skills_limit: DEFAULT_SKILLS_LIMIT,
            skills_settle_ms: DEFAULT_SKILLS_SETTLE_MS,
            nav_scroll_delay_ms: DEFAULT_NAV_SCROLL_DELAY_MS,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            particles: ParticleCounts::default(),
            parallax: ParallaxConfig::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl MotionConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let parsed: Self = serde_json::from_str(raw)?;
        Ok(parsed.sanitized())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            settle_delay_ms: parse_env_with_bounds(
                "MOTION_SETTLE_DELAY_MS",
                DEFAULT_SETTLE_DELAY_MS,
                SETTLE_DELAY_MS_BOUNDS,
            ),
            load_fallback_ms: parse_env_with_bounds(
                "MOTION_LOAD_FALLBACK_MS",
                DEFAULT_LOAD_FALLBACK_MS,
                LOAD_FALLBACK_MS_BOUNDS,
            ),
            visibility_fallback_ms: parse_env_with_bounds(
                "MOTION_VISIBILITY_FALLBACK_MS",
                DEFAULT_VISIBILITY_FALLBACK_MS,
                VISIBILITY_FALLBACK_MS_BOUNDS,
            ),
            reveal_threshold: parse_env_with_bounds(
                "MOTION_REVEAL_THRESHOLD",
                DEFAULT_REVEAL_THRESHOLD,
                REVEAL_THRESHOLD_BOUNDS,
            ),
            skills_limit: parse_env_with_bounds(
                "MOTION_SKILLS_LIMIT",
                DEFAULT_SKILLS_LIMIT,
                SKILLS_LIMIT_BOUNDS,
            ),
            nav_scroll_delay_ms: parse_env_with_bounds(
                "MOTION_NAV_SCROLL_DELAY_MS",
                DEFAULT_NAV_SCROLL_DELAY_MS,
                NAV_SCROLL_DELAY_MS_BOUNDS,
            ),
            particles: ParticleCounts {
                ambient: parse_env_with_bounds(
                    "MOTION_AMBIENT_PARTICLES",
                    DEFAULT_AMBIENT_PARTICLES,
                    PARTICLE_COUNT_BOUNDS,
                ),
                ..defaults.particles
            },
            log_level: std::env::var("MOTION_LOG_LEVEL")
                .ok()
                .and_then(|value| LogLevel::parse(&value))
                .unwrap_or(DEFAULT_LOG_LEVEL),
            ..defaults
        }
        .sanitized()
    }

    pub fn sanitized(self) -> Self {
        let load_fallback_ms = within(
            self.load_fallback_ms,
            DEFAULT_LOAD_FALLBACK_MS,
            LOAD_FALLBACK_MS_BOUNDS,
        );
        let visibility_fallback_ms = within(
            self.visibility_fallback_ms,
            DEFAULT_VISIBILITY_FALLBACK_MS,
            VISIBILITY_FALLBACK_MS_BOUNDS,
        )
        .max(load_fallback_ms);

        Self {
            settle_delay_ms: within(
                self.settle_delay_ms,
                DEFAULT_SETTLE_DELAY_MS,
                SETTLE_DELAY_MS_BOUNDS,
            ),
            load_fallback_ms,
            visibility_fallback_ms,
            reveal_threshold: within(
                self.reveal_threshold,
                DEFAULT_REVEAL_THRESHOLD,
                REVEAL_THRESHOLD_BOUNDS,
            ),
            skills_limit: within(self.skills_limit, DEFAULT_SKILLS_LIMIT, SKILLS_LIMIT_BOUNDS),
            skills_settle_ms: within(
                self.skills_settle_ms,
                DEFAULT_SKILLS_SETTLE_MS,
                SKILLS_SETTLE_MS_BOUNDS,
            ),
            nav_scroll_delay_ms: within(
                self.nav_scroll_delay_ms,
                DEFAULT_NAV_SCROLL_DELAY_MS,
                NAV_SCROLL_DELAY_MS_BOUNDS,
            ),
            mobile_breakpoint_px: within(
                self.mobile_breakpoint_px,
                DEFAULT_MOBILE_BREAKPOINT_PX,
                MOBILE_BREAKPOINT_PX_BOUNDS,
            ),
            particles: self.particles.sanitized(),
            parallax: self.parallax.sanitized(),
            log_level: self.log_level,
        }
    }

    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width < self.mobile_breakpoint_px
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleCounts {
    pub ambient: usize,
    pub portfolio: usize,
    pub skills: usize,
    pub contact: usize,
}

impl Default for ParticleCounts {
    fn default() -> Self {
        Self {
            ambient: DEFAULT_AMBIENT_PARTICLES,
            portfolio: DEFAULT_PORTFOLIO_PARTICLES,
            skills: DEFAULT_SKILLS_PARTICLES,
            contact: DEFAULT_CONTACT_PARTICLES,
        }
    }
}

impl ParticleCounts {
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            ambient: within(self.ambient, defaults.ambient, PARTICLE_COUNT_BOUNDS),
            portfolio: within(self.portfolio, defaults.portfolio, PARTICLE_COUNT_BOUNDS),
            skills: within(self.skills, defaults.skills, PARTICLE_COUNT_BOUNDS),
            contact: within(self.contact, defaults.contact, PARTICLE_COUNT_BOUNDS),
        }
    }
}

/// Per-layer parallax response for one pointer kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerProfile {
    pub amplitude: f64,
    pub headline: LayerResponse,
    pub sky: LayerResponse,
    pub background: LayerResponse,
    pub character: LayerResponse,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerResponse {
    pub coefficient: f64,
    pub mobile_coefficient: f64,
    pub duration: f64,
}

impl LayerResponse {
    pub const fn new(coefficient: f64, mobile_coefficient: f64, duration: f64) -> Self {
        Self {
            coefficient,
            mobile_coefficient,
            duration,
        }
    }

    fn sanitized(self, fallback: Self) -> Self {
        Self {
            coefficient: within(
                self.coefficient,
                fallback.coefficient,
                PARALLAX_COEFFICIENT_BOUNDS,
            ),
            mobile_coefficient: within(
                self.mobile_coefficient,
                fallback.mobile_coefficient,
                PARALLAX_COEFFICIENT_BOUNDS,
            ),
            duration: within(self.duration, fallback.duration, PARALLAX_DURATION_BOUNDS),
        }
    }
}

impl PointerProfile {
    pub const MOUSE: Self = Self {
        amplitude: 40.0,
        headline: LayerResponse::new(0.4, 0.2, 0.3),
        sky: LayerResponse::new(1.0, 1.0, 0.3),
        background: LayerResponse::new(1.7, 1.7, 0.3),
        character: LayerResponse::new(0.5, 0.2, 0.4),
    };

    pub const TOUCH: Self = Self {
        amplitude: 30.0,
        headline: LayerResponse::new(0.3, 0.1, 0.4),
        sky: LayerResponse::new(0.8, 0.8, 0.4),
        background: LayerResponse::new(1.2, 1.2, 0.4),
        character: LayerResponse::new(0.3, 0.3, 0.5),
    };

    fn sanitized(self, fallback: Self) -> Self {
        Self {
            amplitude: within(self.amplitude, fallback.amplitude, PARALLAX_AMPLITUDE_BOUNDS),
            headline: self.headline.sanitized(fallback.headline),
            sky: self.sky.sanitized(fallback.sky),
            background: self.background.sanitized(fallback.background),
            character: self.character.sanitized(fallback.character),
        }
    }
}

/// Fields a tuning document may set on one pointer profile; the rest come
/// from that pointer's own defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PointerProfilePatch {
    amplitude: Option<f64>,
    headline: Option<LayerResponse>,
    sky: Option<LayerResponse>,
    background: Option<LayerResponse>,
    character: Option<LayerResponse>,
}

impl PointerProfilePatch {
    fn over(self, base: PointerProfile) -> PointerProfile {
        PointerProfile {
            amplitude: self.amplitude.unwrap_or(base.amplitude),
            headline: self.headline.unwrap_or(base.headline),
            sky: self.sky.unwrap_or(base.sky),
            background: self.background.unwrap_or(base.background),
            character: self.character.unwrap_or(base.character),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParallaxConfigPatch {
    mouse: PointerProfilePatch,
    touch: PointerProfilePatch,
}

impl From<ParallaxConfigPatch> for ParallaxConfig {
    fn from(patch: ParallaxConfigPatch) -> Self {
        Self {
            mouse: patch.mouse.over(PointerProfile::MOUSE),
            touch: patch.touch.over(PointerProfile::TOUCH),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParallaxConfigPatch")]
pub struct ParallaxConfig {
    pub mouse: PointerProfile,
    pub touch: PointerProfile,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            mouse: PointerProfile::MOUSE,
            touch: PointerProfile::TOUCH,
        }
    }
}

impl ParallaxConfig {
    fn sanitized(self) -> Self {
        Self {
            mouse: self.mouse.sanitized(PointerProfile::MOUSE),
            touch: self.touch.sanitized(PointerProfile::TOUCH),
        }
    }
}

fn within<T: PartialOrd>(value: T, default: T, bounds: (T, T)) -> T {
    if value >= bounds.0 && value <= bounds.1 {
        value
    } else {
        default
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_env_with_bounds<T>(name: &str, default: T, bounds: (T, T)) -> T
where
    T: PartialOrd + Copy + std::str::FromStr,
{
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .map(|value| within(value, default, bounds))
        .unwrap_or(default)
}
