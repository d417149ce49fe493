use crate::constants::DEFAULT_MAX_DEVICE_PIXEL_RATIO;
use crate::travel::TravelSmoothing;

/// Base path baked in at build time (`PORTFOLIO_BASE_PATH=/app cargo build ...`).
const ENV_BASE_PATH: Option<&str> = option_env!("PORTFOLIO_BASE_PATH");

/// Canvas attributes that override the build-time defaults.
pub const ATTR_BASE_PATH: &str = "data-base-path";
pub const ATTR_SMOOTHING: &str = "data-smoothing";
pub const ATTR_MAX_DPR: &str = "data-max-dpr";

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub base_path: Option<String>,
    pub smoothing: TravelSmoothing,
    pub max_device_pixel_ratio: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: non_empty(ENV_BASE_PATH),
            smoothing: TravelSmoothing::default(),
            max_device_pixel_ratio: DEFAULT_MAX_DEVICE_PIXEL_RATIO,
        }
    }
}

impl SiteConfig {
    /// Build a config from the defaults, overridden by whatever `lookup`
    /// returns for the known attribute names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(base) = lookup(ATTR_BASE_PATH) {
            cfg.base_path = non_empty(Some(base.as_str()));
        }
        if let Some(mode) = lookup(ATTR_SMOOTHING) {
            match TravelSmoothing::parse(&mode) {
                Some(s) => cfg.smoothing = s,
                None => log::warn!("[config] ignoring unknown {ATTR_SMOOTHING}={mode:?}"),
            }
        }
        if let Some(raw) = lookup(ATTR_MAX_DPR) {
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 1.0 => cfg.max_device_pixel_ratio = v,
                _ => log::warn!("[config] ignoring invalid {ATTR_MAX_DPR}={raw:?}"),
            }
        }
        cfg
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
