//! Location and client configuration with environment overrides.
//! Defaults point at Joplin, MO — site of the strongest recorded tornado —
//! but any lat/lon works.

use anyhow::{Context, Result};

pub const ENV_LAT: &str = "TORNADO_LAT";
pub const ENV_LON: &str = "TORNADO_LON";
pub const ENV_LOCATION: &str = "TORNADO_LOCATION";
pub const ENV_USER_AGENT: &str = "TORNADO_USER_AGENT";

pub const DEFAULT_LAT: f64 = 37.0842;
pub const DEFAULT_LON: f64 = -94.5133;
pub const DEFAULT_LOCATION: &str = "Joplin, MO";

/// api.weather.gov policy requires a User-Agent with contact info; override
/// via TORNADO_USER_AGENT with your own address.
pub const DEFAULT_USER_AGENT: &str = "tornado-likelihood/0.1 (contact@example.com)";

#[derive(Debug, Clone)]
pub struct Config {
    pub lat: f64,
    pub lon: f64,
    pub location: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lat: DEFAULT_LAT,
            lon: DEFAULT_LON,
            location: DEFAULT_LOCATION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Build from environment, falling back to defaults per variable.
    /// A set-but-unparseable coordinate is a startup error, not a silent
    /// fallback.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Config::default();

        if let Ok(v) = std::env::var(ENV_LAT) {
            cfg.lat = v
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{ENV_LAT} is not a valid latitude: {v:?}"))?;
        }
        if let Ok(v) = std::env::var(ENV_LON) {
            cfg.lon = v
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{ENV_LON} is not a valid longitude: {v:?}"))?;
        }
        if let Ok(v) = std::env::var(ENV_LOCATION) {
            if !v.trim().is_empty() {
                cfg.location = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var(ENV_USER_AGENT) {
            if !v.trim().is_empty() {
                cfg.user_agent = v.trim().to_string();
            }
        }

        Ok(cfg)
    }
}
