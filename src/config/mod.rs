use crate::config::error::{ConfigError, ConfigResult};
use crate::geometry::{GeometryConfig, MAX_SCALE_LIMIT};
use crate::http::USER_AGENT;
use crate::vtt::timestamp::TimestampPrecision;
use log::debug;
use std::str::FromStr;

pub mod error;

pub const ENV_TRACK_FRACTION: &str = "VTT_THUMBNAILS_TRACK_FRACTION";
pub const ENV_MAX_SCALE: &str = "VTT_THUMBNAILS_MAX_SCALE";
pub const ENV_BASELINE_LIFT: &str = "VTT_THUMBNAILS_BASELINE_LIFT";
pub const ENV_TIMESTAMP_PRECISION: &str = "VTT_THUMBNAILS_TIMESTAMP_PRECISION";
pub const ENV_REQUESTS_PER_SECOND: &str = "VTT_THUMBNAILS_REQUESTS_PER_SECOND";
pub const ENV_MAX_CUE_SHEET_BYTES: &str = "VTT_THUMBNAILS_MAX_CUE_SHEET_BYTES";
pub const ENV_USER_AGENT: &str = "VTT_THUMBNAILS_USER_AGENT";

#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailsConfig {
    pub geometry: GeometryConfig,
    pub timestamp_precision: TimestampPrecision,
    pub requests_per_second: u64,
    pub max_cue_sheet_bytes: usize,
    pub user_agent: String,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            timestamp_precision: TimestampPrecision::default(),
            requests_per_second: 2,
            max_cue_sheet_bytes: 4 * 1024 * 1024,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ThumbnailsConfig {
    /// Defaults overridden by `VTT_THUMBNAILS_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(value) = read(&lookup, ENV_TRACK_FRACTION)? {
            config.geometry.track_fraction = positive(ENV_TRACK_FRACTION, value)?;
        }
        if let Some(value) = read(&lookup, ENV_MAX_SCALE)? {
            let value = positive(ENV_MAX_SCALE, value)?;
            if value > MAX_SCALE_LIMIT {
                return Err(invalid(ENV_MAX_SCALE, value));
            }
            config.geometry.max_scale = value;
        }
        if let Some(value) = read(&lookup, ENV_BASELINE_LIFT)? {
            config.geometry.baseline_lift = value;
        }
        if let Some(value) = read(&lookup, ENV_TIMESTAMP_PRECISION)? {
            config.timestamp_precision = value;
        }
        if let Some(value) = read::<u64>(&lookup, ENV_REQUESTS_PER_SECOND)? {
            if value == 0 {
                return Err(invalid(ENV_REQUESTS_PER_SECOND, value));
            }
            config.requests_per_second = value;
        }
        if let Some(value) = read(&lookup, ENV_MAX_CUE_SHEET_BYTES)? {
            config.max_cue_sheet_bytes = value;
        }
        if let Some(value) = lookup(ENV_USER_AGENT) {
            config.user_agent = value;
        }

        debug!("Loaded config: {config:?}");

        Ok(config)
    }
}

impl FromStr for TimestampPrecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" | "seconds" => Ok(TimestampPrecision::Truncate),
            "millisecond" | "milliseconds" | "ms" => Ok(TimestampPrecision::Millisecond),
            other => Err(other.to_string()),
        }
    }
}

fn read<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> ConfigResult<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

fn positive(key: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(key, value))
    }
}

fn invalid(key: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}
