use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::error::*;
use crate::poller::PollerConfig;
use crate::tracker::FirstSeenPolicy;

pub const DEFAULT_INTERVAL_MIN: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Contents of `kwatch.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub slack_webhook: Option<String>,
    pub interval_min: Option<u64>,
    pub first_seen: Option<FirstSeenPolicy>,
    pub request_timeout_secs: Option<u64>,
    pub lifecycle_messages: Option<bool>,
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "kwatch.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        std::str::from_utf8(file.data.as_ref()).unwrap().to_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: impl AsRef<Path>) -> Result<Self> {
        let filepath = filepath.as_ref();
        let toml = std::fs::read_to_string(filepath)
            .with_context(|| format!("Cannot read config file {:?}", filepath))?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath.to_owned());
        Ok(cfg)
    }

    /// Missing file is not an error; the built-in defaults apply.
    pub fn from_toml_file_or_default(filepath: impl AsRef<Path>) -> Result<Self> {
        let filepath = filepath.as_ref();
        if !filepath.is_file() {
            log::debug!("No config file at {:?}; using defaults", filepath);
            return Ok(Self::default());
        }
        Self::from_toml_file(filepath)
    }

    /// Timeout applied to every outbound HTTP request; zero is rejected.
    pub fn request_timeout(&self) -> Result<Duration> {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        ensure!(
            secs >= 1,
            "request_timeout_secs must be >= 1 second (got {})",
            secs
        );
        Ok(Duration::from_secs(secs))
    }
}

/// Converts a minute count into the poll interval, rejecting zero.
pub fn interval_from_minutes(min: u64) -> Result<Duration> {
    ensure!(min >= 1, "Interval must be >= 1 minute (got {})", min);
    let secs = min
        .checked_mul(60)
        .with_context(|| format!("Interval too large: {} min", min))?;
    Ok(Duration::from_secs(secs))
}

impl PollerConfig {
    /// Fills values not given on the command line from the config file.
    pub fn from_config(
        cfg: &Config,
        interval_min: Option<u64>,
        first_seen: Option<FirstSeenPolicy>,
    ) -> Result<Self> {
        let min = interval_min
            .or(cfg.interval_min)
            .unwrap_or(DEFAULT_INTERVAL_MIN);
        Ok(Self {
            interval: interval_from_minutes(min)?,
            first_seen: first_seen.or(cfg.first_seen).unwrap_or_default(),
            lifecycle_messages: cfg.lifecycle_messages.unwrap_or(true),
        })
    }
}
