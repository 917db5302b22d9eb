use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::feed::OrderingConfig;
use crate::scores::ChartConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub ordering: OrderingConfig,
    pub chart: ChartConfig,
}

impl FeedConfig {
    /// Loads from `path`, `FEED_CONFIG_PATH` or `config/feed.toml`, in that
    /// order. A missing file yields defaults; environment overrides apply last.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| Error::Config(format!("failed to read config: {}", err)))?;
                toml::from_str(&contents)
                    .map_err(|err| Error::Config(format!("failed to parse config: {}", err)))?
            }
            _ => FeedConfig::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| Error::Config(format!("failed to serialize config: {}", err)))?;
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let ratio = self.ordering.friend_ratio;
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(Error::Config(format!(
                "ordering.friend_ratio must be in (0, 1], got {}",
                ratio
            )));
        }
        if !self.chart.max_bar_height.is_finite() || self.chart.max_bar_height <= 0.0 {
            return Err(Error::Config(format!(
                "chart.max_bar_height must be positive, got {}",
                self.chart.max_bar_height
            )));
        }
        if !self.chart.low_share_boost.is_finite() || self.chart.low_share_boost < 1.0 {
            return Err(Error::Config(format!(
                "chart.low_share_boost must be at least 1.0, got {}",
                self.chart.low_share_boost
            )));
        }
        let threshold = self.chart.boost_threshold_percent;
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "chart.boost_threshold_percent must be within 0..=100, got {}",
                threshold
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(ratio) = env::var("FEED_FRIEND_RATIO") {
            if let Ok(value) = ratio.parse::<f64>() {
                self.ordering.friend_ratio = value;
            }
        }
        if let Ok(height) = env::var("FEED_MAX_BAR_HEIGHT") {
            if let Ok(value) = height.parse::<f64>() {
                self.chart.max_bar_height = value;
            }
        }
        if let Ok(boost) = env::var("FEED_LOW_SHARE_BOOST") {
            if let Ok(value) = boost.parse::<f64>() {
                self.chart.low_share_boost = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("FEED_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/feed.toml")))
}
