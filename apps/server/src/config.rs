use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Server configuration, loaded from a JSON file with env overrides on top.
///
/// Every field has a sensible default so the server starts with no config
/// file at all (demo mode needs nothing).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub poller: PollerSettings,
    pub analysis: AnalysisSettings,
    pub providers: ProviderSettings,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poller: PollerSettings::default(),
            analysis: AnalysisSettings::default(),
            providers: ProviderSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerSettings {
    /// Seconds between odds re-fetches.
    pub interval_secs: u64,
    /// Seconds between stats broadcasts to connected dashboards.
    pub stats_interval_secs: u64,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            stats_interval_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Stake used when a dashboard asks for opportunities without an
    /// explicit investment.
    pub default_investment: f64,
    /// Opportunities with profit below this are not surfaced.
    pub min_profit: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_investment: 1000.0,
            min_profit: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key for The Odds API (upcoming fixtures).
    pub odds_api_key: Option<String>,
    /// RapidAPI key for the live odds feed.
    pub rapid_api_key: Option<String>,
}

impl AppConfig {
    /// Loads config from `path`, falling back to defaults when the file is
    /// missing or malformed. A bad config file should not keep the server
    /// from starting.
    pub fn load(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!(path, "config file not found, using defaults");
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(config) => {
                    info!(path, "loaded config");
                    config.sanitized()
                }
                Err(e) => {
                    warn!(path, error = %e, "config file is malformed, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path, error = %e, "failed to read config file, using defaults");
                Self::default()
            }
        }
    }

    /// Overlays provider keys from the environment. Env vars win over the
    /// config file so keys can stay out of version control.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("ODDS_API_KEY") {
            if !key.is_empty() {
                self.providers.odds_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("RAPID_API_KEY") {
            if !key.is_empty() {
                self.providers.rapid_api_key = Some(key);
            }
        }
    }

    pub fn has_any_provider(&self) -> bool {
        self.providers.odds_api_key.is_some() || self.providers.rapid_api_key.is_some()
    }

    fn sanitized(mut self) -> Self {
        if !self.analysis.default_investment.is_finite() || self.analysis.default_investment <= 0.0
        {
            warn!(
                value = self.analysis.default_investment,
                "default_investment must be positive, falling back to 1000"
            );
            self.analysis.default_investment = 1000.0;
        }
        if !self.analysis.min_profit.is_finite() {
            warn!(
                value = self.analysis.min_profit,
                "min_profit must be a finite number, falling back to 0"
            );
            self.analysis.min_profit = 0.0;
        }
        if self.poller.interval_secs == 0 {
            warn!("poller interval of 0 would spin, falling back to 60s");
            self.poller.interval_secs = 60;
        }
        self
    }
}
