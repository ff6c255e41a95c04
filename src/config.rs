mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::risk::recommendations::DEFAULT_FACTOR_TRIGGER;
use crate::risk::trends::DEFAULT_TREND_WINDOW_DAYS;
use crate::risk::RiskThresholds;
use serde::{Deserialize, Serialize};

/// Settings read from `.pharmarisk.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PharmaRiskConfig {
    #[serde(default)]
    pub thresholds: RiskThresholds,

    #[serde(default)]
    pub recommendations: RecommendationConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Probability or impact above this flags a factor for a control review
    #[serde(default = "default_factor_trigger")]
    pub factor_trigger: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            factor_trigger: default_factor_trigger(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Individual score above which a factor is listed as high risk
    #[serde(default = "default_high_risk_score")]
    pub high_risk_score: f64,

    /// Trend window used by the full report
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            high_risk_score: default_high_risk_score(),
            trend_window_days: default_trend_window_days(),
        }
    }
}

impl PharmaRiskConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.recommendations.factor_trigger.is_finite() {
            return Err("recommendations.factor_trigger must be a finite number".to_string());
        }
        if !self.report.high_risk_score.is_finite() {
            return Err("report.high_risk_score must be a finite number".to_string());
        }
        Ok(())
    }
}

fn default_factor_trigger() -> f64 {
    DEFAULT_FACTOR_TRIGGER
}
fn default_high_risk_score() -> f64 {
    0.7
}
fn default_trend_window_days() -> u32 {
    DEFAULT_TREND_WINDOW_DAYS
}
