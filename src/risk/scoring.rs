use super::{RiskFactor, RiskLevel};
use crate::errors::RiskError;
use serde::{Deserialize, Serialize};

/// Individual risk score: `probability * impact`.
pub fn calculate_risk_score(factor: &RiskFactor) -> f64 {
    factor.probability() * factor.impact()
}

/// Classify a score against the default thresholds.
pub fn assess_risk_level(score: f64) -> RiskLevel {
    RiskThresholds::default().classify(score)
}

/// Upper bounds for each risk level.
///
/// A score belongs to the first level, walking upward from `low`, whose bound
/// is greater than or equal to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdValues", into = "ThresholdValues")]
pub struct RiskThresholds {
    low: f64,
    medium: f64,
    high: f64,
    critical: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
            critical: default_critical(),
        }
    }
}

impl RiskThresholds {
    /// Build thresholds, requiring strictly ascending bounds and a top bound
    /// that covers every attainable score.
    pub fn new(low: f64, medium: f64, high: f64, critical: f64) -> Result<Self, RiskError> {
        let thresholds = Self {
            low,
            medium,
            high,
            critical,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    fn validate(&self) -> Result<(), RiskError> {
        let bounds = self.ascending();
        if bounds.iter().any(|(_, bound)| !bound.is_finite()) {
            return Err(RiskError::InvalidThresholds(
                "thresholds must be finite numbers".to_string(),
            ));
        }
        if let Some(pair) = bounds.windows(2).find(|pair| pair[0].1 >= pair[1].1) {
            return Err(RiskError::InvalidThresholds(format!(
                "{} ({}) must be below {} ({})",
                pair[0].0, pair[0].1, pair[1].0, pair[1].1
            )));
        }
        if self.critical < 1.0 {
            return Err(RiskError::InvalidThresholds(format!(
                "critical ({}) must be at least 1.0",
                self.critical
            )));
        }
        Ok(())
    }

    pub fn bound(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    /// Level and bound pairs in classification order.
    pub fn ascending(&self) -> [(RiskLevel, f64); 4] {
        RiskLevel::ASCENDING.map(|level| (level, self.bound(level)))
    }

    /// Scores above every bound, and NaN, fall back to `critical`.
    pub fn classify(&self, score: f64) -> RiskLevel {
        self.ascending()
            .into_iter()
            .find(|(_, bound)| score <= *bound)
            .map(|(level, _)| level)
            .unwrap_or(RiskLevel::Critical)
    }
}

/// Serialized shape of [`RiskThresholds`]; missing keys take the defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ThresholdValues {
    #[serde(default = "default_low")]
    low: f64,
    #[serde(default = "default_medium")]
    medium: f64,
    #[serde(default = "default_high")]
    high: f64,
    #[serde(default = "default_critical")]
    critical: f64,
}

impl TryFrom<ThresholdValues> for RiskThresholds {
    type Error = RiskError;

    fn try_from(values: ThresholdValues) -> Result<Self, Self::Error> {
        RiskThresholds::new(values.low, values.medium, values.high, values.critical)
    }
}

impl From<RiskThresholds> for ThresholdValues {
    fn from(thresholds: RiskThresholds) -> Self {
        Self {
            low: thresholds.low,
            medium: thresholds.medium,
            high: thresholds.high,
            critical: thresholds.critical,
        }
    }
}

fn default_low() -> f64 {
    0.3
}
fn default_medium() -> f64 {
    0.6
}
fn default_high() -> f64 {
    0.8
}
fn default_critical() -> f64 {
    1.0
}
