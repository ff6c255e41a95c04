use super::{Assessment, RiskLevel};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    /// `Increasing` only when the last score is strictly above the first.
    /// Equal endpoints report `Decreasing`.
    pub fn between(first: f64, last: f64) -> Self {
        if last > first {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fraction of windowed assessments at each level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskLevelDistribution {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl RiskLevelDistribution {
    pub fn fraction(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    pub fn total(&self) -> f64 {
        RiskLevel::ASCENDING.iter().map(|l| self.fraction(*l)).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub window_days: u32,
    pub assessment_count: usize,
    pub mean_score: f64,
    pub std_score: f64,
    pub trend_direction: TrendDirection,
    pub risk_level_distribution: RiskLevelDistribution,
}

/// Summarize a non-empty, chronologically ordered window of assessments.
///
/// Returns `None` for an empty window.
pub fn summarize_window(window: &[&Assessment], window_days: u32) -> Option<TrendReport> {
    let first = window.first()?;
    let last = window.last()?;

    let scores: Vec<f64> = window.iter().map(|a| a.overall_risk_score()).collect();
    let (mean_score, std_score) = mean_and_std(&scores);

    Some(TrendReport {
        window_days,
        assessment_count: window.len(),
        mean_score,
        std_score,
        trend_direction: TrendDirection::between(
            first.overall_risk_score(),
            last.overall_risk_score(),
        ),
        risk_level_distribution: calculate_risk_distribution(window),
    })
}

/// Mean and population standard deviation. Both are zero for no values.
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance.sqrt())
}

pub fn calculate_risk_distribution(assessments: &[&Assessment]) -> RiskLevelDistribution {
    if assessments.is_empty() {
        return RiskLevelDistribution::default();
    }

    let (low, medium, high, critical) =
        assessments
            .iter()
            .fold((0usize, 0usize, 0usize, 0usize), |acc, a| match a.risk_level() {
                RiskLevel::Low => (acc.0 + 1, acc.1, acc.2, acc.3),
                RiskLevel::Medium => (acc.0, acc.1 + 1, acc.2, acc.3),
                RiskLevel::High => (acc.0, acc.1, acc.2 + 1, acc.3),
                RiskLevel::Critical => (acc.0, acc.1, acc.2, acc.3 + 1),
            });

    let total = assessments.len() as f64;
    RiskLevelDistribution {
        low: low as f64 / total,
        medium: medium as f64 / total,
        high: high as f64 / total,
        critical: critical as f64 / total,
    }
}
