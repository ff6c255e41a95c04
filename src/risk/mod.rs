pub mod assessment;
pub mod insights;
pub mod recommendations;
pub mod registry;
pub mod report;
pub mod scoring;
pub mod trends;

use crate::errors::InvalidFactorError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use assessment::{Assessment, AssessmentLog, RiskAssessmentModel};
pub use recommendations::generate_recommendations;
pub use registry::RiskRegistry;
pub use report::{RiskReport, TrendOutcome};
pub use scoring::{assess_risk_level, calculate_risk_score, RiskThresholds};
pub use trends::{RiskLevelDistribution, TrendDirection, TrendReport};

/// Source domain of a risk factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Quality,
    Safety,
    Compliance,
    SupplyChain,
    Financial,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Quality,
        RiskCategory::Safety,
        RiskCategory::Compliance,
        RiskCategory::SupplyChain,
        RiskCategory::Financial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Quality => "quality",
            RiskCategory::Safety => "safety",
            RiskCategory::Compliance => "compliance",
            RiskCategory::SupplyChain => "supply_chain",
            RiskCategory::Financial => "financial",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier derived from an aggregate risk score.
///
/// Variants are declared in ascending severity so the derived `Ord` agrees
/// with [`RiskLevel::ASCENDING`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Levels in the order the classifier walks them.
    pub const ASCENDING: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// High and critical assessments demand immediate action.
    pub fn requires_immediate_action(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated risk factor as handed in by a caller or read from a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorRecord {
    pub name: String,
    pub category: RiskCategory,
    pub description: String,
    pub probability: f64,
    pub impact: f64,
    #[serde(default)]
    pub controls: Vec<String>,
    #[serde(default)]
    pub mitigation_actions: Vec<String>,
}

/// A validated risk factor. Probability and impact always lie in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RiskFactorRecord", into = "RiskFactorRecord")]
pub struct RiskFactor {
    name: String,
    category: RiskCategory,
    description: String,
    probability: f64,
    impact: f64,
    controls: Vec<String>,
    mitigation_actions: Vec<String>,
}

impl RiskFactor {
    pub fn new(
        name: impl Into<String>,
        category: RiskCategory,
        description: impl Into<String>,
        probability: f64,
        impact: f64,
    ) -> Result<Self, InvalidFactorError> {
        let name = name.into();
        validate_unit_interval(&name, "probability", probability)?;
        validate_unit_interval(&name, "impact", impact)?;

        Ok(Self {
            name,
            category,
            description: description.into(),
            probability,
            impact,
            controls: Vec::new(),
            mitigation_actions: Vec::new(),
        })
    }

    pub fn with_controls<I, S>(mut self, controls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controls = controls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mitigation_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mitigation_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> RiskCategory {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn impact(&self) -> f64 {
        self.impact
    }

    pub fn controls(&self) -> &[String] {
        &self.controls
    }

    pub fn mitigation_actions(&self) -> &[String] {
        &self.mitigation_actions
    }
}

// NaN fails the range check as well
fn validate_unit_interval(
    name: &str,
    field: &'static str,
    value: f64,
) -> Result<(), InvalidFactorError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(InvalidFactorError {
            name: name.to_string(),
            field,
            value,
        })
    }
}

impl TryFrom<RiskFactorRecord> for RiskFactor {
    type Error = InvalidFactorError;

    fn try_from(record: RiskFactorRecord) -> Result<Self, Self::Error> {
        Ok(RiskFactor::new(
            record.name,
            record.category,
            record.description,
            record.probability,
            record.impact,
        )?
        .with_controls(record.controls)
        .with_mitigation_actions(record.mitigation_actions))
    }
}

impl From<RiskFactor> for RiskFactorRecord {
    fn from(factor: RiskFactor) -> Self {
        RiskFactorRecord {
            name: factor.name,
            category: factor.category,
            description: factor.description,
            probability: factor.probability,
            impact: factor.impact,
            controls: factor.controls,
            mitigation_actions: factor.mitigation_actions,
        }
    }
}
