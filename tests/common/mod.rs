// Test utility module for pharmarisk integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use pharmarisk::{FixedClock, RiskAssessmentModel, RiskCategory, RiskFactor};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap()
}

pub fn fixed_model() -> RiskAssessmentModel<FixedClock> {
    RiskAssessmentModel::with_clock(FixedClock::new(epoch()))
}

pub fn factor(name: &str, category: RiskCategory, probability: f64, impact: f64) -> RiskFactor {
    RiskFactor::new(name, category, format!("{name} risk"), probability, impact)
        .expect("test factor must be valid")
}

/// Factor whose score is exactly `probability * 1.0`.
pub fn scored(name: &str, score: f64) -> RiskFactor {
    factor(name, RiskCategory::SupplyChain, score, 1.0)
}
