use super::scoring::calculate_risk_score;
use super::trends::TrendReport;
use super::{Assessment, RiskFactor, RiskLevel};
use crate::errors::NoDataError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Trend section of a report. An empty window is reported in place rather
/// than failing the whole report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrendOutcome {
    Available(TrendReport),
    Unavailable(NoDataError),
}

impl TrendOutcome {
    pub fn trends(&self) -> Option<&TrendReport> {
        match self {
            TrendOutcome::Available(report) => Some(report),
            TrendOutcome::Unavailable(_) => None,
        }
    }
}

impl From<Result<TrendReport, NoDataError>> for TrendOutcome {
    fn from(result: Result<TrendReport, NoDataError>) -> Self {
        match result {
            Ok(report) => TrendOutcome::Available(report),
            Err(reason) => TrendOutcome::Unavailable(reason),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RiskReport {
    pub timestamp: DateTime<Utc>,
    pub current_risk_level: RiskLevel,
    pub overall_risk_score: f64,
    pub high_risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    pub trend_analysis: TrendOutcome,
}

pub(crate) fn build_risk_report(
    latest: &Assessment,
    trends: Result<TrendReport, NoDataError>,
    high_risk_score: f64,
) -> RiskReport {
    RiskReport {
        timestamp: latest.timestamp(),
        current_risk_level: latest.risk_level(),
        overall_risk_score: latest.overall_risk_score(),
        high_risk_factors: high_risk_factors(latest.factors(), high_risk_score),
        recommendations: latest.recommendations().to_vec(),
        trend_analysis: trends.into(),
    }
}

/// Factors whose individual score strictly exceeds `threshold`.
pub fn high_risk_factors(factors: &[RiskFactor], threshold: f64) -> Vec<RiskFactor> {
    factors
        .iter()
        .filter(|f| calculate_risk_score(f) > threshold)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::trends::{RiskLevelDistribution, TrendDirection};
    use crate::risk::RiskCategory;
    use chrono::TimeZone;

    fn factor(name: &str, probability: f64, impact: f64) -> RiskFactor {
        RiskFactor::new(name, RiskCategory::Compliance, "", probability, impact).unwrap()
    }

    #[test]
    fn test_high_risk_factors_uses_product_not_components() {
        let factors = vec![
            factor("hot", 0.9, 0.9),
            factor("one_sided", 1.0, 0.5),
            factor("edge", 0.7, 1.0),
        ];
        let high = high_risk_factors(&factors, 0.7);
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].name(), "hot");
    }

    #[test]
    fn test_report_embeds_unavailable_trends() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let latest = Assessment::new(
            ts,
            vec![factor("a", 0.1, 0.1)],
            0.01,
            RiskLevel::Low,
            vec![],
        );

        let report = build_risk_report(&latest, Err(NoDataError::EmptyWindow { days: 30 }), 0.7);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(
            value["trend_analysis"],
            serde_json::json!({"error": "No assessments in the specified time range"})
        );
        assert_eq!(value["current_risk_level"], "low");
        assert!(report.trend_analysis.trends().is_none());
    }

    #[test]
    fn test_report_embeds_available_trends() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let latest = Assessment::new(ts, vec![], 0.5, RiskLevel::Medium, vec![]);
        let trends = TrendReport {
            window_days: 30,
            assessment_count: 1,
            mean_score: 0.5,
            std_score: 0.0,
            trend_direction: TrendDirection::Decreasing,
            risk_level_distribution: RiskLevelDistribution {
                medium: 1.0,
                ..Default::default()
            },
        };

        let report = build_risk_report(&latest, Ok(trends.clone()), 0.7);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(report.trend_analysis.trends(), Some(&trends));
        assert_eq!(value["trend_analysis"]["trend_direction"], "decreasing");
        assert_eq!(
            value["trend_analysis"]["risk_level_distribution"]["medium"],
            1.0
        );
    }
}
