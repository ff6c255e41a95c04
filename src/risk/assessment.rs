//! Assessment pipeline and the append-only assessment log.
//!
//! A [`RiskAssessmentModel`] owns one registry and one log. Each call to
//! [`RiskAssessmentModel::perform_assessment`] scores every registered factor,
//! averages the scores, classifies the mean, attaches recommendations and
//! appends exactly one immutable [`Assessment`] to the log. Trend and report
//! queries only read the log.
//!
//! The model holds no locks. Create one per session and serialize access
//! externally when several callers share it.

use super::recommendations::generate_recommendations;
use super::report::{build_risk_report, RiskReport};
use super::scoring::calculate_risk_score;
use super::trends::{summarize_window, TrendReport};
use super::{RiskFactor, RiskLevel, RiskRegistry};
use crate::clock::{Clock, SystemClock};
use crate::config::PharmaRiskConfig;
use crate::errors::{EmptyRegistryError, NoDataError};
use chrono::{DateTime, TimeDelta, Utc};
use im::Vector;
use serde::Serialize;

/// Immutable result of one assessment run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Assessment {
    timestamp: DateTime<Utc>,
    factors: Vec<RiskFactor>,
    overall_risk_score: f64,
    risk_level: RiskLevel,
    recommendations: Vec<String>,
}

impl Assessment {
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        factors: Vec<RiskFactor>,
        overall_risk_score: f64,
        risk_level: RiskLevel,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            timestamp,
            factors,
            overall_risk_score,
            risk_level,
            recommendations,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Factors as they stood when the assessment ran.
    pub fn factors(&self) -> &[RiskFactor] {
        &self.factors
    }

    pub fn overall_risk_score(&self) -> f64 {
        self.overall_risk_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Append-only sequence of assessments in the order they were performed.
#[derive(Clone, Debug, Default)]
pub struct AssessmentLog {
    entries: Vector<Assessment>,
}

impl AssessmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, assessment: Assessment) {
        self.entries.push_back(assessment);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Assessment> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assessment> {
        self.entries.iter()
    }

    /// Entries stamped at or after `cutoff`, in log order.
    pub fn since(&self, cutoff: DateTime<Utc>) -> Vec<&Assessment> {
        self.entries
            .iter()
            .filter(|a| a.timestamp() >= cutoff)
            .collect()
    }
}

/// Risk factor registry plus assessment history for one session.
#[derive(Debug)]
pub struct RiskAssessmentModel<C: Clock = SystemClock> {
    registry: RiskRegistry,
    log: AssessmentLog,
    config: PharmaRiskConfig,
    clock: C,
}

impl Default for RiskAssessmentModel<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskAssessmentModel<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> RiskAssessmentModel<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(PharmaRiskConfig::default(), clock)
    }

    pub fn with_config(config: PharmaRiskConfig, clock: C) -> Self {
        Self {
            registry: RiskRegistry::new(),
            log: AssessmentLog::new(),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &PharmaRiskConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn registry(&self) -> &RiskRegistry {
        &self.registry
    }

    pub fn assessments(&self) -> &AssessmentLog {
        &self.log
    }

    /// Insert or replace a factor by name.
    pub fn add_risk_factor(&mut self, factor: RiskFactor) {
        self.registry.insert(factor);
    }

    /// Score the current registry and append the result to the log.
    pub fn perform_assessment(&mut self) -> Result<Assessment, EmptyRegistryError> {
        if self.registry.is_empty() {
            return Err(EmptyRegistryError);
        }

        let factors = self.registry.snapshot();
        let overall_risk_score =
            factors.iter().map(calculate_risk_score).sum::<f64>() / factors.len() as f64;
        let risk_level = self.config.thresholds.classify(overall_risk_score);
        let recommendations = generate_recommendations(
            risk_level,
            &factors,
            self.config.recommendations.factor_trigger,
        );

        let assessment = Assessment::new(
            self.clock.now(),
            factors,
            overall_risk_score,
            risk_level,
            recommendations,
        );

        log::debug!(
            "Assessment #{} over {} factors: score {:.3} ({})",
            self.log.len() + 1,
            assessment.factors().len(),
            overall_risk_score,
            risk_level
        );

        self.log.append(assessment.clone());
        Ok(assessment)
    }

    /// Summary statistics for assessments from the last `days` days.
    pub fn get_risk_trends(&self, days: u32) -> Result<TrendReport, NoDataError> {
        if self.log.is_empty() {
            return Err(NoDataError::NoAssessments);
        }

        let window = self.log.since(self.window_start(days));
        summarize_window(&window, days).ok_or(NoDataError::EmptyWindow { days })
    }

    /// Latest assessment combined with the default-window trend analysis.
    pub fn get_risk_report(&self) -> Result<RiskReport, NoDataError> {
        let latest = self.log.latest().ok_or(NoDataError::NoAssessments)?;
        let trends = self.get_risk_trends(self.config.report.trend_window_days);

        Ok(build_risk_report(
            latest,
            trends,
            self.config.report.high_risk_score,
        ))
    }

    fn window_start(&self, days: u32) -> DateTime<Utc> {
        self.clock
            .now()
            .checked_sub_signed(TimeDelta::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
