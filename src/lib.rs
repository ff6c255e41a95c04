// Export modules for library usage
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod risk;

// Re-export commonly used types
pub use crate::clock::{Clock, FixedClock, SystemClock};

pub use crate::config::{load_config, load_config_from_path, PharmaRiskConfig};

pub use crate::errors::{EmptyRegistryError, InvalidFactorError, NoDataError, RiskError};

pub use crate::io::load_factor_records;

pub use crate::risk::{
    assess_risk_level, calculate_risk_score, generate_recommendations, Assessment, AssessmentLog,
    RiskAssessmentModel, RiskCategory, RiskFactor, RiskFactorRecord, RiskLevel,
    RiskLevelDistribution, RiskRegistry, RiskReport, RiskThresholds, TrendDirection, TrendOutcome,
    TrendReport,
};
