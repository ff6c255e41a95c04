//! Error types for the risk assessment engine.
//!
//! The core surfaces three narrow errors so callers can match on exactly what
//! went wrong:
//!
//! - [`EmptyRegistryError`]: an assessment was requested with no risk factors
//! - [`NoDataError`]: a trend or report query found nothing to summarize. This
//!   is an expected state for a fresh system, so it serializes to the
//!   `{"error": "<reason>"}` object callers hand straight back to clients.
//! - [`InvalidFactorError`]: probability or impact outside `[0, 1]`
//!
//! [`RiskError`] wraps all of them together with the I/O, parsing and
//! configuration failures raised outside the core.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::path::PathBuf;
use thiserror::Error;

/// Assessment attempted against an empty registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no risk factors defined for assessment")]
pub struct EmptyRegistryError;

/// Trend or report query with nothing to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoDataError {
    /// The assessment log has never been written to.
    #[error("No assessment data available")]
    NoAssessments,
    /// Assessments exist but none fall inside the requested window.
    #[error("No assessments in the specified time range")]
    EmptyWindow { days: u32 },
}

impl Serialize for NoDataError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NoDataError", 1)?;
        state.serialize_field("error", &self.to_string())?;
        state.end()
    }
}

/// Probability or impact outside the unit interval.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("risk factor '{name}': {field} must be within [0, 1], got {value}")]
pub struct InvalidFactorError {
    pub name: String,
    pub field: &'static str,
    pub value: f64,
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error(transparent)]
    EmptyRegistry(#[from] EmptyRegistryError),

    #[error(transparent)]
    NoData(#[from] NoDataError),

    #[error(transparent)]
    InvalidFactor(#[from] InvalidFactorError),

    /// Thresholds that are not strictly ascending or cannot cover a score of 1.0
    #[error("Invalid risk thresholds: {0}")]
    InvalidThresholds(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Factor file with an extension we cannot parse
    #[error("Unsupported factor file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Factor file that failed to parse
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RiskError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error reflects bad input the user can correct.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidFactor(_)
                | Self::InvalidThresholds(_)
                | Self::Config(_)
                | Self::UnsupportedFormat { .. }
                | Self::Parse { .. }
                | Self::EmptyRegistry(_)
        )
    }
}
