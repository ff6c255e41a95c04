use crate::clock::{Clock, SystemClock};
use crate::config::{load_config, load_config_from_path, PharmaRiskConfig};
use crate::errors::RiskError;
use crate::formatting::FormattingConfig;
use crate::io::{create_writer, load_factor_records, OutputFormat};
use crate::risk::{RiskAssessmentModel, RiskReport};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct AssessConfig {
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub window_days: Option<u32>,
    pub formatting: FormattingConfig,
}

pub fn handle_assess(config: AssessConfig) -> Result<()> {
    let settings = resolve_settings(&config)?;
    let report = run_assessments(&config.files, settings, SystemClock)?;

    let (sink, formatting): (Box<dyn Write>, FormattingConfig) = match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            (Box::new(BufWriter::new(file)), FormattingConfig::plain())
        }
        None => (Box::new(std::io::stdout().lock()), config.formatting),
    };

    let mut writer = create_writer(config.format, formatting, sink);
    writer.write_report(&report)?;
    Ok(())
}

fn resolve_settings(config: &AssessConfig) -> Result<PharmaRiskConfig> {
    let mut settings = match &config.config {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };

    if let Some(days) = config.window_days {
        settings.report.trend_window_days = days;
    }
    Ok(settings)
}

/// Feed each factor file into one model, assessing after every file, and
/// return the final report.
///
/// Factors accumulate across files with later files replacing same-named
/// factors.
pub fn run_assessments<C: Clock>(
    files: &[PathBuf],
    settings: PharmaRiskConfig,
    clock: C,
) -> Result<RiskReport, RiskError> {
    let mut model = RiskAssessmentModel::with_config(settings, clock);

    for file in files {
        for factor in load_factor_records(file)? {
            model.add_risk_factor(factor);
        }

        let assessment = model.perform_assessment()?;
        log::info!(
            "{}: {} risk (score {:.3}, {} factors)",
            file.display(),
            assessment.risk_level(),
            assessment.overall_risk_score(),
            assessment.factors().len()
        );
    }

    Ok(model.get_risk_report()?)
}
