use crate::formatting::FormattingConfig;
use crate::risk::insights::{
    format_distribution_table, format_high_risk_factors, format_recommendations,
    format_report_header, format_trend_summary,
};
use crate::risk::{RiskLevel, RiskReport, TrendOutcome};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Renders a report to its sink. Implementations flush before returning so
/// buffered write failures surface as errors.
pub trait OutputWriter {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_high_risk_factors(report)?;
        self.write_recommendations(report)?;
        self.write_trends(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Supply Chain Risk Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Risk Level | {} |",
            report.current_risk_level.as_str().to_uppercase()
        )?;
        writeln!(
            self.writer,
            "| Overall Score | {:.3} |",
            report.overall_risk_score
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_high_risk_factors(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        if report.high_risk_factors.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## High Risk Factors")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Factor | Category | Probability | Impact |")?;
        writeln!(self.writer, "|--------|----------|-------------|--------|")?;
        for factor in &report.high_risk_factors {
            writeln!(
                self.writer,
                "| {} | {} | {:.2} | {:.2} |",
                factor.name(),
                factor.category(),
                factor.probability(),
                factor.impact()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        if report.recommendations.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        for recommendation in &report.recommendations {
            writeln!(self.writer, "- [ ] {}", recommendation)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trends(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Trend Analysis")?;
        writeln!(self.writer)?;

        let trends = match &report.trend_analysis {
            TrendOutcome::Available(trends) => trends,
            TrendOutcome::Unavailable(reason) => {
                writeln!(self.writer, "_{}_", reason)?;
                return Ok(());
            }
        };

        writeln!(
            self.writer,
            "Last {} days, {} assessments: mean {:.3}, std {:.3}, {}",
            trends.window_days,
            trends.assessment_count,
            trends.mean_score,
            trends.std_score,
            trends.trend_direction
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Level | Share |")?;
        writeln!(self.writer, "|-------|-------|")?;
        for level in RiskLevel::ASCENDING {
            writeln!(
                self.writer,
                "| {} | {:.1}% |",
                level,
                trends.risk_level_distribution.fraction(level) * 100.0
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatting: FormattingConfig,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self { writer, formatting }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let sections = [
            format_report_header(report, &self.formatting),
            format_high_risk_factors(&report.high_risk_factors, &self.formatting),
            format_recommendations(&report.recommendations, &self.formatting),
            format_trend_summary(&report.trend_analysis, &self.formatting),
            report
                .trend_analysis
                .trends()
                .map(|t| format_distribution_table(&t.risk_level_distribution))
                .unwrap_or_default(),
        ];

        for section in sections.iter().filter(|s| !s.is_empty()) {
            write!(self.writer, "{}", section)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'a>(
    format: OutputFormat,
    formatting: FormattingConfig,
    writer: Box<dyn Write + 'a>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::risk::{RiskAssessmentModel, RiskCategory, RiskFactor};
    use chrono::{TimeZone, Utc};

    fn sample_report() -> RiskReport {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
        let mut model = RiskAssessmentModel::with_clock(clock);
        model.add_risk_factor(
            RiskFactor::new("heparin_api", RiskCategory::Quality, "", 0.9, 0.9).unwrap(),
        );
        model.add_risk_factor(
            RiskFactor::new("freight", RiskCategory::SupplyChain, "", 0.2, 0.3).unwrap(),
        );
        model.perform_assessment().unwrap();
        model.get_risk_report().unwrap()
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        {
            let mut writer =
                create_writer(format, FormattingConfig::plain(), Box::new(&mut buffer));
            writer.write_report(&sample_report()).unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    /// Accepts every write but fails on flush, like a full disk behind a
    /// buffered file.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("no space left on device"))
        }
    }

    #[test]
    fn test_flush_failure_is_reported() {
        let report = sample_report();

        for format in [
            OutputFormat::Json,
            OutputFormat::Markdown,
            OutputFormat::Terminal,
        ] {
            let mut writer = create_writer(format, FormattingConfig::plain(), Box::new(FullDisk));
            let err = writer.write_report(&report).unwrap_err();
            assert!(err.to_string().contains("no space left"), "{format:?}");
        }
    }

    #[test]
    fn test_json_writer_round_trips_to_value() {
        let output = render(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["current_risk_level"], "medium");
        assert_eq!(value["high_risk_factors"][0]["name"], "heparin_api");
        assert_eq!(value["trend_analysis"]["assessment_count"], 1);
    }

    #[test]
    fn test_markdown_writer_sections() {
        let output = render(OutputFormat::Markdown);

        assert!(output.starts_with("# Supply Chain Risk Report"));
        assert!(output.contains("| Risk Level | MEDIUM |"));
        assert!(output.contains("| heparin_api | quality | 0.90 | 0.90 |"));
        assert!(output.contains("- [ ] Review and strengthen controls for heparin_api (quality)"));
        assert!(output.contains("| medium | 100.0% |"));
    }

    #[test]
    fn test_terminal_writer_plain_output() {
        let output = render(OutputFormat::Terminal);

        assert!(output.contains("MEDIUM"));
        assert!(output.contains("heparin_api"));
        assert!(!output.contains('\u{1b}'));
    }
}
