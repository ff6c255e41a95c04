use super::{RiskFactor, RiskLevel, RiskLevelDistribution, RiskReport, TrendOutcome};
use crate::formatting::FormattingConfig;
use crate::risk::scoring::calculate_risk_score;
use comfy_table::presets::ASCII_FULL;
use comfy_table::Table;

pub fn format_report_header(report: &RiskReport, formatting: &FormattingConfig) -> String {
    let mut output = String::new();

    output.push_str(&formatting.header("SUPPLY CHAIN RISK REPORT"));
    output.push('\n');
    output.push_str("────────────────────────\n");
    output.push_str(&format!(
        "Assessed:      {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Risk level:    {}\n",
        formatting.paint_level(report.current_risk_level)
    ));
    output.push_str(&format!(
        "Overall score: {:.3}\n",
        report.overall_risk_score
    ));
    output.push('\n');

    output
}

pub fn format_high_risk_factors(factors: &[RiskFactor], formatting: &FormattingConfig) -> String {
    let mut output = String::new();

    if factors.is_empty() {
        return output;
    }

    output.push_str(&formatting.header("HIGH RISK FACTORS"));
    output.push('\n');

    for (i, factor) in factors.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} ({})\n",
            i + 1,
            factor.name(),
            factor.category()
        ));
        output.push_str(&format!(
            "   Score: {:.2} | Probability: {:.2} | Impact: {:.2}\n",
            calculate_risk_score(factor),
            factor.probability(),
            factor.impact()
        ));
        if !factor.description().is_empty() {
            output.push_str(&format!("   {}\n", formatting.dim(factor.description())));
        }
        if !factor.mitigation_actions().is_empty() {
            output.push_str(&format!(
                "   Mitigations: {}\n",
                factor.mitigation_actions().join(", ")
            ));
        }
    }
    output.push('\n');

    output
}

pub fn format_recommendations(recommendations: &[String], formatting: &FormattingConfig) -> String {
    let mut output = String::new();

    if recommendations.is_empty() {
        return output;
    }

    output.push_str(&formatting.header("RECOMMENDATIONS"));
    output.push('\n');
    for recommendation in recommendations {
        output.push_str(&format!("• {}\n", recommendation));
    }
    output.push('\n');

    output
}

pub fn format_trend_summary(trends: &TrendOutcome, formatting: &FormattingConfig) -> String {
    let mut output = String::new();

    output.push_str(&formatting.header("TREND ANALYSIS"));
    output.push('\n');

    match trends {
        TrendOutcome::Available(trends) => {
            output.push_str(&format!(
                "Window: last {} days ({} assessment{})\n",
                trends.window_days,
                trends.assessment_count,
                if trends.assessment_count == 1 {
                    ""
                } else {
                    "s"
                }
            ));
            output.push_str(&format!(
                "Mean score: {:.3} | Std dev: {:.3} | Direction: {}\n",
                trends.mean_score, trends.std_score, trends.trend_direction
            ));
        }
        TrendOutcome::Unavailable(reason) => {
            output.push_str(&format!("{}\n", formatting.dim(&reason.to_string())));
        }
    }
    output.push('\n');

    output
}

pub fn format_distribution_table(distribution: &RiskLevelDistribution) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(vec!["Level", "Share"]);

    for level in RiskLevel::ASCENDING {
        table.add_row(vec![
            level.to_string(),
            format!("{:.1}%", distribution.fraction(level) * 100.0),
        ]);
    }

    format!("{table}\n")
}
