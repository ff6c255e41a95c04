use super::{RiskFactor, RiskLevel};

pub const IMMEDIATE_ACTION: &str = "Immediate action required to address high-risk factors";

/// Probability or impact strictly above this flags a factor for review.
pub const DEFAULT_FACTOR_TRIGGER: f64 = 0.7;

/// Advisory lines for an assessment.
///
/// The global advisory for high and critical levels comes first, followed by
/// one line per triggering factor in factor order.
pub fn generate_recommendations(
    level: RiskLevel,
    factors: &[RiskFactor],
    factor_trigger: f64,
) -> Vec<String> {
    let global = level
        .requires_immediate_action()
        .then(|| IMMEDIATE_ACTION.to_string());

    let per_factor = factors
        .iter()
        .filter(|f| f.probability() > factor_trigger || f.impact() > factor_trigger)
        .map(factor_advisory);

    global.into_iter().chain(per_factor).collect()
}

fn factor_advisory(factor: &RiskFactor) -> String {
    format!(
        "Review and strengthen controls for {} ({})",
        factor.name(),
        factor.category()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskCategory;

    fn factor(name: &str, category: RiskCategory, probability: f64, impact: f64) -> RiskFactor {
        RiskFactor::new(name, category, "", probability, impact).unwrap()
    }

    #[test]
    fn test_critical_with_single_hot_factor() {
        let factors = vec![factor("A", RiskCategory::Quality, 0.9, 0.9)];
        let recs = generate_recommendations(RiskLevel::Critical, &factors, DEFAULT_FACTOR_TRIGGER);

        assert_eq!(
            recs,
            vec![
                IMMEDIATE_ACTION.to_string(),
                "Review and strengthen controls for A (quality)".to_string(),
            ]
        );
    }

    #[test]
    fn test_low_level_without_triggers_is_empty() {
        let factors = vec![factor("B", RiskCategory::Safety, 0.2, 0.2)];
        let recommendations =
            generate_recommendations(RiskLevel::Low, &factors, DEFAULT_FACTOR_TRIGGER);
        assert!(recommendations.is_empty());
    }

    #[test]
    fn test_trigger_is_strict() {
        let factors = vec![factor("edge", RiskCategory::Compliance, 0.7, 0.7)];
        let recommendations =
            generate_recommendations(RiskLevel::Medium, &factors, DEFAULT_FACTOR_TRIGGER);
        assert!(recommendations.is_empty());
    }

    #[test]
    fn test_either_component_triggers() {
        let factors = vec![
            factor("prob", RiskCategory::Financial, 0.75, 0.1),
            factor("quiet", RiskCategory::Financial, 0.1, 0.1),
            factor("impact", RiskCategory::SupplyChain, 0.1, 0.95),
        ];
        let recs = generate_recommendations(RiskLevel::Low, &factors, DEFAULT_FACTOR_TRIGGER);

        assert_eq!(
            recs,
            vec![
                "Review and strengthen controls for prob (financial)".to_string(),
                "Review and strengthen controls for impact (supply_chain)".to_string(),
            ]
        );
    }

    #[test]
    fn test_high_level_without_triggers_has_only_global() {
        let factors = vec![factor("x", RiskCategory::Quality, 0.5, 0.5)];
        let recs = generate_recommendations(RiskLevel::High, &factors, DEFAULT_FACTOR_TRIGGER);
        assert_eq!(recs, vec![IMMEDIATE_ACTION.to_string()]);
    }
}
