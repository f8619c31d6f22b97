//! Risk Assessor
//!
//! Flags at-risk predictions and lists contributing factors.
//! Factor rules only run for at-risk predictions.

use super::thresholds::{is_at_risk, RISK_ATTENDANCE, RISK_PREVIOUS_SCORE, RISK_STUDY_HOURS};
use super::types::{RiskAssessment, RuleInput};

/// Predicate plus the factor it reports
pub struct RiskRule {
    pub factor: &'static str,
    pub applies: fn(&RuleInput) -> bool,
}

pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        factor: "Low study hours",
        applies: |input| input.vector.study_hours() < RISK_STUDY_HOURS,
    },
    RiskRule {
        factor: "Low previous performance",
        applies: |input| input.vector.previous_score() < RISK_PREVIOUS_SCORE,
    },
    RiskRule {
        factor: "Poor attendance",
        applies: |input| input.vector.attendance() < RISK_ATTENDANCE,
    },
    RiskRule {
        factor: "High subject difficulty",
        applies: |input| input.vector.is_hard(),
    },
    RiskRule {
        factor: "Limited internet access",
        applies: |input| input.vector.lacks_internet(),
    },
];

/// Reported when at risk but no single factor stands out
pub const FALLBACK_FACTOR: &str = "Multiple minor factors";

pub fn assess(input: &RuleInput) -> RiskAssessment {
    if !is_at_risk(input.prediction) {
        return RiskAssessment::default();
    }

    let mut factors: Vec<String> = RISK_RULES
        .iter()
        .filter(|rule| (rule.applies)(input))
        .map(|rule| rule.factor.to_string())
        .collect();

    if factors.is_empty() {
        factors.push(FALLBACK_FACTOR.to_string());
    }

    RiskAssessment {
        at_risk: true,
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::codec::FeatureVector;

    fn input(prediction: f64, values: [f64; 5]) -> RuleInput {
        RuleInput::new(prediction, FeatureVector::from_values(values))
    }

    #[test]
    fn test_not_at_risk_skips_factors() {
        // Every factor would match, but the prediction is above threshold
        let risk = assess(&input(70.0, [1.0, 50.0, 60.0, 3.0, 0.0]));
        assert!(!risk.at_risk);
        assert!(risk.factors.is_empty());
    }

    #[test]
    fn test_all_factors_in_order() {
        let risk = assess(&input(38.0, [1.0, 50.0, 60.0, 3.0, 0.0]));
        assert!(risk.at_risk);
        assert_eq!(
            risk.factors,
            vec![
                "Low study hours",
                "Low previous performance",
                "Poor attendance",
                "High subject difficulty",
                "Limited internet access",
            ]
        );
    }

    #[test]
    fn test_fallback_factor() {
        let risk = assess(&input(65.0, [4.0, 80.0, 90.0, 2.0, 1.0]));
        assert!(risk.at_risk);
        assert_eq!(risk.factors, vec![FALLBACK_FACTOR]);
    }

    #[test]
    fn test_factor_boundaries_are_strict() {
        let risk = assess(&input(60.0, [2.0, 65.0, 75.0, 1.0, 1.0]));
        assert_eq!(risk.factors, vec![FALLBACK_FACTOR]);
    }
}
