//! Recommendation Generator
//!
//! Ordered table of independent rules. Every rule is evaluated; each one
//! that applies appends its advice, so output order follows table order.
//! When nothing applies the general fallback advice is returned, so the
//! result is never empty.

use super::thresholds::{
    is_at_risk, LOW_ATTENDANCE, LOW_STUDY_HOURS, MAX_STUDY_INCREASE, TARGET_ATTENDANCE,
    TARGET_STUDY_HOURS, WEAK_FUNDAMENTALS,
};
use super::types::RuleInput;

// ============================================================================
// RULE TABLE
// ============================================================================

/// Predicate plus the advice it contributes
pub struct RecommendationRule {
    pub name: &'static str,
    pub applies: fn(&RuleInput) -> bool,
    pub advice: fn(&RuleInput) -> Vec<String>,
}

pub const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        name: "low_study_hours",
        applies: |input| input.vector.study_hours() < LOW_STUDY_HOURS,
        advice: |input| {
            let increase = (TARGET_STUDY_HOURS - input.vector.study_hours()).min(MAX_STUDY_INCREASE);
            vec![format!("Increase your daily study time by {:.1} hours", increase)]
        },
    },
    RecommendationRule {
        name: "low_attendance",
        applies: |input| input.vector.attendance() < LOW_ATTENDANCE,
        advice: |input| {
            vec![format!(
                "Improve your attendance from {}% to at least {}%",
                display_number(input.vector.attendance()),
                TARGET_ATTENDANCE
            )]
        },
    },
    RecommendationRule {
        name: "hard_subject_at_risk",
        applies: |input| input.vector.is_hard() && is_at_risk(input.prediction),
        advice: |_| {
            vec![
                "Consider breaking down complex topics into smaller, manageable parts".to_string(),
                "Try using flashcards to simplify difficult concepts".to_string(),
            ]
        },
    },
    RecommendationRule {
        name: "weak_fundamentals",
        applies: |input| input.vector.previous_score() < WEAK_FUNDAMENTALS,
        advice: |_| vec!["Review fundamental concepts from previous materials".to_string()],
    },
    RecommendationRule {
        name: "no_internet",
        applies: |input| input.vector.lacks_internet(),
        advice: |_| {
            vec!["Try to find access to online educational resources, or use offline alternatives such as library materials".to_string()]
        },
    },
];

pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Maintain your current study habits",
    "Consider participating in study groups for additional insights",
];

// ============================================================================
// GENERATOR
// ============================================================================

/// Generate study recommendations for a prediction
pub fn recommend(input: &RuleInput) -> Vec<String> {
    let mut recommendations: Vec<String> = RECOMMENDATION_RULES
        .iter()
        .filter(|rule| (rule.applies)(input))
        .flat_map(|rule| {
            tracing::trace!("Recommendation rule fired: {}", rule.name);
            (rule.advice)(input)
        })
        .collect();

    if recommendations.is_empty() {
        recommendations = FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect();
    }

    recommendations
}

/// Integral values keep one decimal (`60` -> `60.0`)
fn display_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
