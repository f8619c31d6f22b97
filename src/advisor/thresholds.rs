//! Advisory Thresholds
//!
//! Cut-off constants for the recommendation and risk rule tables.
//! No logic here, only constants.

// ============================================================================
// AT-RISK THRESHOLD (shared by recommendations and risk assessment)
// ============================================================================

/// Predicted score below this = at risk
pub const AT_RISK_THRESHOLD: f64 = 70.0;

/// True when a prediction falls below the at-risk threshold
pub fn is_at_risk(prediction: f64) -> bool {
    prediction < AT_RISK_THRESHOLD
}

// ============================================================================
// RECOMMENDATION CUT-OFFS
// ============================================================================

/// Below this many daily hours, suggest studying more
pub const LOW_STUDY_HOURS: f64 = 3.0;

/// Daily study hours the increase recommendation aims for
pub const TARGET_STUDY_HOURS: f64 = 5.0;

/// Largest increase suggested in one recommendation
pub const MAX_STUDY_INCREASE: f64 = 2.0;

/// Below this attendance %, suggest attending more
pub const LOW_ATTENDANCE: f64 = 80.0;

/// Attendance % the recommendation asks for
pub const TARGET_ATTENDANCE: f64 = 85.0;

/// Below this previous score, suggest reviewing fundamentals
pub const WEAK_FUNDAMENTALS: f64 = 70.0;

// ============================================================================
// RISK FACTOR CUT-OFFS
// ============================================================================

pub const RISK_STUDY_HOURS: f64 = 2.0;
pub const RISK_PREVIOUS_SCORE: f64 = 65.0;
pub const RISK_ATTENDANCE: f64 = 75.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_risk_is_strictly_below() {
        assert!(is_at_risk(69.999));
        assert!(!is_at_risk(AT_RISK_THRESHOLD));
        assert!(!is_at_risk(95.0));
    }
}
