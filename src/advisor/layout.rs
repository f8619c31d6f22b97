//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema.**
//!
//! The model artifact is trained over these columns in exactly this order.
//! Adding, removing or reordering a feature means retraining the model;
//! artifacts trained against a different layout are rejected at load time.

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "study_hours",    // 0: Daily study hours
    "previous_score", // 1: Score in the previous assessment
    "attendance",     // 2: Attendance percentage
    "difficulty",     // 3: Subject difficulty code (1-3)
    "internet",       // 4: Internet access code (0/1)
];

/// Total number of features
/// Must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 5;

pub const STUDY_HOURS: usize = 0;
pub const PREVIOUS_SCORE: usize = 1;
pub const ATTENDANCE: usize = 2;
pub const DIFFICULTY: usize = 3;
pub const INTERNET: usize = 4;

/// Check a trained feature list against the current layout (count and order)
pub fn matches_layout<S: AsRef<str>>(names: &[S]) -> bool {
    names.len() == FEATURE_COUNT
        && names
            .iter()
            .zip(FEATURE_LAYOUT)
            .all(|(actual, expected)| actual.as_ref() == *expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_count_matches() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_index_constants_match_layout() {
        assert_eq!(FEATURE_LAYOUT[STUDY_HOURS], "study_hours");
        assert_eq!(FEATURE_LAYOUT[PREVIOUS_SCORE], "previous_score");
        assert_eq!(FEATURE_LAYOUT[ATTENDANCE], "attendance");
        assert_eq!(FEATURE_LAYOUT[DIFFICULTY], "difficulty");
        assert_eq!(FEATURE_LAYOUT[INTERNET], "internet");
    }

    #[test]
    fn test_matches_layout() {
        assert!(matches_layout(FEATURE_LAYOUT));

        let reordered = ["previous_score", "study_hours", "attendance", "difficulty", "internet"];
        assert!(!matches_layout(&reordered[..]));

        let short = ["study_hours", "previous_score", "attendance", "difficulty"];
        assert!(!matches_layout(&short[..]));
    }
}
