//! Feature Codec
//!
//! Translates between the human-facing request fields and the numeric
//! vector the model was trained on.
//!
//! Categorical lookups are lenient: an unrecognized difficulty encodes as
//! Medium and an unrecognized internet value encodes as Yes. Numeric fields
//! are strict and fail with `InvalidInput`.

use serde_json::{Map, Value};

use super::error::AdvisoryError;
use super::layout::{
    ATTENDANCE, DIFFICULTY, FEATURE_COUNT, FEATURE_LAYOUT, INTERNET, PREVIOUS_SCORE, STUDY_HOURS,
};

// ============================================================================
// RAW INPUT
// ============================================================================

/// Required request keys, checked in this order
pub const REQUIRED_FIELDS: [&str; FEATURE_COUNT] = [
    "study_hours",
    "previous_score",
    "attendance",
    "difficulty",
    "internet",
];

/// Untyped request mapping as received from the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput(Map<String, Value>);

impl RawInput {
    /// First required key that is absent, in `REQUIRED_FIELDS` order
    pub fn first_missing(&self) -> Option<&'static str> {
        REQUIRED_FIELDS.iter().copied().find(|f| !self.0.contains_key(*f))
    }

    fn field(&self, field: &'static str) -> Result<&Value, AdvisoryError> {
        self.0.get(field).ok_or(AdvisoryError::MissingField(field))
    }
}

impl TryFrom<Value> for RawInput {
    type Error = AdvisoryError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AdvisoryError::InvalidInput {
                field: "request body".to_string(),
                value: format!("{} (expected a JSON object)", other),
            }),
        }
    }
}

// ============================================================================
// CATEGORICAL TABLES
// ============================================================================

/// Subject difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Exact, case-sensitive label lookup
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn from_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(Difficulty::Easy)
        } else if code == 2.0 {
            Some(Difficulty::Medium)
        } else if code == 3.0 {
            Some(Difficulty::Hard)
        } else {
            None
        }
    }

    pub fn code(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 2.0,
            Difficulty::Hard => 3.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Internet access at home
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InternetAccess {
    No,
    #[default]
    Yes,
}

impl InternetAccess {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Yes" => Some(InternetAccess::Yes),
            "No" => Some(InternetAccess::No),
            _ => None,
        }
    }

    pub fn from_code(code: f64) -> Option<Self> {
        if code == 0.0 {
            Some(InternetAccess::No)
        } else if code == 1.0 {
            Some(InternetAccess::Yes)
        } else {
            None
        }
    }

    pub fn code(&self) -> f64 {
        match self {
            InternetAccess::No => 0.0,
            InternetAccess::Yes => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InternetAccess::No => "No",
            InternetAccess::Yes => "Yes",
        }
    }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Encoded request in `FEATURE_LAYOUT` order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn study_hours(&self) -> f64 {
        self.values[STUDY_HOURS]
    }

    pub fn previous_score(&self) -> f64 {
        self.values[PREVIOUS_SCORE]
    }

    pub fn attendance(&self) -> f64 {
        self.values[ATTENDANCE]
    }

    pub fn difficulty_code(&self) -> f64 {
        self.values[DIFFICULTY]
    }

    pub fn internet_code(&self) -> f64 {
        self.values[INTERNET]
    }

    pub fn is_hard(&self) -> bool {
        Difficulty::from_code(self.difficulty_code()) == Some(Difficulty::Hard)
    }

    pub fn lacks_internet(&self) -> bool {
        InternetAccess::from_code(self.internet_code()) == Some(InternetAccess::No)
    }

    /// Named values for debug logging
    pub fn to_log_entry(&self) -> Value {
        let named: Map<String, Value> = FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, v)| (name.to_string(), serde_json::json!(v)))
            .collect();
        Value::Object(named)
    }
}

// ============================================================================
// ENCODE
// ============================================================================

/// Encode a raw request into the model's feature vector
pub fn encode(raw: &RawInput) -> Result<FeatureVector, AdvisoryError> {
    if let Some(missing) = raw.first_missing() {
        return Err(AdvisoryError::MissingField(missing));
    }

    let study_hours = parse_numeric("study_hours", raw.field("study_hours")?)?;
    let previous_score = parse_numeric("previous_score", raw.field("previous_score")?)?;
    let attendance = parse_numeric("attendance", raw.field("attendance")?)?;
    let difficulty = encode_difficulty(raw.field("difficulty")?);
    let internet = encode_internet(raw.field("internet")?);

    Ok(FeatureVector::from_values([
        study_hours,
        previous_score,
        attendance,
        difficulty.code(),
        internet.code(),
    ]))
}

/// Numbers, numeric strings (whitespace trimmed) and booleans convert
fn parse_numeric(field: &str, value: &Value) -> Result<f64, AdvisoryError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => strip_digit_separators(s.trim()).and_then(|t| t.parse::<f64>().ok()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    parsed.ok_or_else(|| AdvisoryError::InvalidInput {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// `1_000` -> `1000`; an underscore must sit between two digits
fn strip_digit_separators(s: &str) -> Option<String> {
    if !s.contains('_') {
        return Some(s.to_string());
    }

    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = i > 0 && bytes[i - 1].is_ascii_digit();
            let after = bytes.get(i + 1).map_or(false, |n| n.is_ascii_digit());
            if !(before && after) {
                return None;
            }
        }
    }

    Some(s.replace('_', ""))
}

fn encode_difficulty(value: &Value) -> Difficulty {
    match value.as_str().and_then(Difficulty::from_label) {
        Some(d) => d,
        None => {
            let fallback = Difficulty::default();
            tracing::debug!("Unrecognized difficulty {}, defaulting to {}", value, fallback.label());
            fallback
        }
    }
}

fn encode_internet(value: &Value) -> InternetAccess {
    match value.as_str().and_then(InternetAccess::from_label) {
        Some(i) => i,
        None => {
            let fallback = InternetAccess::default();
            tracing::debug!("Unrecognized internet value {}, defaulting to {}", value, fallback.label());
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawInput {
        RawInput::try_from(value).unwrap()
    }

    fn sample() -> Value {
        json!({
            "study_hours": 4,
            "previous_score": 72.5,
            "attendance": 88,
            "difficulty": "Hard",
            "internet": "No"
        })
    }

    #[test]
    fn test_encode_in_layout_order() {
        let vector = encode(&raw(sample())).unwrap();
        assert_eq!(vector.as_slice(), &[4.0, 72.5, 88.0, 3.0, 0.0]);
        assert!(vector.is_hard());
        assert!(vector.lacks_internet());
    }

    #[test]
    fn test_numeric_strings_and_bools() {
        let mut input = sample();
        input["study_hours"] = json!(" 2.5 ");
        input["attendance"] = json!(true);
        let vector = encode(&raw(input)).unwrap();
        assert_eq!(vector.study_hours(), 2.5);
        assert_eq!(vector.attendance(), 1.0);
    }

    #[test]
    fn test_unknown_categories_fall_back() {
        let mut input = sample();
        input["difficulty"] = json!("Unknown");
        input["internet"] = json!("Maybe");
        let vector = encode(&raw(input)).unwrap();
        assert_eq!(vector.difficulty_code(), 2.0);
        assert_eq!(vector.internet_code(), 1.0);
    }

    #[test]
    fn test_category_lookup_is_case_sensitive() {
        let mut input = sample();
        input["difficulty"] = json!("hard");
        input["internet"] = json!(0);
        let vector = encode(&raw(input)).unwrap();
        assert_eq!(vector.difficulty_code(), Difficulty::Medium.code());
        assert_eq!(vector.internet_code(), InternetAccess::Yes.code());
    }

    #[test]
    fn test_missing_field_reported_in_order() {
        let mut input = sample();
        input.as_object_mut().unwrap().remove("internet");
        input.as_object_mut().unwrap().remove("attendance");
        assert_eq!(encode(&raw(input)), Err(AdvisoryError::MissingField("attendance")));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let mut input = sample();
        input["study_hours"] = json!("abc");
        match encode(&raw(input)) {
            Err(AdvisoryError::InvalidInput { field, value }) => {
                assert_eq!(field, "study_hours");
                assert!(value.contains("abc"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        let mut input = sample();
        input["previous_score"] = Value::Null;
        assert!(matches!(encode(&raw(input)), Err(AdvisoryError::InvalidInput { .. })));
    }

    #[test]
    fn test_underscore_digit_separators() {
        let mut input = sample();
        input["previous_score"] = json!("7_0.5");
        input["attendance"] = json!("1_00");
        let vector = encode(&raw(input)).unwrap();
        assert_eq!(vector.previous_score(), 70.5);
        assert_eq!(vector.attendance(), 100.0);

        for bad in ["_90", "90_", "9__0", "9_.5"] {
            let mut input = sample();
            input["attendance"] = json!(bad);
            assert!(
                matches!(encode(&raw(input)), Err(AdvisoryError::InvalidInput { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_non_object_body_rejected() {
        let result = RawInput::try_from(json!([1, 2, 3]));
        assert!(matches!(result, Err(AdvisoryError::InvalidInput { .. })));
    }

    #[test]
    fn test_code_tables_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_code(d.code()), Some(d));
            assert_eq!(Difficulty::from_label(d.label()), Some(d));
        }
        assert_eq!(InternetAccess::from_code(0.0), Some(InternetAccess::No));
        assert_eq!(InternetAccess::from_code(0.5), None);
    }
}
