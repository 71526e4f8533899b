use serde::{Deserialize, Serialize};

/// A benefit field that participates in coalescing
///
/// The set is closed: providers may return other keys, but only these three
/// are extracted and merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenefitField {
    OopMax,
    RemainingOopMax,
    Copay,
}

impl BenefitField {
    pub const ALL: [BenefitField; 3] = [
        BenefitField::OopMax,
        BenefitField::RemainingOopMax,
        BenefitField::Copay,
    ];

    /// Wire name of the field, as providers and callers see it
    pub fn as_str(&self) -> &'static str {
        match self {
            BenefitField::OopMax => "oop_max",
            BenefitField::RemainingOopMax => "remaining_oop_max",
            BenefitField::Copay => "copay",
        }
    }
}

/// One provider's decoded response body
///
/// Any subset of the recognized fields may be present; unrecognized keys are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderResponse {
    pub oop_max: Option<i64>,
    pub remaining_oop_max: Option<i64>,
    pub copay: Option<i64>,
}

impl ProviderResponse {
    pub fn get(&self, field: BenefitField) -> Option<i64> {
        match field {
            BenefitField::OopMax => self.oop_max,
            BenefitField::RemainingOopMax => self.remaining_oop_max,
            BenefitField::Copay => self.copay,
        }
    }
}

/// The merged result returned to the caller
///
/// A field with no contributing provider value is omitted from the JSON body
/// entirely, never emitted as zero or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoalescedResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oop_max: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_oop_max: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copay: Option<i64>,
}

impl CoalescedResult {
    pub fn set(&mut self, field: BenefitField, value: i64) {
        match field {
            BenefitField::OopMax => self.oop_max = Some(value),
            BenefitField::RemainingOopMax => self.remaining_oop_max = Some(value),
            BenefitField::Copay => self.copay = Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let body = r#"{"oop_max": 10000, "plan_name": "gold", "copay": 500}"#;
        let resp: ProviderResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.oop_max, Some(10000));
        assert_eq!(resp.remaining_oop_max, None);
        assert_eq!(resp.copay, Some(500));
    }

    #[test]
    fn test_absent_fields_are_omitted_from_json() {
        let mut result = CoalescedResult::default();
        result.set(BenefitField::OopMax, 100);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"oop_max": 100}));
    }
}
