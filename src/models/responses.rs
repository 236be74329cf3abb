use crate::models::domain::SimilarityMatch;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `POST /api/similarity/calculate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResponse {
    /// Matches in backend order; never re-sorted client side
    #[serde(default)]
    pub data: Vec<SimilarityMatch>,
}

impl SimilarityResponse {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Acknowledgement returned by delete and store endpoints.
///
/// The backend does not fix a schema for these, so the JSON is kept as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confirmation(pub Value);

impl Confirmation {
    /// `true` for a bare JSON `true` or an object with `"success": true`
    pub fn is_affirmative(&self) -> bool {
        match &self.0 {
            Value::Bool(flag) => *flag,
            Value::Object(obj) => obj.get("success").and_then(Value::as_bool).unwrap_or(false),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_data_is_empty() {
        let response: SimilarityResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_confirmation_shapes() {
        assert!(Confirmation(json!(true)).is_affirmative());
        assert!(Confirmation(json!({"success": true, "id": "x"})).is_affirmative());
        assert!(!Confirmation(json!({"success": false})).is_affirmative());
        assert!(!Confirmation(json!("saved")).is_affirmative());
    }
}
