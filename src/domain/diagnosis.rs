//! Diagnosis result types.
//!
//! Represents the label returned by the remote tumor classifier.

use serde::{Deserialize, Serialize};

/// Label returned by the prediction service (e.g. "glioma").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub label: String,
}

impl DiagnosisResult {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl std::fmt::Display for DiagnosisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Response body of the prediction endpoint.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub predicted_label: String,
}

impl From<PredictionResponse> for DiagnosisResult {
    fn from(response: PredictionResponse) -> Self {
        Self::new(response.predicted_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_into_result() {
        let response: PredictionResponse =
            serde_json::from_str(r#"{"predicted_label":"glioma","score":0.93}"#)
                .expect("Should parse");
        let result = DiagnosisResult::from(response);
        assert_eq!(result.label, "glioma");
        assert_eq!(result.to_string(), "glioma");
    }

    #[test]
    fn test_response_missing_label_is_error() {
        let parsed = serde_json::from_str::<PredictionResponse>(r#"{"label":"glioma"}"#);
        assert!(parsed.is_err());
    }
}
