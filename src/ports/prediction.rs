//! Prediction port: Trait for the remote tumor classifier.
//!
//! This trait abstracts the HTTP client (reqwest) from the application logic.

use std::path::PathBuf;

use crate::domain::{DiagnosisResult, PatientRecord, UploadedImage};

/// Errors that can occur while requesting a prediction.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Could not read image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Prediction service responded with HTTP {0}")]
    Status(u16),

    #[error("Malformed prediction response: {0}")]
    MalformedResponse(String),
}

/// Snapshot of one submission: the image reference plus the patient fields
/// rendered as strings, taken when the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    /// Image to upload as the `file` part
    pub image: UploadedImage,

    /// Text parts in form order (`name`, `dob`, `age`, `diagnosisDateTime`)
    pub fields: Vec<(&'static str, String)>,
}

impl PredictionRequest {
    #[must_use]
    pub fn new(image: UploadedImage, record: &PatientRecord) -> Self {
        Self {
            image,
            fields: record.form_fields(),
        }
    }

    /// Look up a text field by its part name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for classifying an uploaded image.
///
/// Implementations perform exactly one request per call: no retry.
pub trait PredictionService: Send + Sync {
    /// Upload the image and patient fields and return the predicted label.
    ///
    /// # Errors
    /// Returns `PredictionError` if the image cannot be read, the transport
    /// fails, the server answers with a non-success status, or the body does
    /// not contain a `predicted_label`.
    fn predict(&self, request: &PredictionRequest) -> Result<DiagnosisResult, PredictionError>;
}
