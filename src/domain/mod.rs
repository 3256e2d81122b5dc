//! Domain layer: Core business types and logic.
//!
//! This module contains plain Rust types with no I/O. Time-dependent values
//! (age, default diagnosis timestamp) are derived from an explicit clock value.

mod diagnosis;
mod patient;
mod upload;

pub use diagnosis::{DiagnosisResult, PredictionResponse};
pub use patient::{
    age_on, default_diagnosis_timestamp, parse_date_of_birth, PatientRecord,
    DATE_OF_BIRTH_FORMAT, DIAGNOSIS_TIMESTAMP_FORMAT,
};
pub use upload::UploadedImage;
