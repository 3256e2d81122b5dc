//! # Brainscan
//!
//! Terminal intake form for MRI brain-tumor classification.
//!
//! This crate provides:
//! - A patient form with derived age and diagnosis timestamp
//! - Upload of an MRI image to a remote prediction service
//! - A printable HTML report of the returned diagnosis
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (PatientRecord, UploadedImage, DiagnosisResult)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (reqwest, HTML report, browser)
//! - `application`: Session state, submission and report use cases
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::Config;
pub use domain::{DiagnosisResult, PatientRecord, UploadedImage};

/// Result type for Brainscan operations
pub type Result<T> = std::result::Result<T, BrainscanError>;

/// Main error type for Brainscan
#[derive(Debug, thiserror::Error)]
pub enum BrainscanError {
    #[error("Prediction failed: {0}")]
    Prediction(#[from] ports::PredictionError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
