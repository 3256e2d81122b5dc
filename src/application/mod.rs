//! Application layer: Use cases and services.
//!
//! This module orchestrates domain types with ports to implement the
//! form session, the submission and the printable report.

mod report;
mod session;
mod submission;

pub use report::ReportService;
pub use session::{
    DiagnosisSession, RequiredField, SessionPhase, SubmissionBlocked, ValidationError,
};
pub use submission::SubmissionService;
