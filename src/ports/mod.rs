//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (prediction service,
//! report viewer).

mod prediction;
mod viewer;

pub use prediction::{PredictionError, PredictionRequest, PredictionService};
pub use viewer::{ReportError, ReportViewer};
