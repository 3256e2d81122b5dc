//! Report viewer port: where a rendered report document is shown.

/// Errors that can occur while showing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("No diagnosis result to report")]
    NoResult,

    #[error("Could not write report: {0}")]
    Write(#[from] std::io::Error),

    #[error("Could not open report viewer: {0}")]
    Open(String),
}

/// Trait for presenting a standalone HTML document to the user.
///
/// The document is expected to trigger its own print dialog once loaded.
pub trait ReportViewer {
    /// Show the document in a new viewing context.
    ///
    /// # Errors
    /// Returns `ReportError` if the document cannot be handed to the viewer.
    fn show(&self, document: &str) -> Result<(), ReportError>;
}
