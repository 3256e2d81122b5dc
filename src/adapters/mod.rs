//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external systems:
//! - `http`: reqwest client for the prediction service
//! - `report`: HTML rendering of the printable report
//! - `browser`: report viewer using the system browser
//! - `sanitize`: patient-data filtering for logs

pub mod browser;
pub mod http;
pub mod report;
pub mod sanitize;

pub use browser::BrowserReportViewer;
pub use http::HttpPredictionClient;
pub use report::render_report_html;
