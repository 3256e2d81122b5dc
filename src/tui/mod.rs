//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a single intake screen with:
//! - Patient data entry with derived age
//! - Background upload of the MRI image
//! - Result panel and printable report

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{SubmissionProgress, SubmissionQueue};
