//! Report service: renders the printable report and hands it to a viewer.

use crate::adapters::render_report_html;
use crate::application::DiagnosisSession;
use crate::ports::{ReportError, ReportViewer};

/// Service for printing the diagnosis report of a session.
pub struct ReportService<V>
where
    V: ReportViewer,
{
    viewer: V,
}

impl<V> ReportService<V>
where
    V: ReportViewer,
{
    pub fn new(viewer: V) -> Self {
        Self { viewer }
    }

    #[must_use]
    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    /// Render the report and open it for printing.
    ///
    /// May be called any number of times once a result exists.
    ///
    /// # Errors
    /// Returns `ReportError::NoResult` before a diagnosis is available, or the
    /// viewer's error if the document cannot be shown.
    pub fn print(&self, session: &DiagnosisSession) -> Result<(), ReportError> {
        let result = session.result().ok_or(ReportError::NoResult)?;
        let document = render_report_html(session.record(), result);
        self.viewer.show(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiagnosisResult, UploadedImage};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingViewer {
        shown: Mutex<Vec<String>>,
    }

    impl ReportViewer for RecordingViewer {
        fn show(&self, document: &str) -> Result<(), ReportError> {
            self.shown.lock().expect("lock").push(document.to_string());
            Ok(())
        }
    }

    fn session() -> DiagnosisSession {
        let mut session = DiagnosisSession::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        session.set_name("Jane Roe");
        session.set_date_of_birth_input("2000-06-15", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        session.select_image(Some(UploadedImage::new("scan.png")));
        session
    }

    #[test]
    fn test_print_without_result_is_rejected() {
        let service = ReportService::new(RecordingViewer::default());
        let err = service.print(&session()).expect_err("Should refuse");
        assert!(matches!(err, ReportError::NoResult));
        assert!(service.viewer().shown.lock().expect("lock").is_empty());
    }

    #[test]
    fn test_print_is_repeatable() {
        let service = ReportService::new(RecordingViewer::default());
        let mut session = session();
        session.begin_submission().expect("Should validate");
        session.finish_submission(Some(DiagnosisResult::new("glioma")));

        service.print(&session).expect("first print");
        service.print(&session).expect("second print");

        let shown = service.viewer().shown.lock().expect("lock");
        assert_eq!(shown.len(), 2);
        assert!(shown[0].contains("Jane Roe"));
        assert!(shown[0].contains("glioma"));
    }
}
