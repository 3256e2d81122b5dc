//! Submission service: sends a snapshot of the form to the prediction service.
//!
//! This is the single error boundary for prediction failures: they are logged
//! and swallowed, never retried and never shown to the user.

use std::sync::Arc;

use crate::domain::DiagnosisResult;
use crate::ports::{PredictionRequest, PredictionService};

/// Service for running one prediction per submission.
pub struct SubmissionService<P>
where
    P: PredictionService,
{
    predictor: Arc<P>,
}

impl<P> SubmissionService<P>
where
    P: PredictionService,
{
    /// Create a new submission service.
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }

    /// Issue one prediction request.
    ///
    /// Returns the diagnosis on success. Any failure is logged at `error`
    /// level and reported as `None`.
    pub fn submit(&self, request: &PredictionRequest) -> Option<DiagnosisResult> {
        tracing::info!("Submitting MRI image for classification...");

        match self.predictor.predict(request) {
            Ok(result) => {
                tracing::info!("Prediction received: {}", result.label);
                Some(result)
            }
            Err(e) => {
                tracing::error!("Prediction request failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::DiagnosisSession;
    use crate::domain::UploadedImage;
    use crate::ports::PredictionError;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Mutex;

    /// Records every request and answers with a fixed outcome.
    struct RecordingPredictor {
        requests: Mutex<Vec<PredictionRequest>>,
        label: Option<&'static str>,
    }

    impl RecordingPredictor {
        fn answering(label: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                label,
            })
        }

        fn calls(&self) -> Vec<PredictionRequest> {
            self.requests.lock().expect("lock").clone()
        }
    }

    impl PredictionService for RecordingPredictor {
        fn predict(&self, request: &PredictionRequest) -> Result<DiagnosisResult, PredictionError> {
            self.requests.lock().expect("lock").push(request.clone());
            match self.label {
                Some(label) => Ok(DiagnosisResult::new(label)),
                None => Err(PredictionError::Transport("connection reset".to_string())),
            }
        }
    }

    fn filled_session() -> DiagnosisSession {
        let mut session = DiagnosisSession::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        session.set_name("Jane Roe");
        session.set_date_of_birth_input("2000-06-15", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        session
    }

    /// Drive one submission synchronously, the way the UI worker does.
    fn submit_form<P: PredictionService>(
        service: &SubmissionService<P>,
        session: &mut DiagnosisSession,
    ) {
        if let Ok(request) = session.begin_submission() {
            let outcome = service.submit(&request);
            session.finish_submission(outcome);
        }
    }

    #[test]
    fn test_no_image_never_calls_service() {
        let predictor = RecordingPredictor::answering(Some("glioma"));
        let service = SubmissionService::new(predictor.clone());
        let mut session = filled_session();

        submit_form(&service, &mut session);

        assert!(predictor.calls().is_empty());
        assert!(session.validation_error().is_some());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_blank_required_fields_never_call_service() {
        let predictor = RecordingPredictor::answering(Some("glioma"));
        let service = SubmissionService::new(predictor.clone());
        let mut session = DiagnosisSession::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        session.select_image(Some(UploadedImage::new("/scans/axial.png")));

        submit_form(&service, &mut session);
        session.set_name("Jane Roe");
        submit_form(&service, &mut session);

        assert!(predictor.calls().is_empty());
        assert!(session.validation_error().is_none());
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn test_one_request_with_all_fields() {
        let predictor = RecordingPredictor::answering(Some("glioma"));
        let service = SubmissionService::new(predictor.clone());
        let mut session = filled_session();
        session.select_image(Some(UploadedImage::new("/scans/axial.png")));

        submit_form(&service, &mut session);

        let calls = predictor.calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert_eq!(request.image.file_name(), "axial.png");
        assert_eq!(request.field("name"), Some("Jane Roe"));
        assert_eq!(request.field("dob"), Some("2000-06-15"));
        assert_eq!(request.field("age"), Some("23"));
        assert_eq!(request.field("diagnosisDateTime"), Some("2024-01-01T09:00"));

        assert_eq!(session.result().map(|r| r.label.as_str()), Some("glioma"));
        assert!(session.can_print());
    }

    #[test]
    fn test_failure_leaves_pre_submission_state() {
        let predictor = RecordingPredictor::answering(None);
        let service = SubmissionService::new(predictor.clone());
        let mut session = filled_session();
        session.select_image(Some(UploadedImage::new("/scans/axial.png")));
        let before = session.phase();

        submit_form(&service, &mut session);

        assert_eq!(predictor.calls().len(), 1);
        assert_eq!(session.phase(), before);
        assert!(session.result().is_none());
        assert!(session.validation_error().is_none());
        assert!(!session.can_print());
    }
}
