//! Form session: the in-memory state behind the intake form.
//!
//! Holds the patient record, the selected image, the last diagnosis result
//! and the inline validation message. Nothing here is persisted.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{parse_date_of_birth, DiagnosisResult, PatientRecord, UploadedImage};
use crate::ports::PredictionRequest;

/// Visible phase of a session.
///
/// A failed submission falls back to `FileSelected` (or `Resulted` when an
/// earlier submission succeeded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    FileSelected,
    Submitting,
    Resulted,
}

/// Inline form error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload an MRI image.")]
    MissingImage,
}

/// Required text field that is blank or does not hold a valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    DateOfBirth,
}

/// Reason a submission was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionBlocked {
    /// A required field is missing; the inline error line is left as is.
    #[error("required field {0:?} is empty")]
    Incomplete(RequiredField),

    /// Shown on the inline error line.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Form state for one run of the application.
#[derive(Debug, Clone)]
pub struct DiagnosisSession {
    record: PatientRecord,
    image: Option<UploadedImage>,
    result: Option<DiagnosisResult>,
    validation_error: Option<ValidationError>,
    in_flight: usize,
}

impl DiagnosisSession {
    /// Start a session; `now` becomes the diagnosis timestamp.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            record: PatientRecord::new(now),
            image: None,
            result: None,
            validation_error: None,
            in_flight: 0,
        }
    }

    #[must_use]
    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    #[must_use]
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&DiagnosisResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn validation_error(&self) -> Option<ValidationError> {
        self.validation_error
    }

    /// Number of submissions awaiting a response.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.name = name.into();
    }

    /// Apply the typed date of birth; the age is derived against `today`.
    pub fn set_date_of_birth_input(&mut self, input: &str, today: NaiveDate) {
        self.record
            .set_date_of_birth(parse_date_of_birth(input), today);
    }

    pub fn select_image(&mut self, image: Option<UploadedImage>) {
        self.image = image;
    }

    /// First required field that would block a submission.
    #[must_use]
    pub fn missing_required_field(&self) -> Option<RequiredField> {
        if self.record.name.trim().is_empty() {
            Some(RequiredField::Name)
        } else if self.record.date_of_birth().is_none() {
            Some(RequiredField::DateOfBirth)
        } else {
            None
        }
    }

    /// Validate and snapshot the form for a prediction request.
    ///
    /// Required fields are checked first and block without touching the
    /// validation error. Without an image the validation error is set and
    /// nothing is sent. Otherwise the error is cleared and the submission
    /// counted as in flight until
    /// [`finish_submission`](Self::finish_submission) is called.
    ///
    /// # Errors
    /// Returns `SubmissionBlocked::Incomplete` for a blank name or a missing
    /// date of birth, and `ValidationError::MissingImage` when no image is
    /// selected.
    pub fn begin_submission(&mut self) -> Result<PredictionRequest, SubmissionBlocked> {
        if let Some(field) = self.missing_required_field() {
            return Err(SubmissionBlocked::Incomplete(field));
        }

        let Some(image) = self.image.clone() else {
            self.validation_error = Some(ValidationError::MissingImage);
            return Err(ValidationError::MissingImage.into());
        };

        self.validation_error = None;
        self.in_flight += 1;
        Ok(PredictionRequest::new(image, &self.record))
    }

    /// Record the outcome of one submission.
    ///
    /// A result replaces any earlier one. `None` (a failed request) leaves the
    /// visible state untouched.
    pub fn finish_submission(&mut self, outcome: Option<DiagnosisResult>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Some(result) = outcome {
            self.result = Some(result);
        }
    }

    /// Whether a report can be printed.
    #[must_use]
    pub fn can_print(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.in_flight > 0 {
            SessionPhase::Submitting
        } else if self.result.is_some() {
            SessionPhase::Resulted
        } else if self.image.is_some() {
            SessionPhase::FileSelected
        } else {
            SessionPhase::Empty
        }
    }
}
