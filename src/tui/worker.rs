//! Background submission workers.
//!
//! Each submission runs on its own thread so the TUI loop keeps handling
//! input while the upload is in flight. There is no in-flight guard: several
//! workers may run at once. They all report on one channel, so outcomes are
//! received in the order the workers finished.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::application::SubmissionService;
use crate::domain::DiagnosisResult;
use crate::ports::{PredictionRequest, PredictionService};

/// Outcome reported by a submission worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionProgress {
    /// Prediction returned a label
    Complete(DiagnosisResult),
    /// Request failed (already logged)
    Failed,
}

/// Sends exactly one outcome, falling back to `Failed` if the worker unwinds.
struct OutcomeReporter {
    tx: Sender<SubmissionProgress>,
    reported: bool,
}

impl OutcomeReporter {
    fn report(mut self, progress: SubmissionProgress) {
        let _ = self.tx.send(progress);
        self.reported = true;
    }
}

impl Drop for OutcomeReporter {
    fn drop(&mut self) {
        if !self.reported {
            let _ = self.tx.send(SubmissionProgress::Failed);
        }
    }
}

/// Spawns submission workers and collects their outcomes.
pub struct SubmissionQueue {
    progress_tx: Sender<SubmissionProgress>,
    progress_rx: Receiver<SubmissionProgress>,
}

impl Default for SubmissionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionQueue {
    #[must_use]
    pub fn new() -> Self {
        let (progress_tx, progress_rx) = mpsc::channel();
        Self {
            progress_tx,
            progress_rx,
        }
    }

    /// Spawn a background submission.
    pub fn spawn<P>(&self, service: Arc<SubmissionService<P>>, request: PredictionRequest)
    where
        P: PredictionService + 'static,
    {
        let reporter = OutcomeReporter {
            tx: self.progress_tx.clone(),
            reported: false,
        };

        thread::spawn(move || {
            let progress = match service.submit(&request) {
                Some(result) => SubmissionProgress::Complete(result),
                None => SubmissionProgress::Failed,
            };
            reporter.report(progress);
        });
    }

    /// Next finished outcome, if any (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<SubmissionProgress> {
        self.progress_rx.try_recv().ok()
    }
}
