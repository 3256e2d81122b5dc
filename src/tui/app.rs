//! Main TUI application.
//!
//! Handles:
//! - Input event handling for the intake form
//! - Submissions via background workers
//! - Printing the report once a result exists

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{BrowserReportViewer, HttpPredictionClient};
use crate::application::{
    DiagnosisSession, ReportService, RequiredField, SubmissionBlocked, SubmissionService,
};
use crate::config::Config;
use crate::domain::UploadedImage;
use crate::ports::{PredictionService, ReportViewer};

use super::ui::{
    patient::{render_patient_form, FieldId, PatientFormState},
    render_disclaimer,
    result::{render_result, result_panel_height},
};
use super::worker::{SubmissionProgress, SubmissionQueue};

/// Main application state
pub struct App<P = HttpPredictionClient, V = BrowserReportViewer>
where
    P: PredictionService + 'static,
    V: ReportViewer,
{
    /// Whether the app should quit
    should_quit: bool,

    /// Submission service shared with the workers
    submission_service: Arc<SubmissionService<P>>,

    /// Report service
    report_service: ReportService<V>,

    /// Patient record, selected image and result
    session: DiagnosisSession,

    /// Text buffers of the editable fields
    form_state: PatientFormState,

    /// Background submissions (no in-flight guard)
    submissions: SubmissionQueue,
}

impl App {
    /// Create a new application using the production adapters.
    ///
    /// # Errors
    /// Returns error if services cannot be initialized.
    pub fn new(config: &Config) -> Result<Self> {
        let predictor = HttpPredictionClient::from_config(config)?;
        tracing::info!("Prediction endpoint: {}", predictor.endpoint());

        let submission_service = Arc::new(SubmissionService::new(Arc::new(predictor)));
        let report_service = ReportService::new(BrowserReportViewer::from_env());

        Ok(Self::with_dependencies(
            submission_service,
            report_service,
            Utc::now(),
        ))
    }
}

impl<P, V> App<P, V>
where
    P: PredictionService + 'static,
    V: ReportViewer,
{
    /// Create application with injected dependencies.
    ///
    /// `now` becomes the session's diagnosis timestamp.
    pub fn with_dependencies(
        submission_service: Arc<SubmissionService<P>>,
        report_service: ReportService<V>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            should_quit: false,
            submission_service,
            report_service,
            session: DiagnosisSession::new(now),
            form_state: PatientFormState::default(),
            submissions: SubmissionQueue::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &DiagnosisSession {
        &self.session
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Min(0),
                        Constraint::Length(result_panel_height(&self.session)),
                        Constraint::Length(3),
                    ])
                    .split(f.area());

                render_patient_form(f, chunks[0], &self.form_state, &self.session);
                if chunks[1].height > 0 {
                    render_result(f, chunks[1], &self.session);
                }
                render_disclaimer(f, chunks[2]);
            })?;

            // Short poll keeps the result panel responsive while uploads run.
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Drain finished workers into the session.
    ///
    /// Outcomes are applied in the order the workers finished, so the last
    /// response to resolve decides the displayed result.
    pub fn poll_workers(&mut self) {
        while let Some(progress) = self.submissions.try_recv() {
            let outcome = match progress {
                SubmissionProgress::Complete(result) => Some(result),
                SubmissionProgress::Failed => None,
            };
            self.session.finish_submission(outcome);
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Char('p') | KeyCode::Char('P') => self.print_report(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
                self.sync_selected_field();
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
                self.sync_selected_field();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
                self.sync_selected_field();
            }
            KeyCode::Enter => {
                self.submit();
            }
            _ => {}
        }
    }

    /// Push the edited buffer into the session.
    fn sync_selected_field(&mut self) {
        let id = self.form_state.selected_id();
        let value = self.form_state.value(id);

        match id {
            FieldId::Name => self.session.set_name(value),
            FieldId::DateOfBirth => {
                let today = Local::now().date_naive();
                self.session.set_date_of_birth_input(value, today);
            }
            FieldId::Image => {
                let path = value.trim();
                let image = (!path.is_empty()).then(|| UploadedImage::new(path));
                self.session.select_image(image);
            }
        }
    }

    fn submit(&mut self) {
        match self.session.begin_submission() {
            Ok(request) => {
                self.submissions
                    .spawn(self.submission_service.clone(), request);
            }
            Err(SubmissionBlocked::Incomplete(field)) => {
                self.form_state.focus(match field {
                    RequiredField::Name => FieldId::Name,
                    RequiredField::DateOfBirth => FieldId::DateOfBirth,
                });
            }
            Err(e) => {
                tracing::debug!("Submission blocked: {}", e);
            }
        }
    }

    fn print_report(&mut self) {
        if !self.session.can_print() {
            return;
        }

        if let Err(e) = self.report_service.print(&self.session) {
            tracing::error!("Failed to open report: {}", e);
        }
    }
}
