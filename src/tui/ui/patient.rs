//! Patient intake form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::DiagnosisSession;
use crate::tui::styles::MedicalTheme;

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Name,
    DateOfBirth,
    Image,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
}

/// Patient form state (text buffers of the editable fields)
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField {
                    id: FieldId::Name,
                    label: "Patient Name",
                    hint: "Enter patient name",
                    value: String::new(),
                },
                FormField {
                    id: FieldId::DateOfBirth,
                    label: "Date of Birth",
                    hint: "YYYY-MM-DD",
                    value: String::new(),
                },
                FormField {
                    id: FieldId::Image,
                    label: "Upload MRI Image",
                    hint: "path to image file",
                    value: String::new(),
                },
            ],
            selected_field: 0,
        }
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Move the cursor to a field
    pub fn focus(&mut self, id: FieldId) {
        if let Some(index) = self.fields.iter().position(|f| f.id == id) {
            self.selected_field = index;
        }
    }

    #[must_use]
    pub fn selected_id(&self) -> FieldId {
        self.fields[self.selected_field].id
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        if !c.is_control() {
            self.fields[self.selected_field].value.push(c);
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Current text of a field
    #[must_use]
    pub fn value(&self, id: FieldId) -> &str {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .map_or("", |f| f.value.as_str())
    }
}

/// Render the patient intake form
pub fn render_patient_form(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    session: &DiagnosisSession,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state, session);
    render_form_footer(f, chunks[2], session);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Patient Information", MedicalTheme::title()),
        Span::styled(" │ MRI Tumor Classification", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    session: &DiagnosisSession,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let rows = |area: Rect| {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area)
    };
    let left = rows(columns[0]);
    let right = rows(columns[1]);

    let record = session.record();
    let age = record.age().map(|a| a.to_string()).unwrap_or_default();
    let timestamp = record.diagnosis_timestamp_text();

    render_editable(f, left[0], state, 0);
    render_editable(f, left[1], state, 1);
    render_read_only(f, left[2], "Age", &age);
    render_read_only(f, right[0], "Diagnosis Date & Time", &timestamp);
    render_editable(f, right[1], state, 2);
}

fn render_editable(f: &mut Frame, area: Rect, state: &PatientFormState, index: usize) {
    let field = &state.fields[index];
    let is_selected = index == state.selected_field;

    let (border_style, title_style) = if is_selected {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", field.label), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let value_display = if field.value.is_empty() {
        Span::styled(field.hint, MedicalTheme::text_muted())
    } else {
        Span::styled(field.value.as_str(), MedicalTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if is_selected {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}

fn render_read_only(f: &mut Frame, area: Rect, label: &str, value: &str) {
    let block = Block::default()
        .title(Span::styled(format!(" {label} "), MedicalTheme::text_muted()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(value.to_string(), MedicalTheme::text_secondary()),
    ]))
    .block(block);

    f.render_widget(content, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, session: &DiagnosisSession) {
    let content = if let Some(err) = session.validation_error() {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.to_string(), MedicalTheme::danger()),
        ])
    } else {
        let mut spans = vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Submit ", MedicalTheme::key_desc()),
        ];
        if session.can_print() {
            spans.push(Span::styled("[Ctrl+P] ", MedicalTheme::key_hint()));
            spans.push(Span::styled("Print Report ", MedicalTheme::key_desc()));
        }
        spans.push(Span::styled("[Esc] ", MedicalTheme::key_hint()));
        spans.push(Span::styled("Quit", MedicalTheme::key_desc()));
        Line::from(spans)
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
