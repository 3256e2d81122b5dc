//! Result panel shown below the form.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::DiagnosisSession;
use crate::tui::styles::MedicalTheme;

/// Height of the panel, or 0 when there is nothing to show.
///
/// The panel only appears once a result exists or a request is in flight.
#[must_use]
pub fn result_panel_height(session: &DiagnosisSession) -> u16 {
    match (session.result().is_some(), session.in_flight() > 0) {
        (true, true) => 7,
        (true, false) => 6,
        (false, true) => 3,
        (false, false) => 0,
    }
}

/// Render the diagnosis result and the print hint.
pub fn render_result(f: &mut Frame, area: Rect, session: &DiagnosisSession) {
    let mut lines = Vec::new();

    if let Some(result) = session.result() {
        lines.push(Line::from(vec![
            Span::styled("You have been diagnosed with ", MedicalTheme::text()),
            Span::styled(result.label.clone(), MedicalTheme::highlight()),
            Span::styled(" tumor in your brain.", MedicalTheme::text()),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[Ctrl+P] ", MedicalTheme::key_hint()),
            Span::styled("Print Report", MedicalTheme::key_desc()),
        ]));
    }

    if session.in_flight() > 0 {
        lines.push(Line::from(Span::styled(
            format!("Uploading MRI image... ({} pending)", session.in_flight()),
            MedicalTheme::text_muted(),
        )));
    }

    let title = if session.result().is_some() {
        Span::styled(" Result ", MedicalTheme::subtitle())
    } else {
        Span::styled(" Submitting ", MedicalTheme::text_secondary())
    };

    let border_style = if session.result().is_some() {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::border()
    };

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    f.render_widget(panel, area);
}
