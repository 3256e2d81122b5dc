//! Printable HTML report.
//!
//! The document is self-contained apart from the Bootstrap stylesheet and
//! opens the print dialog on load.

use crate::domain::{DiagnosisResult, PatientRecord};

/// Document title shown by the browser.
pub const REPORT_TITLE: &str = "Print Medical Report";

/// External stylesheet referenced by the report.
pub const REPORT_STYLESHEET: &str =
    "https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css";

/// Render the report for a patient and diagnosis.
///
/// Interpolated values are HTML-escaped.
#[must_use]
pub fn render_report_html(record: &PatientRecord, result: &DiagnosisResult) -> String {
    let age = record.age().map(|a| a.to_string()).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <link rel="stylesheet" href="{stylesheet}">
    <style>
      body {{
        font-family: Arial, sans-serif;
        padding: 20px;
      }}
      h1, h2, h3 {{
        color: #007bff;
        text-align: center;
      }}
      p {{
        margin-bottom: 0.5rem;
      }}
    </style>
  </head>
  <body>
    <h1 class="text-center">Medical Report</h1>
    <div class="container">
      <div class="row">
        <div class="col">
          <h2 style="text-align: left;">Patient Information</h2>
          <p><strong>Name:</strong> {name}</p>
          <p><strong>Age:</strong> {age}</p>
        </div>
        <div class="col">
          <h2 style="text-align: left;">Diagnosis Information</h2>
          <p><strong>Date &amp; Time of Diagnosis:</strong> {timestamp}</p>
          <p><strong>Detected Tumor:</strong> {label}</p>
        </div>
      </div>
    </div>
    <script>
      window.onload = function() {{
        window.print();
      }};
    </script>
  </body>
</html>
"#,
        title = REPORT_TITLE,
        stylesheet = REPORT_STYLESHEET,
        name = escape_html(&record.name),
        age = age,
        timestamp = escape_html(&record.diagnosis_timestamp_text()),
        label = escape_html(&result.label),
    )
}

/// Escape text for use in HTML element content and attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
