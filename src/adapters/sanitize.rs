//! Log redaction for patient-identifying text.
//!
//! Every formatted log line passes through [`sanitize`] before reaching its
//! sink. Redacted:
//! - Contextual patient fields (`name=`, `patient:`, `dob=`)
//! - Calendar dates such as dates of birth (`1987-11-02`, `02/11/1987`)
//! - Email addresses and phone numbers
//! - Medical record numbers
//!
//! Call sites should still avoid logging patient fields; this is the net
//! underneath.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// Per-call byte cap, overridable with `BRAINSCAN_SANITIZE_MAX_BYTES`.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

/// Ordered redaction rules. Contextual rules run first so their whole value
/// is replaced before the narrower date rule sees it.
const RULES: &[(&str, &str)] = &[
    (
        r#"(?i)\b(?:patient[_ ]?name|patient|name|dob|date[_ ]of[_ ]birth)\s*[:=]\s*(?:"[^"]*"|'[^']*'|\S+)"#,
        "[REDACTED-PATIENT]",
    ),
    (r"\bMRN[:\s]?\d{6,10}\b", "[REDACTED-MRN]"),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"\b(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}\b",
        "[REDACTED-PHONE]",
    ),
    // A date followed by `T` is a log or diagnosis timestamp and is kept.
    (r"\b\d{4}-\d{2}-\d{2}\b([^T]|$)", "[REDACTED-DATE]${1}"),
    (r"\b\d{1,2}/\d{1,2}/\d{4}\b", "[REDACTED-DATE]"),
];

struct Redactor {
    set: RegexSet,
    rules: Vec<(Regex, &'static str)>,
}

static REDACTOR: OnceLock<Option<Redactor>> = OnceLock::new();

fn redactor() -> Option<&'static Redactor> {
    REDACTOR
        .get_or_init(|| {
            let set = RegexSet::new(RULES.iter().map(|(p, _)| *p)).ok()?;
            let rules = RULES
                .iter()
                .map(|(p, r)| Regex::new(p).map(|re| (re, *r)))
                .collect::<Result<Vec<_>, _>>()
                .ok()?;
            Some(Redactor { set, rules })
        })
        .as_ref()
}

fn max_sanitize_bytes() -> usize {
    std::env::var("BRAINSCAN_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact patient-identifying text.
///
/// Input beyond the byte cap is dropped and marked `[TRUNCATED]`. If the
/// rules failed to compile, the whole input is withheld.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut out = match redactor() {
        None => "[REDACTED-UNSANITIZED]".to_string(),
        Some(r) if !r.set.is_match(prefix) => prefix.to_string(),
        Some(r) => {
            let matched: Vec<usize> = r.set.matches(prefix).into_iter().collect();
            let mut text = prefix.to_string();
            for idx in matched {
                let (regex, replacement) = &r.rules[idx];
                text = regex.replace_all(&text, *replacement).into_owned();
            }
            text
        }
    };

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// `MakeWriter` wrapper that sanitizes each formatted log line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A formatter that never emits a newline must not grow the buffer forever.
        if self.buffer.len() > max_sanitize_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_redacts_contextual_name() {
        let out = sanitize(r#"submitting name="Jane Roe" for review"#);
        assert!(out.contains("[REDACTED-PATIENT]"));
        assert!(!out.contains("Jane"));
        assert!(out.ends_with("for review"));
    }

    #[test]
    fn test_redacts_date_of_birth() {
        let out = sanitize("parsed 1987-11-02 from input");
        assert!(out.contains("[REDACTED-DATE]"));
        assert!(!out.contains("1987-11-02"));

        let out = sanitize("born 02/11/1987");
        assert!(!out.contains("1987"));
    }

    #[test]
    fn test_keeps_timestamps() {
        let line = "2024-01-01T09:30:00.000Z  INFO brainscan: Starting";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_redacts_email_phone_mrn() {
        let out = sanitize("contact jane@hospital.org or 555-123-4567, MRN:12345678");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(out.contains("[REDACTED-PHONE]"));
        assert!(out.contains("[REDACTED-MRN]"));
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(sanitize("Prediction received"), "Prediction received");
    }

    #[test]
    fn test_truncates_large_inputs() {
        let out = sanitize_with_limit("abcdefghijklmnopqrstuvwxyz", 8);
        assert_eq!(out, "abcdefgh [TRUNCATED]");
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter {
                inner: &mut sink,
                buffer: Vec::new(),
            };
            writer.write_all(b"dob=1990-04-01 set\npartial ").expect("write");
            writer.write_all(b"line\n").expect("write");
        }
        let text = String::from_utf8(sink).expect("utf8");
        assert!(!text.contains("1990-04-01"));
        assert!(text.contains("partial line\n"));
    }
}
