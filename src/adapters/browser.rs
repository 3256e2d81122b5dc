//! Report viewer backed by the system web browser.
//!
//! Each report is written to its own temporary `.html` file which is handed
//! to the platform opener. The files live only as long as the viewer, so
//! nothing outlives the session.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Mutex;
use std::thread;

use tempfile::TempPath;

use crate::ports::{ReportError, ReportViewer};

/// Environment variable naming a program to open reports with.
pub const REPORT_OPENER_ENV: &str = "BRAINSCAN_REPORT_OPENER";

/// Opens reports in the default browser (or a configured program).
pub struct BrowserReportViewer {
    /// Program invoked with the report path; `None` uses the platform opener
    opener: Option<String>,

    /// Reports shown this session, removed on drop
    reports: Mutex<Vec<TempPath>>,
}

impl Default for BrowserReportViewer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BrowserReportViewer {
    #[must_use]
    pub fn new(opener: Option<String>) -> Self {
        Self {
            opener,
            reports: Mutex::new(Vec::new()),
        }
    }

    /// Viewer honouring `BRAINSCAN_REPORT_OPENER` when set.
    #[must_use]
    pub fn from_env() -> Self {
        let opener = std::env::var(REPORT_OPENER_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self::new(opener)
    }

    /// Number of report files currently held.
    #[must_use]
    pub fn report_count(&self) -> usize {
        self.reports.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn open(&self, path: &Path) -> Result<(), ReportError> {
        let mut command = match &self.opener {
            Some(program) => {
                let mut c = Command::new(program);
                c.arg(path);
                c
            }
            None => platform_opener(path),
        };

        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ReportError::Open(e.to_string()))?;

        // Reap the opener without blocking the UI loop.
        thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }
}

impl ReportViewer for BrowserReportViewer {
    fn show(&self, document: &str) -> Result<(), ReportError> {
        let mut file = tempfile::Builder::new()
            .prefix("brainscan-report-")
            .suffix(".html")
            .tempfile()?;
        file.write_all(document.as_bytes())?;
        file.flush()?;
        let path = file.into_temp_path();

        self.open(&path)?;
        tracing::info!("Report opened for printing");

        match self.reports.lock() {
            Ok(mut reports) => reports.push(path),
            Err(_) => {
                // Keep the file alive anyway; the browser may still be loading it.
                tracing::warn!("Report list lock poisoned; leaving report file in place");
                let _ = path.keep();
            }
        }
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn platform_opener(path: &Path) -> Command {
    let mut c = Command::new("open");
    c.arg(path);
    c
}

#[cfg(target_os = "windows")]
fn platform_opener(path: &Path) -> Command {
    let mut c = Command::new("cmd");
    c.args(["/C", "start", ""]).arg(path);
    c
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener(path: &Path) -> Command {
    let mut c = Command::new("xdg-open");
    c.arg(path);
    c
}
