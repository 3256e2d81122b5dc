//! HTTP adapter for the remote tumor classifier.
//!
//! Sends one `multipart/form-data` POST per prediction with the image as the
//! `file` part and the patient fields as text parts.

use std::time::{Duration, Instant};

use reqwest::blocking::{multipart, Client};

use crate::config::Config;
use crate::domain::{DiagnosisResult, PredictionResponse};
use crate::ports::{PredictionError, PredictionRequest, PredictionService};

/// Blocking reqwest client bound to one prediction endpoint.
///
/// The request timeout is disabled and failed requests are not retried.
pub struct HttpPredictionClient {
    endpoint: String,
    client: Client,
}

impl HttpPredictionClient {
    /// Client with the request timeout disabled.
    ///
    /// # Errors
    /// Returns `PredictionError::ClientSetup` if the TLS backend cannot be
    /// initialized.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| PredictionError::ClientSetup(e.to_string()))?;
        Ok(Self::with_client(endpoint, client))
    }

    /// Use a preconfigured client (proxy settings, TLS roots).
    #[must_use]
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// # Errors
    /// Returns `BrainscanError::Prediction` if the client cannot be built.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Ok(Self::new(config.predict_url.clone())?)
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(request: &PredictionRequest) -> Result<multipart::Form, PredictionError> {
        let bytes = request
            .image
            .read_bytes()
            .map_err(|source| PredictionError::Image {
                path: request.image.path().to_path_buf(),
                source,
            })?;
        tracing::debug!("Read {} image bytes for upload", bytes.len());

        let part = multipart::Part::bytes(bytes)
            .file_name(request.image.file_name())
            .mime_str(request.image.mime_type())
            .map_err(|e| PredictionError::ClientSetup(e.to_string()))?;
        let form = request
            .fields
            .iter()
            .fold(multipart::Form::new().part("file", part), |form, (key, value)| {
                form.text(*key, value.clone())
            });

        Ok(form)
    }
}

impl PredictionService for HttpPredictionClient {
    fn predict(&self, request: &PredictionRequest) -> Result<DiagnosisResult, PredictionError> {
        let form = Self::build_form(request)?;

        let started = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(
            "Prediction service answered HTTP {} after {} ms",
            status.as_u16(),
            started.elapsed().as_millis()
        );
        if !status.is_success() {
            return Err(PredictionError::Status(status.as_u16()));
        }

        let body: PredictionResponse = response
            .json()
            .map_err(|e| PredictionError::MalformedResponse(e.to_string()))?;

        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientRecord, UploadedImage};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn read_request(stream: &mut TcpStream) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).expect("read request");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(header_end) = find_subslice(&buf, b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        buf
    }

    /// Accept a single connection, answer it, and hand back the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/predict/"), handle)
    }

    fn local_client(endpoint: String) -> HttpPredictionClient {
        let client = Client::builder().no_proxy().build().expect("client");
        HttpPredictionClient::with_client(endpoint, client)
    }

    fn sample_request(image: UploadedImage) -> PredictionRequest {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 15, 0).unwrap();
        let mut record = PatientRecord::new(now);
        record.name = "Jane Roe".to_string();
        record.set_date_of_birth(
            NaiveDate::from_ymd_opt(2000, 6, 15),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        PredictionRequest::new(image, &record)
    }

    fn image_fixture(dir: &tempfile::TempDir) -> UploadedImage {
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"not-really-a-png").expect("write fixture");
        UploadedImage::new(path)
    }

    #[test]
    fn test_posts_all_multipart_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (endpoint, server) = serve_once("200 OK", r#"{"predicted_label":"glioma"}"#);

        let result = local_client(endpoint)
            .predict(&sample_request(image_fixture(&dir)))
            .expect("Should predict");
        assert_eq!(result.label, "glioma");

        let raw = server.join().expect("server thread");
        assert!(raw.starts_with("POST /predict/ "));
        assert!(raw.to_ascii_lowercase().contains("multipart/form-data; boundary="));
        assert!(raw.contains(r#"name="file"; filename="scan.png""#));
        assert!(raw.contains("not-really-a-png"));
        assert!(raw.to_ascii_lowercase().contains("content-type: image/png"));
        for field in ["name", "dob", "age", "diagnosisDateTime"] {
            assert!(raw.contains(&format!(r#"name="{field}""#)), "missing part {field}");
        }
        assert!(raw.contains("Jane Roe"));
        assert!(raw.contains("2000-06-15"));
        assert!(raw.contains("2024-01-01T10:15"));
    }

    #[test]
    fn test_from_config_keeps_endpoint() {
        let config = Config::with_predict_url("http://127.0.0.1:8000/predict/").expect("config");
        let client = HttpPredictionClient::from_config(&config).expect("client");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8000/predict/");
    }

    #[test]
    fn test_server_error_status() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (endpoint, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#);

        let err = local_client(endpoint)
            .predict(&sample_request(image_fixture(&dir)))
            .expect_err("Should fail");
        assert!(matches!(err, PredictionError::Status(500)));
        server.join().expect("server thread");
    }

    #[test]
    fn test_malformed_response() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (endpoint, server) = serve_once("200 OK", r#"{"label":"glioma"}"#);

        let err = local_client(endpoint)
            .predict(&sample_request(image_fixture(&dir)))
            .expect_err("Should fail");
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
        server.join().expect("server thread");
    }

    #[test]
    fn test_unreadable_image_fails_before_sending() {
        // Nothing listens here; the error must come from reading the file.
        let client = local_client("http://127.0.0.1:9/predict/".to_string());
        let err = client
            .predict(&sample_request(UploadedImage::new("/no/such/scan.png")))
            .expect_err("Should fail");
        assert!(matches!(err, PredictionError::Image { .. }));
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let err = local_client(format!("http://{addr}/predict/"))
            .predict(&sample_request(image_fixture(&dir)))
            .expect_err("Should fail");
        assert!(matches!(err, PredictionError::Transport(_)));
    }
}
