//! HTTP client for the analysis backend

use std::path::Path;
use std::time::Duration;

use logdeck_types::LogEntry;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ClientError;
use crate::ingest::IngestPayload;

/// Backend address used when nothing is configured
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Instruction sent along with selected entries for re-analysis
pub const ANALYSIS_PROMPT: &str = "\
You are a professional debugger, specializing in log analysis.
You have been hired by a company to analyze their logs and find the root cause of an issue.
The company has provided you with a set of logs to analyze.
Take each log, and analyze it further to determine the root cause of the issue.
Each line starts with an index, in your analysis, \
you must directly reference the index of the log.";

/// Response body of `/analyse`
#[derive(Debug, Deserialize)]
pub struct AnalyseResponse {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// JSON body for re-analysing a subset of entries
#[derive(Serialize)]
struct AnalyseRequest<'a> {
    logs: &'a [LogEntry],
    context: &'a str,
}

/// Client for the `/analyse` endpoint
#[derive(Clone, Debug)]
pub struct AnalyseClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalyseClient {
    /// Create a client for the backend at `base_url`.
    /// `timeout` of None means requests never time out.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: format!("{}/analyse", base_url.trim_end_matches('/')),
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a file or pasted text as multipart form data
    pub async fn ingest(&self, payload: IngestPayload) -> Result<Vec<LogEntry>, ClientError> {
        let form = match payload {
            IngestPayload::File(path) => {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|source| ClientError::ReadFile {
                        path: path.clone(),
                        source,
                    })?;
                debug!(path = %path.display(), bytes = bytes.len(), "uploading log file");
                Form::new().part("file", Part::bytes(bytes).file_name(upload_name(&path)))
            }
            IngestPayload::Text(text) => {
                debug!(bytes = text.len(), "uploading pasted logs");
                Form::new().text("logs", text)
            }
        };

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let logs = Self::decode(response).await?;
        info!(count = logs.len(), "received analysed logs");
        Ok(logs)
    }

    /// Re-analyse selected entries with an instruction prompt
    pub async fn analyse_selected(
        &self,
        logs: &[LogEntry],
        context: &str,
    ) -> Result<Vec<LogEntry>, ClientError> {
        debug!(count = logs.len(), "sending selected logs for analysis");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&AnalyseRequest { logs, context })
            .send()
            .await?;
        let logs = Self::decode(response).await?;
        info!(count = logs.len(), "received re-analysed logs");
        Ok(logs)
    }

    async fn decode(response: reqwest::Response) -> Result<Vec<LogEntry>, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        let body: AnalyseResponse = response.json().await?;
        Ok(body.logs)
    }
}

fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "logs.txt".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logdeck_types::LogLevel;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const TWO_LOGS: &str = concat!(
        r#"{"logs":[{"timestamp":"10:00","level":"error","message":"boom"},"#,
        r#"{"timestamp":null,"level":null,"message":"ok"}]}"#,
    );

    /// Serve one canned response and hand back the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let headers = text[..header_end].to_lowercase();
                let body_len = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok());
                match body_len {
                    Some(len) if buf.len() >= header_end + 4 + len => break,
                    None if text.ends_with("0\r\n\r\n") => break,
                    _ => {}
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn test_ingest_pasted_text() {
        let (url, server) = serve_once("200 OK", TWO_LOGS).await;
        let client = AnalyseClient::new(&url, None).unwrap();

        let logs = client
            .ingest(IngestPayload::Text("10:00 ERROR boom".to_string()))
            .await
            .unwrap();

        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].level, Some(LogLevel::Error));
        assert!(!logs[1].has_timestamp());

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /analyse "));
        assert!(request.contains("multipart/form-data"));
        assert!(request.contains("name=\"logs\""));
        assert!(request.contains("10:00 ERROR boom"));
    }

    #[tokio::test]
    async fn test_ingest_file_upload() {
        let mut file = tempfile::Builder::new().suffix(".log").tempfile().unwrap();
        writeln!(file, "2024-01-01 10:00:00 INFO from disk").unwrap();

        let (url, server) = serve_once("200 OK", r#"{"logs":[]}"#).await;
        let client = AnalyseClient::new(&format!("{url}/"), None).unwrap();
        assert_eq!(client.endpoint(), format!("{url}/analyse"));

        let logs = client
            .ingest(IngestPayload::File(file.path().to_path_buf()))
            .await
            .unwrap();
        assert!(logs.is_empty());

        let request = server.await.unwrap();
        assert!(request.contains("name=\"file\""));
        assert!(request.contains("filename=\""));
        assert!(request.contains("INFO from disk"));
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_request() {
        let client = AnalyseClient::new("http://127.0.0.1:9", None).unwrap();
        let err = client
            .ingest(IngestPayload::File("/definitely/not/here.log".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ReadFile { .. }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"x"}"#).await;
        let client = AnalyseClient::new(&url, None).unwrap();

        let err = client
            .ingest(IngestPayload::Text("line".to_string()))
            .await
            .unwrap_err();
        match err {
            ClientError::Status(status) => assert_eq!(status.as_u16(), 500),
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_analyse_selected_sends_json() {
        let (url, server) = serve_once("200 OK", TWO_LOGS).await;
        let client = AnalyseClient::new(&url, None).unwrap();
        let selected = vec![LogEntry::new("10:00", Some(LogLevel::Error), "boom")];

        let logs = client
            .analyse_selected(&selected, ANALYSIS_PROMPT)
            .await
            .unwrap();
        assert_eq!(logs.len(), 2);

        let request = server.await.unwrap();
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.contains(r#""level":"ERROR""#));
        assert!(request.contains(r#""context":"You are a professional debugger, specializing"#));
        assert!(request.contains(r#"log analysis.\nYou have been hired by a company"#));
    }
}
