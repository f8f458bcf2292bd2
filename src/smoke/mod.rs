//! API smoke test
//!
//! Calls a running backend through a fixed, linear sequence: health,
//! register, login, profile (bearer token), services, categories. The run
//! stops at the first failing call. There are no retries.

pub mod client;
pub mod steps;

use chrono::Utc;
use serde_json::{json, Value};

use crate::error::HubResult;

pub use client::{ApiClient, ApiResponse};
pub use steps::SmokeStep;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Why a step failed
#[derive(Debug, Clone, PartialEq)]
pub enum StepFailure {
    /// The server answered with a non-2xx status
    Status { status: u16, body: String },
    /// Connection, timeout or body read error
    Transport(String),
    /// 2xx, but the body lacked something later steps need
    BadBody(String),
}

impl std::fmt::Display for StepFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, body } => write!(f, "HTTP {}: {}", status, body),
            Self::Transport(e) => write!(f, "{}", e),
            Self::BadBody(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    pub base_url: String,
    pub passed: Vec<SmokeStep>,
    pub failure: Option<(SmokeStep, StepFailure)>,
}

impl SmokeReport {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn exit_code(&self) -> i32 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.passed.iter().map(|s| format!("  ok    {}", s)).collect();
        match &self.failure {
            Some((step, failure)) => {
                lines.push(format!("  FAIL  {}", step));
                lines.push(format!("        {}", failure));
                lines.push(format!(
                    "Smoke test failed at step {} of {}",
                    self.passed.len() + 1,
                    SmokeStep::all().len()
                ));
            }
            None => lines.push(format!(
                "All {} checks passed against {}",
                self.passed.len(),
                self.base_url
            )),
        }
        lines
    }
}

/// One smoke-test run against `base_url`
pub struct SmokeTest {
    client: ApiClient,
    email: String,
    password: String,
}

impl SmokeTest {
    pub fn new(base_url: &str) -> HubResult<Self> {
        Ok(Self {
            client: ApiClient::new(base_url)?,
            email: format!("smoke+{}@servicehub.test", Utc::now().timestamp_millis()),
            password: "Smoke-test-Passw0rd!".to_string(),
        })
    }

    /// Unique per run so registration never collides
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn run(mut self) -> SmokeReport {
        let mut report = SmokeReport {
            base_url: self.client.base_url().to_string(),
            ..SmokeReport::default()
        };

        tracing::info!(base_url = %report.base_url, "starting smoke test");

        for step in SmokeStep::all() {
            match self.execute(*step) {
                Ok(()) => {
                    tracing::info!(step = %step, "passed");
                    report.passed.push(*step);
                }
                Err(failure) => {
                    tracing::error!(step = %step, error = %failure, "failed");
                    report.failure = Some((*step, failure));
                    break;
                }
            }
        }

        report
    }

    fn execute(&mut self, step: SmokeStep) -> Result<(), StepFailure> {
        let response = match step {
            SmokeStep::Register => self.client.post_json(
                step.path(),
                &json!({
                    "name": "Smoke Test",
                    "email": self.email,
                    "password": self.password,
                    "phone": "555-0199",
                    "role": "customer",
                }),
            ),
            SmokeStep::Login => self.client.post_json(
                step.path(),
                &json!({ "email": self.email, "password": self.password }),
            ),
            _ => self.client.get(step.path()),
        }
        .map_err(|e| StepFailure::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(StepFailure::Status {
                status: response.status.as_u16(),
                body: response.body_excerpt(),
            });
        }

        if step == SmokeStep::Login {
            let token = response
                .json()
                .as_ref()
                .and_then(extract_token)
                .ok_or_else(|| StepFailure::BadBody("login response has no token".into()))?;
            self.client.set_token(token);
        }

        Ok(())
    }
}

/// Accepts `token`, `accessToken` or either nested under `data`
fn extract_token(body: &Value) -> Option<String> {
    let direct = |v: &Value| {
        ["token", "accessToken"]
            .iter()
            .find_map(|key| v.get(key).and_then(Value::as_str))
            .map(str::to_string)
    };
    direct(body).or_else(|| body.get("data").and_then(direct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    /// Serve canned responses; `fail_path` answers 500
    fn spawn_stub(fail_path: Option<&'static str>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, fail_path);
            }
        });

        format!("http://{}", addr)
    }

    fn handle(mut stream: TcpStream, fail_path: Option<&str>) {
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let path = request_line.split_whitespace().nth(1).unwrap_or("").to_string();

        let mut content_length = 0usize;
        let mut authorization = String::new();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header.trim().is_empty() {
                break;
            }
            let lower = header.to_lowercase();
            if let Some(v) = lower.strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap_or(0);
            }
            if lower.starts_with("authorization:") {
                authorization = header.trim().to_string();
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();

        let (status, payload) = if Some(path.as_str()) == fail_path {
            ("500 Internal Server Error", r#"{"error":"boom"}"#)
        } else {
            match path.as_str() {
                "/api/health" => ("200 OK", r#"{"status":"ok"}"#),
                "/api/auth/register" => ("201 Created", r#"{"id":1}"#),
                "/api/auth/login" => ("200 OK", r#"{"data":{"token":"tok-123"}}"#),
                "/api/auth/profile" if authorization.ends_with("Bearer tok-123") => {
                    ("200 OK", r#"{"email":"smoke@servicehub.test"}"#)
                }
                "/api/auth/profile" => ("401 Unauthorized", r#"{"error":"no token"}"#),
                "/api/services" | "/api/categories" => ("200 OK", "[]"),
                _ => ("404 Not Found", "{}"),
            }
        };

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            payload.len(),
            payload
        );
        stream.write_all(response.as_bytes()).unwrap();
    }

    #[test]
    fn test_all_steps_pass_against_stub() {
        let base = spawn_stub(None);
        let report = SmokeTest::new(&base).unwrap().run();

        assert!(report.succeeded(), "{:?}", report.failure);
        assert_eq!(report.passed, SmokeStep::all().to_vec());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let base = spawn_stub(Some("/api/services"));
        let report = SmokeTest::new(&base).unwrap().run();

        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.passed.len(), 4);
        let (step, failure) = report.failure.clone().unwrap();
        assert_eq!(step, SmokeStep::Services);
        assert!(matches!(failure, StepFailure::Status { status: 500, .. }));
        assert!(report.lines().last().unwrap().contains("step 5 of 6"));
    }

    #[test]
    fn test_unreachable_server_fails_health() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let report = SmokeTest::new(&format!("http://{}", addr)).unwrap().run();
        assert!(report.passed.is_empty());
        assert!(matches!(
            report.failure,
            Some((SmokeStep::Health, StepFailure::Transport(_)))
        ));
    }

    #[test]
    fn test_extract_token_shapes() {
        assert_eq!(extract_token(&json!({"token": "a"})), Some("a".into()));
        assert_eq!(
            extract_token(&json!({"data": {"accessToken": "b"}})),
            Some("b".into())
        );
        assert_eq!(extract_token(&json!({"user": {}})), None);
    }

    #[test]
    fn test_unique_email_per_run() {
        let test = SmokeTest::new(DEFAULT_BASE_URL).unwrap();
        assert!(test.email().starts_with("smoke+"));
        assert!(test.email().ends_with("@servicehub.test"));
    }
}
