//! Minimal blocking HTTP client for the smoke test

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{HubError, HubResult};

/// Per-request limit; a hung server fails the step
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Status and body of one response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Body trimmed to a log-friendly length
    pub fn body_excerpt(&self) -> String {
        const MAX: usize = 200;
        let body = self.body.trim();
        match body.char_indices().nth(MAX) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        }
    }
}

pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> HubResult<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> HubResult<Self> {
        let mut builder = Client::builder().timeout(timeout);
        // A local dev server is never reached through a proxy
        if is_loopback(base_url) {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token attached to every later request
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn get(&self, path: &str) -> HubResult<ApiResponse> {
        let mut request = self.http.get(self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Self::finish(request.send()?)
    }

    pub fn post_json(&self, path: &str, body: &Value) -> HubResult<ApiResponse> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Self::finish(request.send()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn finish(response: reqwest::blocking::Response) -> HubResult<ApiResponse> {
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| HubError::Http(format!("Failed to read response body: {}", e)))?;
        Ok(ApiResponse { status, body })
    }
}

fn is_loopback(base_url: &str) -> bool {
    let host = base_url
        .split("://")
        .nth(1)
        .unwrap_or(base_url)
        .trim_start_matches('[');
    host.starts_with("localhost") || host.starts_with("127.") || host.starts_with("::1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_detection() {
        assert!(is_loopback("http://localhost:5000"));
        assert!(is_loopback("http://127.0.0.1:8080"));
        assert!(is_loopback("http://[::1]:5000"));
        assert!(!is_loopback("https://api.servicehub.example"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/health"), "http://localhost:5000/api/health");
    }

    #[test]
    fn test_silent_server_times_out() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            // Accept and hold the connection without answering
            let held = listener.accept();
            std::thread::sleep(Duration::from_secs(3));
            drop(held);
        });

        let client =
            ApiClient::with_timeout(&format!("http://{}", addr), Duration::from_millis(200)).unwrap();
        let started = std::time::Instant::now();
        assert!(client.get("/api/health").is_err());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_body_excerpt() {
        let response = ApiResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "x".repeat(500),
        };
        assert_eq!(response.body_excerpt().len(), 203);
        assert!(!response.is_success());
    }
}
