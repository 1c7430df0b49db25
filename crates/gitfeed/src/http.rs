//! Transport boundary for all HTTP I/O.
//!
//! Every network exchange in the pipeline (backend polling-status,
//! author pagination, GitHub fetches, duplicate checks, post creation)
//! goes through the [`HttpTransport`] trait so the whole pipeline can be
//! exercised in-process against canned responses.

use async_trait::async_trait;
use thiserror::Error;

/// HTTP methods used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A minimal HTTP request.
///
/// Bodies are UTF-8 text: the pipeline only ever sends form-encoded
/// payloads and receives JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Build a GET request with no headers or body.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Build a POST request with a body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Get the first header value matching `name` (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A minimal HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("http transport error: {0}")]
    Transport(String),

    #[error("no mock response registered for {method} {url}")]
    NoMockResponse { method: String, url: String },
}

/// Transport boundary for all HTTP I/O.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// A real HTTP transport backed by reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport whose client enforces a per-request deadline.
    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (k, v) in request.headers {
            builder = builder.header(&k, &v);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// ---------- Test-only mock transport ----------

#[cfg(test)]
use std::collections::{HashMap, VecDeque};
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// In-memory mock transport.
///
/// Designed for unit tests: no sockets, no loopback HTTP servers.
/// Responses are keyed by method + URL and replayed FIFO; every
/// request sent through the mock is recorded for inspection.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[cfg(test)]
#[derive(Default)]
struct MockTransportInner {
    routes: HashMap<(HttpMethod, String), VecDeque<HttpResponse>>,
    requests: Vec<HttpRequest>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a response for a method + URL.
    ///
    /// Multiple responses registered for the same key are returned in
    /// FIFO order.
    pub fn push_response(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        response: HttpResponse,
    ) {
        let mut inner = self
            .inner
            .lock()
            .expect("mock transport lock should not be poisoned");
        inner
            .routes
            .entry((method, url.into()))
            .or_default()
            .push_back(response);
    }

    /// Register a 200 response with a JSON body.
    pub fn push_json(&self, method: HttpMethod, url: impl Into<String>, body: impl Into<String>) {
        self.push_response(method, url, HttpResponse::new(200, body));
    }

    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        let inner = self
            .inner
            .lock()
            .expect("mock transport lock should not be poisoned");
        inner.requests.clone()
    }

    /// Count recorded requests whose URL starts with `prefix`.
    #[must_use]
    pub fn request_count_with_prefix(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.url.starts_with(prefix))
            .count()
    }
}

#[cfg(test)]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut inner = self
            .inner
            .lock()
            .expect("mock transport lock should not be poisoned");

        let key = (request.method, request.url.clone());
        inner.requests.push(request);

        match inner.routes.get_mut(&key).and_then(|q| q.pop_front()) {
            Some(resp) => Ok(resp),
            None => Err(HttpError::NoMockResponse {
                method: key.0.as_str().to_string(),
                url: key.1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn http_method_as_str_matches_expected_values() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }

    #[test]
    fn request_builder_collects_headers() {
        let req = HttpRequest::post("https://example.com/api", "a=1")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("X-CSRFToken", "tok");
        assert_eq!(req.header_value("content-type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(req.header_value("x-csrftoken"), Some("tok"));
        assert_eq!(req.header_value("missing"), None);
    }

    #[test]
    fn response_is_success_covers_2xx_only() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(304, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[tokio::test]
    async fn mock_transport_returns_registered_response_and_records_request() {
        let transport = MockTransport::new();
        let url = "https://example.com/api";

        transport.push_response(HttpMethod::Get, url, HttpResponse::new(200, "hello"));

        let req = HttpRequest::get(url).header("Accept", "application/json");
        let resp = transport.send(req.clone()).await.expect("mock response");
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "hello");

        let requests = transport.requests();
        assert_eq!(requests, vec![req]);
    }

    #[tokio::test]
    async fn mock_transport_replays_responses_fifo() {
        let transport = MockTransport::new();
        let url = "https://example.com/api";
        transport.push_response(HttpMethod::Get, url, HttpResponse::new(200, "first"));
        transport.push_response(HttpMethod::Get, url, HttpResponse::new(200, "second"));

        let first = transport.send(HttpRequest::get(url)).await.expect("first");
        let second = transport.send(HttpRequest::get(url)).await.expect("second");
        assert_eq!(first.body, "first");
        assert_eq!(second.body, "second");
    }

    #[tokio::test]
    async fn mock_transport_errors_when_no_response_is_registered() {
        let transport = MockTransport::new();
        let err = transport
            .send(HttpRequest::get("https://example.com/missing"))
            .await
            .expect_err("missing mock should error");
        match err {
            HttpError::NoMockResponse { method, url } => {
                assert_eq!(method, "GET");
                assert_eq!(url, "https://example.com/missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reqwest_transport_with_timeout_builds_client() {
        let transport =
            ReqwestTransport::with_timeout(Duration::from_millis(1)).expect("transport builds");
        let _ = transport;
    }

    #[tokio::test]
    async fn reqwest_transport_send_makes_request_and_reads_response() {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            stream
                .set_read_timeout(Some(Duration::from_secs(2)))
                .expect("set_read_timeout");

            let mut buf = Vec::new();
            let mut tmp = [0u8; 4096];
            loop {
                match stream.read(&mut tmp) {
                    Ok(0) => break,
                    Ok(n) => {
                        buf.extend_from_slice(&tmp[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(e)
                        if e.kind() == std::io::ErrorKind::WouldBlock
                            || e.kind() == std::io::ErrorKind::TimedOut =>
                    {
                        break;
                    }
                    Err(e) => panic!("read request: {e}"),
                }
            }

            let req_text = String::from_utf8_lossy(&buf);
            assert!(
                req_text.starts_with("POST /posts "),
                "unexpected request line: {req_text:?}"
            );
            assert!(
                req_text.to_lowercase().contains("x-csrftoken: tok"),
                "expected csrf header"
            );

            let body = b"{\"exists\":false}";
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .expect("write headers");
            stream.write_all(body).expect("write body");
            stream.flush().ok();
        });

        let transport = ReqwestTransport::new(reqwest::Client::new());
        let url = format!("http://{addr}/posts");
        let req = HttpRequest::post(url, "title=hi").header("X-CSRFToken", "tok");

        let resp = transport.send(req).await.expect("transport should succeed");
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "{\"exists\":false}");

        handle.join().expect("server thread");
    }

    #[tokio::test]
    async fn reqwest_transport_send_returns_transport_error_for_invalid_url() {
        let transport = ReqwestTransport::new(reqwest::Client::new());
        let err = transport
            .send(HttpRequest::get("not a url"))
            .await
            .expect_err("expected error");
        assert!(matches!(err, HttpError::Transport(_)));
    }
}
