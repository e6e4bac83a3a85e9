use crate::catalog::services::QueryParams;
use crate::ports::outbound::{CatalogRepository, HttpMethod};
use crate::shared::error::{ConnectionFailure, PyxisError};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://catalog.redhat.com/api/containers/v1/";
pub const API_KEY_ENV: &str = "PYXIS_API_KEY";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_HEADER: &str = "x-api-key";

/// Connection settings for [`PyxisClient`]
#[derive(Clone)]
pub struct ClientSettings {
    /// Explicit credential; falls back to `PYXIS_API_KEY` when `None`
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientSettings {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keeps the credential out of logs
impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Base URL with exactly one trailing slash, so relative endpoints join
/// below it instead of replacing its last segment
pub fn normalize_base_url(base_url: &str) -> Result<Url> {
    let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
    Url::parse(&normalized).with_context(|| format!("Invalid Pyxis base URL: {}", base_url))
}

/// PyxisClient adapter for the Red Hat Pyxis REST API
///
/// Holds one pooled `reqwest::Client` carrying the credential as a default
/// header, so every request is authenticated. Failures are classified into
/// `PyxisError` variants; nothing is retried.
pub struct PyxisClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl PyxisClient {
    /// Creates a client from explicit settings, reading the credential from
    /// `PYXIS_API_KEY` when the settings carry none.
    ///
    /// # Errors
    /// `PyxisError::Auth` when no non-empty credential is available.
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(API_KEY_ENV)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| {
                PyxisError::auth(
                    "No API key provided. Set PYXIS_API_KEY environment variable or pass api_key parameter.",
                )
            })?;

        let base_url = normalize_base_url(&settings.base_url)?;

        let mut credential = HeaderValue::from_str(api_key.trim()).map_err(|_| {
            PyxisError::auth("API key contains characters that are not allowed in an HTTP header.")
        })?;
        credential.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), credential);

        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(format!("pyxis-mcp/{}", version))
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            timeout: settings.timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint_url(&self, endpoint: &str) -> std::result::Result<Url, PyxisError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| PyxisError::api(None, format!("Invalid endpoint {}: {}", endpoint, e)))
    }

    fn classify(&self, url: &Url, error: reqwest::Error) -> PyxisError {
        if error.is_timeout() {
            ConnectionFailure::TimedOut {
                url: url.to_string(),
                timeout: self.timeout,
            }
            .into()
        } else if error.is_connect() {
            ConnectionFailure::Unreachable {
                url: url.to_string(),
            }
            .into()
        } else {
            PyxisError::api(None, format!("Unexpected error during request: {}", error))
        }
    }

    async fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> std::result::Result<Value, PyxisError> {
        let url = self.endpoint_url(endpoint)?;
        let mut request_url = url.clone();
        if !params.is_empty() {
            request_url.query_pairs_mut().extend_pairs(params.iter());
        }

        debug!(method = %method, url = %request_url, "Sending Pyxis request");

        let mut request = self.client.request(method.into(), request_url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.classify(&url, e))?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(PyxisError::auth("Authentication failed. Check your API key."));
        }

        let text = response.text().await.map_err(|e| self.classify(&url, e))?;
        debug!(status = status.as_u16(), bytes = text.len(), "Pyxis response received");

        if status.is_client_error() || status.is_server_error() {
            return Err(PyxisError::api(
                Some(status.as_u16()),
                describe_failure(status.as_u16(), &text),
            ));
        }

        serde_json::from_str(&text).map_err(|e| {
            PyxisError::api(
                Some(status.as_u16()),
                format!("Failed to parse JSON response: {}", e),
            )
        })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// `Request failed with status <code>` plus whatever the body says about it.
///
/// A JSON body contributes its `detail` (or else `message`) field; a body
/// that is not JSON is appended verbatim.
fn describe_failure(status: u16, body: &str) -> String {
    let mut message = format!("Request failed with status {}", status);
    match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            if let Some(reason) = json.get("detail").or_else(|| json.get("message")) {
                let reason = match reason {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                message.push_str(": ");
                message.push_str(&reason);
            }
        }
        Err(_) => {
            message.push_str(": ");
            message.push_str(body);
        }
    }
    message
}

#[async_trait]
impl CatalogRepository for PyxisClient {
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Value> {
        Ok(self.execute(method, endpoint, params, body).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::services::ImageSearch;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    fn http_response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        )
    }

    fn json_response(status: &str, body: &str) -> String {
        http_response(status, "application/json", body)
    }

    /// Reads one HTTP/1.1 request (head plus Content-Length body)
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
            let text = String::from_utf8_lossy(&buffer).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buffer.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).to_string()
    }

    /// Serves a single canned response and hands back the raw request
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{}/api/containers/v1", addr), handle)
    }

    fn client(base_url: &str) -> PyxisClient {
        PyxisClient::new(
            ClientSettings::default()
                .with_api_key("test-key")
                .with_base_url(base_url)
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap()
    }

    fn pyxis_error(err: anyhow::Error) -> PyxisError {
        err.downcast::<PyxisError>().expect("expected a PyxisError")
    }

    #[test]
    fn test_missing_api_key_is_auth_error() {
        // a blank explicit key falls back to the environment
        let settings = ClientSettings::default().with_api_key("   ");
        if std::env::var(API_KEY_ENV).map(|k| !k.trim().is_empty()).unwrap_or(false) {
            return;
        }
        let err = PyxisClient::new(settings).err().unwrap();
        match pyxis_error(err) {
            PyxisError::Auth { message } => assert!(message.contains("PYXIS_API_KEY")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_base_url_normalized() {
        assert_eq!(
            normalize_base_url("https://catalog.redhat.com/api/containers/v1")
                .unwrap()
                .as_str(),
            "https://catalog.redhat.com/api/containers/v1/"
        );
        assert_eq!(
            normalize_base_url("https://catalog.redhat.com/api/containers/v1///")
                .unwrap()
                .as_str(),
            "https://catalog.redhat.com/api/containers/v1/"
        );
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn test_endpoint_joined_under_base() {
        let client = client("https://catalog.example/api/containers/v1");
        assert_eq!(
            client.endpoint_url("/images/abc").unwrap().as_str(),
            "https://catalog.example/api/containers/v1/images/abc"
        );
    }

    #[test]
    fn test_settings_debug_redacts_key() {
        let settings = ClientSettings::default().with_api_key("super-secret");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_describe_failure() {
        assert_eq!(
            describe_failure(500, r#"{"detail":"boom"}"#),
            "Request failed with status 500: boom"
        );
        assert_eq!(
            describe_failure(404, r#"{"message":"not found","status":404}"#),
            "Request failed with status 404: not found"
        );
        assert_eq!(
            describe_failure(400, r#"{"detail":"first","message":"second"}"#),
            "Request failed with status 400: first"
        );
        assert_eq!(
            describe_failure(502, "<html>Bad Gateway</html>"),
            "Request failed with status 502: <html>Bad Gateway</html>"
        );
        assert_eq!(
            describe_failure(503, r#"{"error":"x"}"#),
            "Request failed with status 503"
        );
    }

    #[tokio::test]
    async fn test_success_returns_raw_json_and_sends_credentials() {
        let body = r#"{"data":[{"_id":"a","extra":1}],"total":1,"page":0,"page_size":20}"#;
        let (base_url, server) = serve_once(json_response("200 OK", body)).await;
        let client = client(&base_url);

        let search = ImageSearch {
            query: Some("ubi9".to_string()),
            architecture: Some("amd64".to_string()),
            ..Default::default()
        };
        let value = client.search_images(&search).await.unwrap();
        assert_eq!(value["data"][0]["extra"], 1);

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /api/containers/v1/images?"));
        assert!(request_line.contains("page=0"));
        assert!(request_line.contains("page_size=20"));
        assert!(request_line.contains("filter=repositories.repository%3Dmatch%3Dubi9"));
        assert!(request_line.contains("architecture=amd64"));
        assert!(!request_line.contains("registry="));

        let lowered = request.to_lowercase();
        assert!(lowered.contains("x-api-key: test-key"));
        assert!(lowered.contains("accept: application/json"));
        assert!(lowered.contains("user-agent: pyxis-mcp/"));
    }

    #[tokio::test]
    async fn test_get_by_id_has_no_query() {
        let (base_url, server) = serve_once(json_response("200 OK", r#"{"_id":"img"}"#)).await;
        client(&base_url).get_image_by_id("img").await.unwrap();
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/containers/v1/images/img HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let (base_url, server) = serve_once(json_response("200 OK", r#"{"ok":true}"#)).await;
        let body = serde_json::json!({"name": "probe"});
        let value = client(&base_url)
            .post("images", Some(&body), &QueryParams::new())
            .await
            .unwrap();
        assert_eq!(value["ok"], true);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/containers/v1/images HTTP/1.1"));
        assert!(request.ends_with(r#"{"name":"probe"}"#));
    }

    #[tokio::test]
    async fn test_401_is_auth_error() {
        let (base_url, _server) =
            serve_once(json_response("401 Unauthorized", r#"{"detail":"bad key"}"#)).await;
        let err = client(&base_url).get_image_by_id("img").await.unwrap_err();
        assert_eq!(
            pyxis_error(err),
            PyxisError::auth("Authentication failed. Check your API key.")
        );
    }

    #[tokio::test]
    async fn test_500_with_detail_is_api_error() {
        let (base_url, _server) =
            serve_once(json_response("500 Internal Server Error", r#"{"detail":"boom"}"#)).await;
        let err = client(&base_url).get_image_by_id("img").await.unwrap_err();
        let err = pyxis_error(err);
        assert_eq!(err.status(), Some(500));
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }

    #[tokio::test]
    async fn test_404_plain_text_body_appended() {
        let (base_url, _server) =
            serve_once(http_response("404 Not Found", "text/plain", "no such image")).await;
        let err = client(&base_url).get_image_by_id("img").await.unwrap_err();
        assert_eq!(
            pyxis_error(err).to_string(),
            "Request failed with status 404: no such image"
        );
    }

    #[tokio::test]
    async fn test_non_json_success_is_api_error() {
        let (base_url, _server) =
            serve_once(http_response("200 OK", "text/html", "<html></html>")).await;
        let err = client(&base_url).get_image_by_id("img").await.unwrap_err();
        match pyxis_error(err) {
            PyxisError::Api { status, message } => {
                assert_eq!(status, Some(200));
                assert!(message.starts_with("Failed to parse JSON response"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let client = PyxisClient::new(
            ClientSettings::default()
                .with_api_key("test-key")
                .with_base_url(format!("http://{}/", addr))
                .with_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = client.get_image_by_id("img").await.unwrap_err();
        match pyxis_error(err) {
            PyxisError::Connection(ConnectionFailure::TimedOut { url, timeout }) => {
                assert_eq!(url, format!("http://{}/images/img", addr));
                assert_eq!(timeout, Duration::from_millis(200));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .get_image_by_id("img")
            .await
            .unwrap_err();
        match pyxis_error(err) {
            PyxisError::Connection(ConnectionFailure::Unreachable { url }) => {
                assert_eq!(url, format!("http://{}/images/img", addr));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
