use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatReply, ChatRequest};

const CHAT_PATH: &str = "api/chat";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends a chat request to the backend and returns its reply.
///
/// The session controller only depends on this trait; [`HttpChatClient`] is
/// the production implementation and tests substitute scripted doubles.
#[async_trait::async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `request` and wait for the backend's reply.
    ///
    /// Any transport failure, non-success status or malformed body is an
    /// error.
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply>;
}

/// Connection settings for [`HttpChatClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Where the backend is served, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the Talk2Me chat backend.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: ReqwestClient,
    endpoint: Url,
    timeout: Duration,
}

impl HttpChatClient {
    /// Create a new client from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoint = chat_endpoint(&config.base_url)?;
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .default_headers(default_headers())
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
        })
    }

    /// The fully resolved `POST` target.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Process a non-success response into our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };
        Error::api(status_code, error_detail(&body))
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatReply>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl ChatClient for HttpChatClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.send(&request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            CLIENT_REQUEST_ERRORS.click();
            tracing::debug!(endpoint = %self.endpoint, "chat request failed: {err}");
        }
        result
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Resolve `api/chat` against `base_url`, treating the base as a directory.
fn chat_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url.trim())?;
    if base.cannot_be_a_base() {
        return Err(Error::url(
            format!("base URL cannot carry a path: {base_url}"),
            None,
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(CHAT_PATH)?)
}

/// Pull a human-readable message out of an error body.
///
/// The backend reports failures as `{"detail": ...}`; anything else is
/// returned verbatim.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(detail) => detail.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}
