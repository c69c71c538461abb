//! # API Client
//!
//! Thin JSON-over-HTTP layer shared by every repository.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Request Flow                                     │
//! │                                                                         │
//! │  repository.list()                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiClient::get("productos/")                                          │
//! │  ├── join onto base_url                                                │
//! │  ├── Authorization: Bearer <token>   (when configured)                 │
//! │  └── per-request timeout                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  status 2xx?  ──yes──► decode JSON body ──► T                          │
//! │       │                     │                                           │
//! │       no                    └── fails ──► ClientError::Decode           │
//! │       ▼                                                                 │
//! │  ClientError::Rejected { status, message from body }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::repository::{AuthRepository, CustomerRepository, ProductRepository, SaleRepository};

/// Longest raw body echoed into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client bound to one backend.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    timeout_secs: u64,
}

impl ApiClient {
    /// Creates a client from validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let mut base_url = Url::parse(&config.api.base_url)?;
        // Url::join drops the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;

        debug!(base_url = %base_url, timeout_secs = config.api.timeout_secs, "API client ready");

        Ok(ApiClient {
            http,
            base_url,
            token: config.token().map(str::to_string),
            timeout_secs: config.api.timeout_secs,
        })
    }

    /// Returns a copy of this client that authenticates with `token`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // =========================================================================
    // Repositories
    // =========================================================================

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.clone())
    }

    pub fn auth(&self) -> AuthRepository {
        AuthRepository::new(self.clone())
    }

    // =========================================================================
    // JSON Requests
    // =========================================================================

    /// Resolves an endpoint path against the base URL.
    pub fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// `GET path` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path)?;
        debug!(method = "GET", url = %url, "Sending request");
        self.send(self.http.get(url.clone()), &url).await
    }

    /// `POST path` with a JSON body and decode the JSON answer.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(method = "POST", url = %url, "Sending request");
        self.send(self.http.post(url.clone()).json(body), &url).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> ClientResult<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        debug!(status = %status, url = %url, bytes = body.len(), "Backend response");

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!(status = %status, url = %url, message = %message, "Backend rejected request");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        // An empty 2xx body decodes as JSON null
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else {
            err.into()
        }
    }
}

// =============================================================================
// Error Body Parsing
// =============================================================================

/// Extracts a human-readable message from an error response body.
///
/// ## Recognised Shapes
/// ```text
/// {"error": "Credenciales inválidas"}          → Credenciales inválidas
/// {"detail": "Not found."}                     → Not found.
/// {"cliente": ["This field is required."]}     → cliente: This field is required.
/// ["Stock insuficiente"]                       → Stock insuficiente
/// <html>...</html>                             → first 200 chars
/// (empty)                                      → 502 Bad Gateway
/// ```
pub fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();

    let fallback = || {
        status
            .canonical_reason()
            .map(|reason| format!("{} {}", status.as_u16(), reason))
            .unwrap_or_else(|| status.as_u16().to_string())
    };

    if body.is_empty() {
        return fallback();
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => message_from_json(&value).unwrap_or_else(fallback),
        Err(_) => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(message_from_json).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        Value::Object(map) => {
            for key in ["error", "detail", "message"] {
                if let Some(msg) = map.get(key).and_then(message_from_json) {
                    return Some(msg);
                }
            }
            let fields: Vec<String> = map
                .iter()
                .filter_map(|(field, v)| message_from_json(v).map(|msg| format!("{}: {}", field, msg)))
                .collect();
            (!fields.is_empty()).then(|| fields.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_shapes() {
        let bad = StatusCode::BAD_REQUEST;
        assert_eq!(error_message(bad, r#"{"error": "Credenciales inválidas"}"#), "Credenciales inválidas");
        assert_eq!(error_message(StatusCode::NOT_FOUND, r#"{"detail": "Not found."}"#), "Not found.");
        assert_eq!(
            error_message(bad, r#"{"cliente": ["This field is required."]}"#),
            "cliente: This field is required."
        );
        assert_eq!(error_message(bad, r#"["Stock insuficiente"]"#), "Stock insuficiente");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "502 Bad Gateway");
        assert_eq!(error_message(bad, "<html>oops</html>"), "<html>oops</html>");
        assert_eq!(error_message(bad, "{}"), "400 Bad Request");
    }

    #[test]
    fn test_long_html_body_is_truncated() {
        let body = "x".repeat(1000);
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, &body).len(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let mut config = ClientConfig::default();
        config.api.base_url = "http://localhost:8000/api".to_string();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/productos/").unwrap().as_str(), "http://localhost:8000/api/productos/");
        assert_eq!(client.url("ventas/12/").unwrap().as_str(), "http://localhost:8000/api/ventas/12/");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ClientConfig::default();
        config.api.timeout_secs = 0;
        assert!(matches!(ApiClient::new(&config), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_token_from_config() {
        let mut config = ClientConfig::default();
        assert!(!ApiClient::new(&config).unwrap().has_token());
        config.auth.token = Some("abc".to_string());
        assert!(ApiClient::new(&config).unwrap().has_token());
    }
}
