//! # Auth Repository
//!
//! Login and registration against `/login/` and `/register/`.
//!
//! ```text
//! ventas login ──► validate email/password ──► POST /login/ ──► { access }
//!                                                                  │
//!                         printed for VENTAS_API_TOKEN ◄───────────┘
//! ```
//!
//! Tokens are never written to disk by this crate.

use serde::{Deserialize, Serialize};
use tracing::info;
use ventas_core::validation::{validate_email, validate_password, validate_password_confirmation};

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Token pair returned by `POST /login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Bearer token for subsequent requests.
    pub access: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The backend keys accounts by username; the email doubles as one.
#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Repository for authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthRepository {
    client: ApiClient,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        AuthRepository { client }
    }

    /// Exchanges credentials for an access token.
    ///
    /// ## Errors
    /// - `Validation` when email or password is missing, before any request
    /// - `Rejected` with the backend's `error` message on bad credentials
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AccessToken> {
        let email = email.trim();
        validate_email(email)?;
        validate_password(password)?;

        let token: AccessToken = self
            .client
            .post("login/", &LoginRequest { email, password })
            .await?;

        info!(email = %email, "Logged in");
        Ok(token)
    }

    /// Creates an account.
    pub async fn register(&self, email: &str, password: &str, confirmation: &str) -> ClientResult<()> {
        let email = email.trim();
        validate_email(email)?;
        validate_password_confirmation(password, confirmation)?;

        let _: serde_json::Value = self
            .client
            .post(
                "register/",
                &RegisterRequest {
                    username: email,
                    email,
                    password,
                },
            )
            .await?;

        info!(email = %email, "Account registered");
        Ok(())
    }
}
