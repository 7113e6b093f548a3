// Auth backend client
//
// Two endpoints: `POST /login` and `POST /register`. Backend rejections
// come back as `Error::Authentication` with the backend's `msg`/`error`
// text, or a fixed fallback when the body carries none. An `error` field
// rejects even under a 2xx status.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::{AuthErrorBody, LoginResponse, UserProfile};
use crate::transport::{TransportConfig, join_segments};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Async client for the local auth backend.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a client from a base URL (e.g. `http://localhost:5000/api/auth`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Authenticate with email and password.
    ///
    /// Returns the session token and, when the backend includes one, the
    /// user profile.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        let url = join_segments(&self.base_url, &["login"])?;
        debug!("POST {url}");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp = self.http.post(url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            debug!(%status, "login rejected");
            return Err(rejection(&text, LOGIN_FAILED));
        }

        parse_login(&text)
    }

    /// Create an account. The backend replies `{}` on success.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), Error> {
        let url = join_segments(&self.base_url, &["register"])?;
        debug!("POST {url}");

        let body = json!({
            "username": username,
            "email": email,
            "password": password.expose_secret(),
        });

        let resp = self.http.post(url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            debug!(%status, "registration rejected");
            return Err(rejection(&text, REGISTRATION_FAILED));
        }
        if let Some(message) = AuthErrorBody::parse(&text).error() {
            debug!(%status, "registration rejected in body");
            return Err(Error::Authentication { message });
        }

        debug!("registration successful");
        Ok(())
    }
}

fn rejection(body: &str, fallback: &str) -> Error {
    Error::Authentication {
        message: AuthErrorBody::parse(body)
            .message()
            .unwrap_or_else(|| fallback.to_owned()),
    }
}

/// Pull `token` (required) and `user` (optional, tolerated if malformed)
/// out of a login body. Without a token, the body's own message wins over
/// the generic fallback.
fn parse_login(text: &str) -> Result<LoginResponse, Error> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::Deserialization {
        message: format!("login response: {e}"),
        body: text.to_owned(),
    })?;

    let token = value
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| rejection(text, LOGIN_FAILED))?
        .to_owned();

    let user = match value.get("user") {
        Some(raw) if !raw.is_null() => match serde_json::from_value::<UserProfile>(raw.clone()) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "ignoring malformed user profile in login response");
                None
            }
        },
        _ => None,
    };

    Ok(LoginResponse { token, user })
}
