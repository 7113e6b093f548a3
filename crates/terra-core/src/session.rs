// ── Session and route guard ──
//
// The session is nothing more than a stored token (plus the profile the
// backend returned with it). No validation, expiry or refresh: presence
// of a token means "logged in".

use std::future::Future;
use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use terra_api::auth::{LOGIN_FAILED, REGISTRATION_FAILED};
use terra_api::{AuthClient, LoginResponse, UserProfile};

use crate::error::CoreError;
use crate::route::Route;
use crate::store::{KeyValueStore, TOKEN_KEY, USER_KEY};

/// The two calls the auth backend supports.
pub trait Authenticator: Send + Sync {
    fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<LoginResponse, terra_api::Error>> + Send;

    fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<(), terra_api::Error>> + Send;
}

impl Authenticator for AuthClient {
    async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, terra_api::Error> {
        AuthClient::login(self, email, password).await
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), terra_api::Error> {
        AuthClient::register(self, username, email, password).await
    }
}

/// Persisted session state over an injected store.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token, if any. Blank values count as absent.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// The stored profile. Malformed data is treated as absent.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "ignoring malformed stored user");
                None
            }
        }
    }

    /// Authenticate and persist `token` and `user`.
    ///
    /// Backend rejections carry the backend's message; any other failure
    /// is logged and reported as the generic "Login failed".
    pub async fn login<A: Authenticator>(
        &self,
        auth: &A,
        email: &str,
        password: &SecretString,
    ) -> Result<Option<UserProfile>, CoreError> {
        let response = auth
            .login(email.trim(), password)
            .await
            .map_err(|e| normalize_auth_error(e, LOGIN_FAILED))?;

        // Token last: no token is stored unless the profile write succeeded.
        match &response.user {
            Some(user) => {
                let json = serde_json::to_string(user).map_err(|e| CoreError::Storage {
                    message: e.to_string(),
                })?;
                self.store.set(USER_KEY, &json)?;
            }
            None => self.store.remove(USER_KEY)?,
        }
        self.store.set(TOKEN_KEY, &response.token)?;

        info!(email = email.trim(), "logged in");
        Ok(response.user)
    }

    /// Create an account. Does not log in.
    pub async fn register<A: Authenticator>(
        &self,
        auth: &A,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), CoreError> {
        auth.register(username.trim(), email.trim(), password)
            .await
            .map_err(|e| normalize_auth_error(e, REGISTRATION_FAILED))?;
        info!(username = username.trim(), "account registered");
        Ok(())
    }

    /// Forget the session token. The stored profile is left alone, as
    /// the web client did.
    pub fn logout(&self) -> Result<(), CoreError> {
        self.store.remove(TOKEN_KEY)?;
        info!("logged out");
        Ok(())
    }
}

fn normalize_auth_error(err: terra_api::Error, fallback: &str) -> CoreError {
    match err {
        terra_api::Error::Authentication { message } => CoreError::AuthenticationFailed { message },
        other => {
            warn!(error = %other, "auth backend call failed");
            CoreError::AuthenticationFailed {
                message: fallback.to_owned(),
            }
        }
    }
}

// ── Guard ────────────────────────────────────────────────────────────

/// Outcome of checking a route against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect(Route),
}

impl RouteDecision {
    /// The route that will actually be shown.
    pub fn target(&self) -> &Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

/// Gate for protected views.
pub struct SessionGuard;

impl SessionGuard {
    /// Protected routes render only with a token present; otherwise the
    /// caller is sent to the login view.
    pub fn check(route: Route, session: &SessionStore) -> RouteDecision {
        if route.is_protected() && !session.is_authenticated() {
            debug!(%route, "no session token, redirecting to login");
            RouteDecision::Redirect(Route::Login)
        } else {
            RouteDecision::Render(route)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::store::MemoryStore;

    /// Accepts one fixed credential pair.
    struct StubAuth;

    impl Authenticator for StubAuth {
        async fn login(
            &self,
            email: &str,
            password: &SecretString,
        ) -> Result<LoginResponse, terra_api::Error> {
            if email == "ana@example.com" && password.expose_secret() == "hunter2" {
                Ok(LoginResponse {
                    token: "tok-1".into(),
                    user: Some(UserProfile {
                        username: "ana".into(),
                        email: Some(email.into()),
                        id: None,
                    }),
                })
            } else if email == "down@example.com" {
                Err(terra_api::Error::InvalidBaseUrl("offline".into()))
            } else {
                Err(terra_api::Error::Authentication {
                    message: "Invalid credentials".into(),
                })
            }
        }

        async fn register(
            &self,
            _username: &str,
            _email: &str,
            _password: &SecretString,
        ) -> Result<(), terra_api::Error> {
            Err(terra_api::Error::Tls("handshake".into()))
        }
    }

    fn session() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStore::new()))
    }

    fn pw(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn guard_redirects_without_token() {
        let session = session();
        assert_eq!(
            SessionGuard::check(Route::Home, &session),
            RouteDecision::Redirect(Route::Login)
        );
        assert_eq!(
            SessionGuard::check(Route::Signup, &session),
            RouteDecision::Render(Route::Signup)
        );
    }

    #[tokio::test]
    async fn login_persists_token_and_user() {
        let session = session();
        let user = session
            .login(&StubAuth, "ana@example.com", &pw("hunter2"))
            .await
            .unwrap();

        assert_eq!(user.unwrap().username, "ana");
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert_eq!(session.user().unwrap().username, "ana");
        assert_eq!(
            SessionGuard::check(Route::Favorites, &session),
            RouteDecision::Render(Route::Favorites)
        );
    }

    /// Refuses to write the user profile.
    #[derive(Default)]
    struct ProfileWriteFails(MemoryStore);

    impl KeyValueStore for ProfileWriteFails {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
            if key == USER_KEY {
                return Err(CoreError::Storage {
                    message: "disk full".into(),
                });
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), CoreError> {
            self.0.remove(key)
        }
    }

    #[tokio::test]
    async fn failed_profile_write_leaves_session_logged_out() {
        let session = SessionStore::new(Arc::new(ProfileWriteFails::default()));
        let err = session
            .login(&StubAuth, "ana@example.com", &pw("hunter2"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Storage { .. }));
        assert!(!session.is_authenticated());
        assert_eq!(
            SessionGuard::check(Route::Home, &session),
            RouteDecision::Redirect(Route::Login)
        );
    }

    #[tokio::test]
    async fn login_rejection_keeps_backend_message() {
        let session = session();
        let err = session
            .login(&StubAuth, "ana@example.com", &pw("wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn other_failures_use_fallback_messages() {
        let session = session();
        let err = session
            .login(&StubAuth, "down@example.com", &pw("x"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Login failed");

        let err = session
            .register(&StubAuth, "ana", "ana@example.com", &pw("x"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Registration failed");
    }

    #[tokio::test]
    async fn logout_removes_token() {
        let session = session();
        session
            .login(&StubAuth, "ana@example.com", &pw("hunter2"))
            .await
            .unwrap();
        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(
            SessionGuard::check(Route::Country("FRA".into()), &session),
            RouteDecision::Redirect(Route::Login)
        );
    }
}
