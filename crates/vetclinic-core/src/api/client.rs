//! REST client for the hosted clinic backend.
//!
//! This module provides the `BackendClient` struct for talking to the
//! backend's authentication endpoints (`/auth/v1/...`) and row-store reads
//! (`/rest/v1/...`). Every auth action also feeds the broadcast event
//! channel that the session store listens on.

use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::auth::{AuthBackend, AuthEvent, AuthSession, AuthUser, SessionFile};
use crate::config::Config;
use crate::models::{Profile, Role};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Capacity of the auth event channel. Events are rare (explicit user
/// actions and token refreshes), so a small buffer is plenty.
const EVENT_CHANNEL_CAPACITY: usize = 16;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    expires_in: Option<i64>,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: String,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_redirect_to: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: String,
}

impl TokenResponse {
    fn into_session(self) -> AuthSession {
        AuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
            user: AuthUser {
                id: self.user.id,
                email: self.user.email,
            },
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for the hosted clinic backend.
pub struct BackendClient {
    client: Client,
    base_url: String,
    anon_key: String,
    /// Post-confirmation redirect attached to sign-ups, when configured.
    confirm_redirect: Option<String>,
    session_file: SessionFile,
    /// Token used for authenticated requests; replaced on every auth event.
    bearer: Mutex<Option<String>>,
    events: broadcast::Sender<AuthEvent>,
}

impl BackendClient {
    /// Create a new backend client from the resolved configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            client,
            base_url: config.resolved_backend_url()?,
            anon_key: config.resolved_anon_key()?,
            confirm_redirect: config.confirm_redirect_url.clone(),
            session_file: SessionFile::new(config.cache_dir()?),
            bearer: Mutex::new(None),
            events,
        })
    }

    fn set_bearer(&self, token: Option<String>) {
        *self.bearer.lock().unwrap() = token;
    }

    fn headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", header::HeaderValue::from_str(&self.anon_key)?);
        let bearer = self.bearer.lock().unwrap().clone();
        // Unauthenticated requests fall back to the anon key as bearer
        let token = bearer.as_deref().unwrap_or(&self.anon_key);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        Ok(headers)
    }

    fn emit(&self, event: AuthEvent) {
        // No receivers yet is fine; the store subscribes at initialize time
        let _ = self.events.send(event);
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    fn adopt_session(&self, session: &AuthSession) {
        self.set_bearer(Some(session.access_token.clone()));
        if let Err(e) = self.session_file.save(session) {
            warn!(error = %e, "Failed to persist session");
        }
    }

    /// Exchange a refresh token for a fresh session and emit `TokenRefreshed`.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/v1/token?grant_type=refresh_token", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .context("Failed to send refresh request")?;

        let response = Self::check_response(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse refresh response")?;

        let session = token.into_session();
        self.adopt_session(&session);
        self.emit(AuthEvent::TokenRefreshed(session.clone()));
        Ok(session)
    }
}

#[async_trait]
impl AuthBackend for BackendClient {
    async fn current_session(&self) -> Result<Option<AuthSession>> {
        let session = self.session_file.load()?;
        if let Some(ref session) = session {
            self.set_bearer(Some(session.access_token.clone()));
        }
        Ok(session)
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .context("Failed to send sign-in request")?;

        let response = Self::check_response(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse sign-in response")?;

        let session = token.into_session();
        debug!(user_id = %session.user.id, "Signed in");
        self.adopt_session(&session);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<()> {
        let url = format!("{}/auth/v1/signup", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&SignUpRequest {
                email,
                password,
                data: SignUpMetadata { full_name },
                email_redirect_to: self.confirm_redirect.as_deref(),
            })
            .send()
            .await
            .context("Failed to send sign-up request")?;

        Self::check_response(response).await?;
        debug!("Sign-up submitted, confirmation pending");
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);

        let result = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .send()
            .await;

        // The local session is gone either way; the remote call is best
        // effort and the sign-out event is the authoritative transition.
        if let Err(e) = self.session_file.clear() {
            warn!(error = %e, "Failed to clear persisted session");
        }
        self.set_bearer(None);
        self.emit(AuthEvent::SignedOut);

        match result {
            Ok(response) if !response.status().is_success() => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::from_status(status, &body).into())
            }
            Ok(_) => Ok(()),
            Err(e) => Err(anyhow::Error::from(e).context("Failed to send sign-out request")),
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let url = format!(
            "{}/rest/v1/profiles?id=eq.{}&select=id,full_name,phone,avatar_url",
            self.base_url, user_id
        );

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .context("Failed to fetch profile")?;

        let response = Self::check_response(response).await?;
        let mut rows: Vec<Profile> = response
            .json()
            .await
            .context("Failed to parse profile rows")?;

        if rows.len() > 1 {
            warn!(user_id, count = rows.len(), "Expected at most one profile row");
        }
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn fetch_roles(&self, user_id: &str) -> Result<Vec<Role>> {
        let url = format!(
            "{}/rest/v1/user_roles?user_id=eq.{}&select=role",
            self.base_url, user_id
        );

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .context("Failed to fetch user roles")?;

        let response = Self::check_response(response).await?;
        let rows: Vec<RoleRow> = response
            .json()
            .await
            .context("Failed to parse role rows")?;

        let roles = rows
            .iter()
            .filter_map(|row| {
                let parsed = Role::parse(&row.role);
                if parsed.is_none() {
                    warn!(label = %row.role, "Skipping unrecognized role label");
                }
                parsed
            })
            .collect();
        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let json = r#"{
            "access_token": "eyJhbGciOiJIUzI1NiJ9.x.y",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "v2.refresh",
            "user": {
                "id": "7c2f8a1e-9d34-4f6b-8a2c-1e5d0b9f3a77",
                "email": "jane@vetcare.com",
                "role": "authenticated"
            }
        }"#;

        let token: TokenResponse = serde_json::from_str(json).unwrap();
        let session = token.into_session();
        assert_eq!(session.user.email, "jane@vetcare.com");
        assert_eq!(session.refresh_token.as_deref(), Some("v2.refresh"));
        assert!(session.expires_at.is_some());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_parse_profile_rows() {
        let json = r#"[{"id":"7c2f","full_name":"Dr. Jane Doe","phone":"+91 98765 43210","avatar_url":null}]"#;
        let rows: Vec<Profile> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name, "Dr. Jane Doe");
        assert_eq!(rows[0].avatar_url, None);
    }

    #[test]
    fn test_parse_role_rows_skips_unknown() {
        let json = r#"[{"role":"doctor"},{"role":"superuser"},{"role":"admin"}]"#;
        let rows: Vec<RoleRow> = serde_json::from_str(json).unwrap();
        let roles: Vec<Role> = rows.iter().filter_map(|r| Role::parse(&r.role)).collect();
        assert_eq!(roles, vec![Role::Doctor, Role::Admin]);
    }

    #[test]
    fn test_sign_up_request_omits_absent_redirect() {
        let request = SignUpRequest {
            email: "jane@vetcare.com",
            password: "hunter22",
            data: SignUpMetadata { full_name: "Dr. Jane Doe" },
            email_redirect_to: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("email_redirect_to"));
        assert!(json.contains("\"full_name\":\"Dr. Jane Doe\""));
    }
}
