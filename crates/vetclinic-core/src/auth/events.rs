use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity payload issued by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// Credential bundle issued by the authentication service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

impl AuthSession {
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expiry) => Utc::now() > expiry,
            None => false,
        }
    }
}

/// Authentication state changes pushed to subscribers.
///
/// The client emits one of these for every explicit auth action and token
/// refresh; all local session mutation flows through this channel.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(AuthSession),
    TokenRefreshed(AuthSession),
    SignedOut,
}

impl AuthEvent {
    /// The credential payload carried by the event, if any.
    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => Some(session),
            AuthEvent::SignedOut => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: Option<DateTime<Utc>>) -> AuthSession {
        AuthSession {
            access_token: "tok".into(),
            refresh_token: None,
            expires_at,
            user: AuthUser {
                id: "u1".into(),
                email: "jane@vetcare.com".into(),
            },
        }
    }

    #[test]
    fn test_is_expired() {
        assert!(!session(None).is_expired());
        assert!(!session(Some(Utc::now() + Duration::minutes(30))).is_expired());
        assert!(session(Some(Utc::now() - Duration::minutes(1))).is_expired());
    }

    #[test]
    fn test_event_session_payload() {
        let s = session(None);
        assert!(AuthEvent::SignedIn(s.clone()).session().is_some());
        assert!(AuthEvent::TokenRefreshed(s).session().is_some());
        assert!(AuthEvent::SignedOut.session().is_none());
    }
}
