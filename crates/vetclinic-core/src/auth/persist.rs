use std::path::PathBuf;

use anyhow::{Context, Result};

use super::AuthSession;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Disk persistence for the issued session, backing the one-shot
/// "is anyone already signed in" read at startup.
pub struct SessionFile {
    cache_dir: PathBuf,
}

impl SessionFile {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Load the persisted session, discarding expired ones.
    pub fn load(&self) -> Result<Option<AuthSession>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }

        let contents =
            std::fs::read_to_string(&path).context("Failed to read session file")?;
        let session: AuthSession =
            serde_json::from_str(&contents).context("Failed to parse session file")?;

        if session.is_expired() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Save session to disk
    pub fn save(&self, session: &AuthSession) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Remove any persisted session
    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use chrono::{Duration, Utc};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vetclinic-test-{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn session(expires_in_minutes: i64) -> AuthSession {
        AuthSession {
            access_token: "tok".into(),
            refresh_token: Some("refresh".into()),
            expires_at: Some(Utc::now() + Duration::minutes(expires_in_minutes)),
            user: AuthUser {
                id: "u1".into(),
                email: "jane@vetcare.com".into(),
            },
        }
    }

    #[test]
    fn test_save_load_clear_roundtrip() {
        let file = SessionFile::new(temp_dir("roundtrip"));
        assert!(file.load().unwrap().is_none());

        file.save(&session(60)).unwrap();
        let loaded = file.load().unwrap().expect("session should load");
        assert_eq!(loaded.user.id, "u1");

        file.clear().unwrap();
        assert!(file.load().unwrap().is_none());
        // Clearing twice is fine
        file.clear().unwrap();
    }

    #[test]
    fn test_expired_session_is_discarded() {
        let file = SessionFile::new(temp_dir("expired"));
        file.save(&session(-5)).unwrap();
        assert!(file.load().unwrap().is_none());
    }
}
