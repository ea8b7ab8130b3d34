use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::models::{Profile, Role};

use super::{AuthEvent, AuthSession};

/// Contract of the hosted identity-and-data collaborator, as consumed here.
///
/// The production implementation is [`crate::api::BackendClient`]; tests
/// inject in-process stubs so session stores can be constructed
/// independently.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// One-shot read of any persisted credential.
    async fn current_session(&self) -> Result<Option<AuthSession>>;

    /// Standing stream of authentication events (sign-in, sign-out, refresh).
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession>;

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<()>;

    async fn sign_out(&self) -> Result<()>;

    /// Fetch the profile row for a user id. At most one row is expected;
    /// absence is valid state, not an error.
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Fetch the role assignments for a user id, in table order.
    async fn fetch_roles(&self, user_id: &str) -> Result<Vec<Role>>;
}
