//! Session state management.
//!
//! `SessionStore` is the single source of truth for "who is signed in, what
//! is their profile, what are their roles". It listens on the backend's
//! auth event stream, performs the dependent profile/role lookups, and
//! republishes the combined state through a watch channel that the view
//! layer reads every frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::{Profile, Role};

use super::{AuthBackend, AuthEvent, AuthSession, AuthUser};

/// Whether the initial identity determination has completed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Initializing,
    Settled,
}

/// Read-only view of the current session state.
///
/// `profile` and `roles` resolve asynchronously after the identity does;
/// their absence while signed in means "not yet known", never an error.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
    pub profile: Option<Profile>,
    pub roles: Vec<Role>,
    pub phase: LoadPhase,
}

impl SessionSnapshot {
    pub fn initial() -> Self {
        Self {
            user: None,
            session: None,
            profile: None,
            roles: Vec::new(),
            phase: LoadPhase::Initializing,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn primary_role(&self) -> Role {
        Role::primary(&self.roles)
    }

    /// Name for the title bar: profile full name, falling back to the email.
    pub fn display_name(&self) -> &str {
        if let Some(ref profile) = self.profile {
            &profile.full_name
        } else if let Some(ref user) = self.user {
            &user.email
        } else {
            ""
        }
    }
}

struct StoreInner {
    backend: Arc<dyn AuthBackend>,
    tx: watch::Sender<SessionSnapshot>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    initialized: AtomicBool,
}

/// Reactive session state container. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        let (tx, _) = watch::channel(SessionSnapshot::initial());
        Self {
            inner: Arc::new(StoreInner {
                backend,
                tx,
                tasks: Mutex::new(Vec::new()),
                initialized: AtomicBool::new(false),
            }),
        }
    }

    /// Start the standing event subscription and the one-shot read of any
    /// persisted credential. May be called once per store; the subscription
    /// lives until [`SessionStore::teardown`].
    pub fn initialize(&self) -> Result<()> {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            anyhow::bail!("Session store is already initialized");
        }

        // Subscribe before the bootstrap read so no event can slip between
        let events = self.inner.backend.subscribe();
        let listener = tokio::spawn(Self::listen(Arc::clone(&self.inner), events));
        let bootstrap = tokio::spawn(Self::bootstrap(Arc::clone(&self.inner)));

        self.inner
            .tasks
            .lock()
            .unwrap()
            .extend([listener, bootstrap]);
        Ok(())
    }

    /// Latest session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.tx.borrow().clone()
    }

    /// Watch the session state for changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Ask the backend to end the session. Failures are logged, not
    /// surfaced: local state only transitions when the sign-out event
    /// arrives on the subscription, keeping the event channel authoritative.
    pub async fn sign_out(&self) {
        if let Err(e) = self.inner.backend.sign_out().await {
            warn!(error = %e, "Sign-out request failed");
        }
    }

    /// Release the event subscription. Idempotent; in-flight lookups for a
    /// live identity still land, superseded ones are discarded either way.
    pub fn teardown(&self) {
        let mut tasks = self.inner.tasks.lock().unwrap();
        for handle in tasks.drain(..) {
            handle.abort();
        }
    }

    async fn bootstrap(inner: Arc<StoreInner>) {
        let session = match inner.backend.current_session().await {
            Ok(session) => session,
            Err(e) => {
                // Identity-determination failure reads as signed out
                debug!(error = %e, "Persisted credential read failed");
                None
            }
        };
        Self::apply_session(&inner, session);
    }

    async fn listen(inner: Arc<StoreInner>, mut events: broadcast::Receiver<AuthEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    debug!(signed_in = event.session().is_some(), "Auth event received");
                    Self::apply_session(&inner, event.session().cloned());
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Auth event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    /// Replace the authoritative identity/credentials and settle the phase.
    /// Dependent state is cleared whenever the identity is absent or has
    /// changed, then refetched for the new identity.
    fn apply_session(inner: &Arc<StoreInner>, session: Option<AuthSession>) {
        let lookup_id = session.as_ref().map(|s| s.user.id.clone());

        inner.tx.send_modify(|snap| {
            let new_id = session.as_ref().map(|s| s.user.id.as_str());
            if snap.user_id() != new_id {
                snap.profile = None;
                snap.roles = Vec::new();
            }
            snap.user = session.as_ref().map(|s| s.user.clone());
            snap.session = session;
            snap.phase = LoadPhase::Settled;
        });

        if let Some(user_id) = lookup_id {
            tokio::spawn(Self::run_lookups(Arc::clone(inner), user_id));
        }
    }

    /// Fetch profile and roles for the identity in effect when this lookup
    /// was issued. Results are discarded if the authoritative identity has
    /// changed by the time they arrive.
    async fn run_lookups(inner: Arc<StoreInner>, issued_for: String) {
        let (profile, roles) = tokio::join!(
            inner.backend.fetch_profile(&issued_for),
            inner.backend.fetch_roles(&issued_for),
        );

        // A missing profile or role set is valid state for a freshly
        // provisioned account, so lookup failures are absorbed here.
        let profile = profile.unwrap_or_else(|e| {
            debug!(user_id = %issued_for, error = %e, "Profile lookup failed");
            None
        });
        let roles = roles.unwrap_or_else(|e| {
            debug!(user_id = %issued_for, error = %e, "Role lookup failed");
            Vec::new()
        });

        inner.tx.send_modify(|snap| {
            if snap.user_id() == Some(issued_for.as_str()) {
                snap.profile = profile;
                snap.roles = roles;
            } else {
                debug!(user_id = %issued_for, "Discarding lookup results for superseded identity");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    struct StubBackend {
        persisted: Option<AuthSession>,
        events: broadcast::Sender<AuthEvent>,
        profiles: HashMap<String, Profile>,
        roles: HashMap<String, Vec<Role>>,
        /// When set, lookups block until the test releases permits
        lookup_gate: Option<Arc<Semaphore>>,
        sign_out_fails: bool,
    }

    impl StubBackend {
        fn new() -> Self {
            let (events, _) = broadcast::channel(16);
            Self {
                persisted: None,
                events,
                profiles: HashMap::new(),
                roles: HashMap::new(),
                lookup_gate: None,
                sign_out_fails: false,
            }
        }

        fn with_user(mut self, id: &str, full_name: &str, roles: Vec<Role>) -> Self {
            self.profiles.insert(
                id.to_string(),
                Profile {
                    id: id.to_string(),
                    full_name: full_name.to_string(),
                    phone: None,
                    avatar_url: None,
                },
            );
            self.roles.insert(id.to_string(), roles);
            self
        }

        fn with_persisted(mut self, id: &str) -> Self {
            self.persisted = Some(session_for(id));
            self
        }

        async fn pass_gate(&self) {
            if let Some(ref gate) = self.lookup_gate {
                gate.acquire().await.unwrap().forget();
            }
        }
    }

    fn session_for(id: &str) -> AuthSession {
        AuthSession {
            access_token: format!("token-{}", id),
            refresh_token: None,
            expires_at: None,
            user: AuthUser {
                id: id.to_string(),
                email: format!("{}@vetcare.com", id),
            },
        }
    }

    #[async_trait]
    impl AuthBackend for StubBackend {
        async fn current_session(&self) -> Result<Option<AuthSession>> {
            Ok(self.persisted.clone())
        }

        fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
            self.events.subscribe()
        }

        async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<AuthSession> {
            let session = session_for(email);
            let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
            Ok(session)
        }

        async fn sign_up(&self, _email: &str, _password: &str, _full_name: &str) -> Result<()> {
            Ok(())
        }

        async fn sign_out(&self) -> Result<()> {
            if self.sign_out_fails {
                anyhow::bail!("logout endpoint unreachable");
            }
            let _ = self.events.send(AuthEvent::SignedOut);
            Ok(())
        }

        async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>> {
            self.pass_gate().await;
            Ok(self.profiles.get(user_id).cloned())
        }

        async fn fetch_roles(&self, user_id: &str) -> Result<Vec<Role>> {
            self.pass_gate().await;
            Ok(self.roles.get(user_id).cloned().unwrap_or_default())
        }
    }

    async fn wait_until<F>(store: &SessionStore, pred: F) -> SessionSnapshot
    where
        F: Fn(&SessionSnapshot) -> bool,
    {
        let mut rx = store.subscribe();
        let snapshot = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| pred(s)))
            .await
            .expect("condition not reached in time")
            .expect("watch channel closed")
            .clone();
        snapshot
    }

    #[tokio::test]
    async fn test_no_persisted_credential_settles_signed_out() {
        let store = SessionStore::new(Arc::new(StubBackend::new()));
        assert_eq!(store.snapshot().phase, LoadPhase::Initializing);

        store.initialize().unwrap();
        let snap = wait_until(&store, |s| s.phase == LoadPhase::Settled).await;
        assert!(!snap.is_signed_in());
        assert!(snap.profile.is_none());
        assert!(snap.roles.is_empty());
    }

    #[tokio::test]
    async fn test_persisted_session_resolves_profile_and_roles() {
        let backend = StubBackend::new()
            .with_user("u1", "Dr. Jane Doe", vec![Role::Doctor])
            .with_persisted("u1");
        let store = SessionStore::new(Arc::new(backend));
        store.initialize().unwrap();

        let snap = wait_until(&store, |s| s.profile.is_some()).await;
        assert_eq!(snap.phase, LoadPhase::Settled);
        assert_eq!(snap.user_id(), Some("u1"));
        assert_eq!(snap.profile.as_ref().unwrap().full_name, "Dr. Jane Doe");
        assert_eq!(snap.primary_role(), Role::Doctor);
    }

    #[tokio::test]
    async fn test_sign_in_event_without_provisioned_rows() {
        let backend = Arc::new(StubBackend::new());
        let events = backend.events.clone();
        let store = SessionStore::new(backend);
        store.initialize().unwrap();
        wait_until(&store, |s| s.phase == LoadPhase::Settled).await;

        events.send(AuthEvent::SignedIn(session_for("u2"))).unwrap();

        let snap = wait_until(&store, |s| s.user_id() == Some("u2")).await;
        // A brand-new account may not have profile/role rows yet; that is
        // valid signed-in state
        assert!(snap.is_signed_in());
        assert!(snap.profile.is_none());
        assert!(snap.roles.is_empty());
        assert_eq!(snap.primary_role(), Role::DEFAULT);
    }

    #[tokio::test]
    async fn test_sign_out_clears_profile_and_roles() {
        let backend = StubBackend::new()
            .with_user("u1", "Dr. Jane Doe", vec![Role::Doctor, Role::Admin])
            .with_persisted("u1");
        let backend = Arc::new(backend);
        let events = backend.events.clone();
        let store = SessionStore::new(backend);
        store.initialize().unwrap();
        wait_until(&store, |s| s.profile.is_some()).await;

        events.send(AuthEvent::SignedOut).unwrap();

        let snap = wait_until(&store, |s| !s.is_signed_in()).await;
        assert_eq!(snap.phase, LoadPhase::Settled);
        assert!(snap.profile.is_none());
        assert!(snap.roles.is_empty());
        assert!(snap.session.is_none());
    }

    #[tokio::test]
    async fn test_superseded_lookup_results_are_discarded() {
        let mut backend = StubBackend::new().with_user("u1", "Dr. Jane Doe", vec![Role::Doctor]);
        let gate = Arc::new(Semaphore::new(0));
        backend.lookup_gate = Some(Arc::clone(&gate));
        let backend = Arc::new(backend);
        let events = backend.events.clone();

        let store = SessionStore::new(backend);
        store.initialize().unwrap();
        wait_until(&store, |s| s.phase == LoadPhase::Settled).await;

        // Sign in as u1; its lookups are now parked on the gate
        events.send(AuthEvent::SignedIn(session_for("u1"))).unwrap();
        wait_until(&store, |s| s.user_id() == Some("u1")).await;

        // Identity changes before the u1 lookups complete
        events.send(AuthEvent::SignedOut).unwrap();
        wait_until(&store, |s| !s.is_signed_in()).await;

        // Release the parked lookups; their results must not resurface
        gate.add_permits(2);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snap = store.snapshot();
        assert!(!snap.is_signed_in());
        assert!(snap.profile.is_none());
        assert!(snap.roles.is_empty());
    }

    #[tokio::test]
    async fn test_token_refresh_keeps_identity() {
        let backend = Arc::new(
            StubBackend::new()
                .with_user("u1", "Dr. Jane Doe", vec![Role::Doctor])
                .with_persisted("u1"),
        );
        let events = backend.events.clone();
        let store = SessionStore::new(backend);
        store.initialize().unwrap();
        wait_until(&store, |s| s.profile.is_some()).await;

        let mut refreshed = session_for("u1");
        refreshed.access_token = "token-u1-rotated".into();
        events.send(AuthEvent::TokenRefreshed(refreshed)).unwrap();

        let snap = wait_until(&store, |s| {
            s.session.as_ref().map(|c| c.access_token.as_str()) == Some("token-u1-rotated")
        })
        .await;
        assert_eq!(snap.user_id(), Some("u1"));
    }

    #[tokio::test]
    async fn test_initialize_twice_is_an_error() {
        let store = SessionStore::new(Arc::new(StubBackend::new()));
        store.initialize().unwrap();
        assert!(store.initialize().is_err());
    }

    #[tokio::test]
    async fn test_teardown_is_idempotent_and_stops_listening() {
        let backend = Arc::new(StubBackend::new());
        let events = backend.events.clone();
        let store = SessionStore::new(backend);
        store.initialize().unwrap();
        wait_until(&store, |s| s.phase == LoadPhase::Settled).await;

        store.teardown();
        store.teardown();

        // Events after teardown no longer reach the store
        let _ = events.send(AuthEvent::SignedIn(session_for("u3")));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!store.snapshot().is_signed_in());
    }

    #[tokio::test]
    async fn test_sign_out_failure_is_absorbed() {
        let mut backend = StubBackend::new().with_user("u1", "Dr. Jane Doe", vec![Role::Doctor]);
        backend.persisted = Some(session_for("u1"));
        backend.sign_out_fails = true;
        let store = SessionStore::new(Arc::new(backend));
        store.initialize().unwrap();
        wait_until(&store, |s| s.profile.is_some()).await;

        // No error propagates, and without the event the state is unchanged
        store.sign_out().await;
        assert!(store.snapshot().is_signed_in());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut snap = SessionSnapshot::initial();
        assert_eq!(snap.display_name(), "");

        snap.user = Some(AuthUser {
            id: "u1".into(),
            email: "jane@vetcare.com".into(),
        });
        assert_eq!(snap.display_name(), "jane@vetcare.com");

        snap.profile = Some(Profile {
            id: "u1".into(),
            full_name: "Dr. Jane Doe".into(),
            phone: None,
            avatar_url: None,
        });
        assert_eq!(snap.display_name(), "Dr. Jane Doe");
    }
}
