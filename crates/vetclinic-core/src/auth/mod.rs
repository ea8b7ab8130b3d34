//! Authentication module: session state, route gating, credentials.
//!
//! This module provides:
//! - `SessionStore`: reactive single source of truth for identity,
//!   profile and roles, fed by the backend's auth event stream
//! - `protected_route` / `public_route`: admission decisions for views
//! - `AuthBackend`: the injected collaborator contract
//! - `SessionFile`: disk persistence of the issued session
//! - `CredentialStore`: OS-level password storage via keyring

pub mod backend;
pub mod credentials;
pub mod events;
pub mod gate;
pub mod persist;
pub mod store;

pub use backend::AuthBackend;
pub use credentials::CredentialStore;
pub use events::{AuthEvent, AuthSession, AuthUser};
pub use gate::{protected_route, public_route, Admission, PublicAdmission};
pub use persist::SessionFile;
pub use store::{LoadPhase, SessionSnapshot, SessionStore};
