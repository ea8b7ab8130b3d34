//! REST client module for the hosted clinic backend.
//!
//! The backend exposes GoTrue-style authentication endpoints and
//! PostgREST-style table reads. `BackendClient` implements the
//! [`crate::auth::AuthBackend`] contract over both, using the project
//! anon key plus a JWT bearer token once signed in.

pub mod client;
pub mod error;

pub use client::BackendClient;
pub use error::ApiError;
