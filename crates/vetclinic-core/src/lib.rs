//! Core library for the vetclinic dashboard.
//!
//! Provides the session store and route gating that every screen depends
//! on, the REST client for the hosted clinic backend, the domain models and
//! repositories the tabs render, and form validation.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod repo;
pub mod reports;
pub mod utils;
pub mod validation;

pub use api::{ApiError, BackendClient};
pub use auth::{
    protected_route, public_route, Admission, AuthBackend, AuthEvent, AuthSession, AuthUser,
    LoadPhase, PublicAdmission, SessionSnapshot, SessionStore,
};
pub use config::Config;
pub use repo::{Clinic, InMemoryRepository, Repository};
