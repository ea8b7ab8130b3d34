//! Application state management for the vetclinic TUI.
//!
//! The `App` struct owns the session store handle, the clinic repositories,
//! and all UI state (tabs, focus, search, selections, form fields). Screens
//! are chosen each frame from the route-gate decision over the current
//! session snapshot; `App` itself never mutates session state directly.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use vetclinic_core::auth::CredentialStore;
use vetclinic_core::models::{
    Appointment, InventoryItem, Invoice, MedicalInfo, Message, Owner, Patient, PatientStatus,
    Species, StaffMember,
};
use vetclinic_core::utils::contains_ignore_case;
use vetclinic_core::validation::{
    self, validate_patient_form, FieldError, PatientForm,
};
use vetclinic_core::{
    ApiError, AuthBackend, BackendClient, Clinic, Config, Repository, SessionSnapshot,
    SessionStore,
};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for email input fields.
const MAX_EMAIL_LENGTH: usize = 64;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for the full-name input.
const MAX_NAME_LENGTH: usize = 60;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Patients,
    Appointments,
    Billing,
    Inventory,
    Staff,
    Reports,
    Messages,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Patients => "Patients",
            Tab::Appointments => "Appointments",
            Tab::Billing => "Billing",
            Tab::Inventory => "Inventory",
            Tab::Staff => "Staff",
            Tab::Reports => "Reports",
            Tab::Messages => "Messages",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Dashboard => Tab::Patients,
            Tab::Patients => Tab::Appointments,
            Tab::Appointments => Tab::Billing,
            Tab::Billing => Tab::Inventory,
            Tab::Inventory => Tab::Staff,
            Tab::Staff => Tab::Reports,
            Tab::Reports => Tab::Messages,
            Tab::Messages => Tab::Dashboard,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Dashboard => Tab::Messages,
            Tab::Patients => Tab::Dashboard,
            Tab::Appointments => Tab::Patients,
            Tab::Billing => Tab::Appointments,
            Tab::Inventory => Tab::Billing,
            Tab::Staff => Tab::Inventory,
            Tab::Reports => Tab::Staff,
            Tab::Messages => Tab::Reports,
        }
    }
}

/// Current UI focus area (list panel or detail panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    AddingPatient,
    ConfirmingQuit,
    Quitting,
}

/// Which auth form is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Auth form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    FullName,
    Email,
    Password,
    Button,
}

/// New-patient overlay form fields, in tab order.
pub const PATIENT_FORM_FIELDS: [&str; 7] =
    ["Name", "Species", "Breed", "Age", "Owner", "Phone", "Email"];

/// State of the new-patient overlay.
#[derive(Debug, Clone, Default)]
pub struct PatientFormState {
    pub form: PatientForm,
    /// Index into PATIENT_FORM_FIELDS; one past the end is the save button.
    pub focus: usize,
    pub errors: Vec<FieldError>,
}

impl PatientFormState {
    pub fn on_button(&self) -> bool {
        self.focus == PATIENT_FORM_FIELDS.len()
    }

    pub fn field_value_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.form.name),
            1 => Some(&mut self.form.species),
            2 => Some(&mut self.form.breed),
            3 => Some(&mut self.form.age),
            4 => Some(&mut self.form.owner_name),
            5 => Some(&mut self.form.phone),
            6 => Some(&mut self.form.email),
            _ => None,
        }
    }

    pub fn field_value(&self, index: usize) -> &str {
        match index {
            0 => &self.form.name,
            1 => &self.form.species,
            2 => &self.form.breed,
            3 => &self.form.age,
            4 => &self.form.owner_name,
            5 => &self.form.phone,
            6 => &self.form.email,
            _ => "",
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub store: SessionStore,
    backend: Arc<BackendClient>,
    pub clinic: Clinic,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub focus: Focus,
    pub search_query: String,

    // Auth screen state
    pub auth_mode: AuthMode,
    pub auth_focus: AuthFocus,
    pub auth_email: String,
    pub auth_password: String,
    pub auth_full_name: String,
    pub auth_error: Option<String>,
    pub auth_notice: Option<String>,

    // Selection indices
    pub patient_selection: usize,
    pub appointment_selection: usize,
    pub invoice_selection: usize,
    pub inventory_selection: usize,
    pub staff_selection: usize,
    pub message_selection: usize,

    // New-patient overlay
    pub patient_form: PatientFormState,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance and start the session bootstrap.
    pub fn new(config: Config) -> Result<Self> {
        let backend = Arc::new(BackendClient::new(&config)?);
        let store = SessionStore::new(Arc::clone(&backend) as Arc<dyn AuthBackend>);
        store.initialize()?;

        let auth_email = std::env::var("VETCLINIC_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();

        // Prefill the remembered password for a quick re-login
        let auth_password = if !auth_email.is_empty() && CredentialStore::has_credentials(&auth_email)
        {
            CredentialStore::get_password(&auth_email).unwrap_or_default()
        } else {
            String::new()
        };

        let auth_focus = if auth_email.is_empty() {
            AuthFocus::Email
        } else if auth_password.is_empty() {
            AuthFocus::Password
        } else {
            AuthFocus::Button
        };

        Ok(Self {
            config,
            store,
            backend,
            clinic: Clinic::demo(),

            state: AppState::Normal,
            current_tab: Tab::Dashboard,
            focus: Focus::List,
            search_query: String::new(),

            auth_mode: AuthMode::SignIn,
            auth_focus,
            auth_email,
            auth_password,
            auth_full_name: String::new(),
            auth_error: None,
            auth_notice: None,

            patient_selection: 0,
            appointment_selection: 0,
            invoice_selection: 0,
            inventory_selection: 0,
            staff_selection: 0,
            message_selection: 0,

            patient_form: PatientFormState::default(),

            status_message: None,
        })
    }

    /// Latest session snapshot, read every frame.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    // =========================================================================
    // Authentication actions
    // =========================================================================

    /// Submit the sign-in form.
    pub async fn attempt_sign_in(&mut self) {
        let email = self.auth_email.trim().to_string();
        let password = self.auth_password.clone();

        if let Err(message) = validation::validate_sign_in(&email, &password) {
            self.auth_error = Some(message);
            return;
        }
        self.auth_error = None;
        self.auth_notice = None;

        match self.backend.sign_in_with_password(&email, &password).await {
            Ok(_) => {
                if let Err(e) = CredentialStore::store(&email, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }
                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.auth_password.clear();
                info!("Sign-in successful");
            }
            Err(e) => {
                self.auth_error = Some(Self::friendly_auth_error(&e));
            }
        }
    }

    /// Submit the sign-up form. On success the account still needs e-mail
    /// confirmation, so no session state changes here.
    pub async fn attempt_sign_up(&mut self) {
        let email = self.auth_email.trim().to_string();
        let full_name = self.auth_full_name.trim().to_string();

        if let Err(message) =
            validation::validate_sign_up(&email, &self.auth_password, &full_name)
        {
            self.auth_error = Some(message);
            return;
        }
        self.auth_error = None;

        match self
            .backend
            .sign_up(&email, &self.auth_password, &full_name)
            .await
        {
            Ok(()) => {
                self.auth_notice =
                    Some("Account created - check your email to confirm".to_string());
                self.auth_mode = AuthMode::SignIn;
            }
            Err(e) => {
                self.auth_error = Some(Self::friendly_auth_error(&e));
            }
        }
    }

    /// Sign out via the session store; the screen flips when the event lands.
    pub async fn sign_out(&mut self) {
        self.store.sign_out().await;
        self.status_message = Some("Signed out".to_string());
    }

    /// Map backend failures onto messages fit for the auth form.
    fn friendly_auth_error(error: &anyhow::Error) -> String {
        match error.downcast_ref::<ApiError>() {
            Some(ApiError::Unauthorized) => "Invalid email or password".to_string(),
            Some(ApiError::RateLimited) => {
                "Too many attempts. Please wait a moment and try again.".to_string()
            }
            Some(ApiError::ServerError(_)) => {
                "The server had a problem. Please try again.".to_string()
            }
            _ => {
                // Inspect the full cause chain for transport problems
                let chain = format!("{:#}", error).to_lowercase();
                if chain.contains("connect") || chain.contains("network") {
                    "Unable to connect to server. Check your internet connection.".to_string()
                } else if chain.contains("timed out") || chain.contains("timeout") {
                    "Connection timed out. Please try again.".to_string()
                } else {
                    format!("Request failed: {}", error)
                }
            }
        }
    }

    pub fn toggle_auth_mode(&mut self) {
        self.auth_mode = match self.auth_mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.auth_error = None;
        self.auth_focus = match self.auth_mode {
            AuthMode::SignUp => AuthFocus::FullName,
            AuthMode::SignIn => AuthFocus::Email,
        };
    }

    pub fn can_add_email_char(&self) -> bool {
        self.auth_email.len() < MAX_EMAIL_LENGTH
    }

    pub fn can_add_password_char(&self) -> bool {
        self.auth_password.len() < MAX_PASSWORD_LENGTH
    }

    pub fn can_add_name_char(&self) -> bool {
        self.auth_full_name.len() < MAX_NAME_LENGTH
    }

    // =========================================================================
    // Search & filtered accessors
    // =========================================================================

    fn matches(&self, fields: &[&str]) -> bool {
        self.search_query.is_empty()
            || fields
                .iter()
                .any(|f| contains_ignore_case(f, &self.search_query))
    }

    pub fn filtered_patients(&self) -> Vec<Patient> {
        self.clinic
            .patients
            .list()
            .into_iter()
            .filter(|p| {
                self.matches(&[
                    &p.name,
                    &p.owner.name,
                    &p.species.to_string(),
                    p.breed.as_deref().unwrap_or(""),
                ])
            })
            .collect()
    }

    pub fn filtered_appointments(&self) -> Vec<Appointment> {
        self.clinic
            .appointments
            .list()
            .into_iter()
            .filter(|a| self.matches(&[&a.patient_name, &a.owner_name, &a.doctor]))
            .collect()
    }

    pub fn filtered_invoices(&self) -> Vec<Invoice> {
        self.clinic
            .invoices
            .list()
            .into_iter()
            .filter(|i| self.matches(&[&i.number, &i.patient_name, &i.owner_name]))
            .collect()
    }

    pub fn filtered_inventory(&self) -> Vec<InventoryItem> {
        self.clinic
            .inventory
            .list()
            .into_iter()
            .filter(|i| {
                self.matches(&[
                    &i.name,
                    &i.category.to_string(),
                    i.supplier.as_deref().unwrap_or(""),
                ])
            })
            .collect()
    }

    pub fn filtered_staff(&self) -> Vec<StaffMember> {
        self.clinic
            .staff
            .list()
            .into_iter()
            .filter(|s| self.matches(&[&s.name, s.role.title(), &s.email]))
            .collect()
    }

    pub fn filtered_messages(&self) -> Vec<Message> {
        self.clinic
            .messages
            .list()
            .into_iter()
            .filter(|m| self.matches(&[&m.recipient, &m.subject]))
            .collect()
    }

    // =========================================================================
    // Selection handling
    // =========================================================================

    fn list_len(&self) -> usize {
        match self.current_tab {
            Tab::Dashboard | Tab::Reports => 0,
            Tab::Patients => self.filtered_patients().len(),
            Tab::Appointments => self.filtered_appointments().len(),
            Tab::Billing => self.filtered_invoices().len(),
            Tab::Inventory => self.filtered_inventory().len(),
            Tab::Staff => self.filtered_staff().len(),
            Tab::Messages => self.filtered_messages().len(),
        }
    }

    pub fn selection_mut(&mut self) -> Option<&mut usize> {
        match self.current_tab {
            Tab::Dashboard | Tab::Reports => None,
            Tab::Patients => Some(&mut self.patient_selection),
            Tab::Appointments => Some(&mut self.appointment_selection),
            Tab::Billing => Some(&mut self.invoice_selection),
            Tab::Inventory => Some(&mut self.inventory_selection),
            Tab::Staff => Some(&mut self.staff_selection),
            Tab::Messages => Some(&mut self.message_selection),
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        if let Some(selection) = self.selection_mut() {
            let current = *selection as isize;
            let next = (current + delta).clamp(0, len as isize - 1);
            *selection = next as usize;
        }
    }

    /// Keep selections in range after a filter change.
    pub fn clamp_selections(&mut self) {
        let len = self.list_len();
        if let Some(selection) = self.selection_mut() {
            if len == 0 {
                *selection = 0;
            } else if *selection >= len {
                *selection = len - 1;
            }
        }
    }

    // =========================================================================
    // New-patient form
    // =========================================================================

    pub fn open_patient_form(&mut self) {
        self.patient_form = PatientFormState::default();
        self.state = AppState::AddingPatient;
    }

    /// Validate the overlay form and create the patient record.
    /// Returns true when the record was created and the overlay closed.
    pub fn submit_patient_form(&mut self) -> bool {
        let errors = validate_patient_form(&self.patient_form.form);
        if !errors.is_empty() {
            self.patient_form.errors = errors;
            return false;
        }

        let form = &self.patient_form.form;
        let patient = Patient {
            id: 0,
            name: form.name.trim().to_string(),
            species: Species::parse(form.species.trim()),
            breed: non_empty(&form.breed),
            age_years: form.age.trim().parse().ok(),
            gender: non_empty(&form.gender),
            weight_kg: form.weight.trim().parse().ok(),
            owner: Owner {
                name: form.owner_name.trim().to_string(),
                phone: form.phone.trim().to_string(),
                email: non_empty(&form.email),
                address: non_empty(&form.address),
            },
            status: PatientStatus::Healthy,
            last_visit: None,
            next_vaccination: None,
            microchip: non_empty(&form.microchip),
            medical: MedicalInfo {
                allergies: non_empty(&form.allergies),
                medications: non_empty(&form.medications),
                conditions: non_empty(&form.conditions),
                notes: non_empty(&form.notes),
            },
            visits: Vec::new(),
        };

        let name = patient.name.clone();
        self.clinic.patients.create(patient);
        self.state = AppState::Normal;
        self.status_message = Some(format!("Added patient {}", name));
        true
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// App wired to repositories only; auth fields are exercised directly.
    fn bare_app() -> App {
        App {
            config: Config::default(),
            store: SessionStore::new(Arc::new(NullBackend::new())),
            backend: Arc::new(
                BackendClient::new(&test_config()).expect("client from test config"),
            ),
            clinic: Clinic::demo(),
            state: AppState::Normal,
            current_tab: Tab::Patients,
            focus: Focus::List,
            search_query: String::new(),
            auth_mode: AuthMode::SignIn,
            auth_focus: AuthFocus::Email,
            auth_email: String::new(),
            auth_password: String::new(),
            auth_full_name: String::new(),
            auth_error: None,
            auth_notice: None,
            patient_selection: 0,
            appointment_selection: 0,
            invoice_selection: 0,
            inventory_selection: 0,
            staff_selection: 0,
            message_selection: 0,
            patient_form: PatientFormState::default(),
            status_message: None,
        }
    }

    fn test_config() -> Config {
        Config {
            backend_url: Some("http://localhost:54321".into()),
            anon_key: Some("test-anon-key".into()),
            last_email: None,
            confirm_redirect_url: None,
        }
    }

    struct NullBackend {
        events: tokio::sync::broadcast::Sender<vetclinic_core::AuthEvent>,
    }

    impl NullBackend {
        fn new() -> Self {
            let (events, _) = tokio::sync::broadcast::channel(1);
            Self { events }
        }
    }

    #[async_trait::async_trait]
    impl AuthBackend for NullBackend {
        async fn current_session(
            &self,
        ) -> anyhow::Result<Option<vetclinic_core::AuthSession>> {
            Ok(None)
        }
        fn subscribe(&self) -> tokio::sync::broadcast::Receiver<vetclinic_core::AuthEvent> {
            self.events.subscribe()
        }
        async fn sign_in_with_password(
            &self,
            _email: &str,
            _password: &str,
        ) -> anyhow::Result<vetclinic_core::AuthSession> {
            anyhow::bail!("not available")
        }
        async fn sign_up(
            &self,
            _email: &str,
            _password: &str,
            _full_name: &str,
        ) -> anyhow::Result<()> {
            Ok(())
        }
        async fn sign_out(&self) -> anyhow::Result<()> {
            Ok(())
        }
        async fn fetch_profile(
            &self,
            _user_id: &str,
        ) -> anyhow::Result<Option<vetclinic_core::models::Profile>> {
            Ok(None)
        }
        async fn fetch_roles(
            &self,
            _user_id: &str,
        ) -> anyhow::Result<Vec<vetclinic_core::models::Role>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_tab_cycle_roundtrip() {
        let mut tab = Tab::Dashboard;
        for _ in 0..8 {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Dashboard);
        assert_eq!(Tab::Dashboard.prev(), Tab::Messages);
    }

    #[test]
    fn test_search_filters_patients_by_substring() {
        let mut app = bare_app();
        app.search_query = "retriev".into();
        let patients = app.filtered_patients();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "Buddy");

        // Owner names match too
        app.search_query = "sarah john".into();
        assert!(app.filtered_patients().is_empty());
        app.search_query = "sarah".into();
        assert_eq!(app.filtered_patients().len(), 1);
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let app = bare_app();
        assert_eq!(app.filtered_patients().len(), app.clinic.patients.len());
    }

    #[test]
    fn test_move_selection_clamps_to_list() {
        let mut app = bare_app();
        app.move_selection(-3);
        assert_eq!(app.patient_selection, 0);
        app.move_selection(100);
        assert_eq!(app.patient_selection, app.filtered_patients().len() - 1);
    }

    #[test]
    fn test_clamp_selection_after_filter_shrinks() {
        let mut app = bare_app();
        app.patient_selection = 4;
        app.search_query = "buddy".into();
        app.clamp_selections();
        assert_eq!(app.patient_selection, 0);
    }

    #[test]
    fn test_submit_patient_form_rejects_invalid() {
        let mut app = bare_app();
        app.open_patient_form();
        assert!(!app.submit_patient_form());
        assert!(!app.patient_form.errors.is_empty());
        assert_eq!(app.state, AppState::AddingPatient);
    }

    #[test]
    fn test_submit_patient_form_creates_record() {
        let mut app = bare_app();
        let before = app.clinic.patients.len();
        app.open_patient_form();
        app.patient_form.form.name = "Simba".into();
        app.patient_form.form.species = "Cat".into();
        app.patient_form.form.owner_name = "Ravi Kumar".into();
        app.patient_form.form.phone = "+91 11111 22222".into();
        assert!(app.submit_patient_form());
        assert_eq!(app.clinic.patients.len(), before + 1);
        assert_eq!(app.state, AppState::Normal);

        app.search_query = "simba".into();
        let found = app.filtered_patients();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].species, Species::Cat);
    }

    #[test]
    fn test_auth_mode_toggle_resets_focus() {
        let mut app = bare_app();
        app.auth_error = Some("old".into());
        app.toggle_auth_mode();
        assert_eq!(app.auth_mode, AuthMode::SignUp);
        assert_eq!(app.auth_focus, AuthFocus::FullName);
        assert!(app.auth_error.is_none());
        app.toggle_auth_mode();
        assert_eq!(app.auth_mode, AuthMode::SignIn);
        assert_eq!(app.auth_focus, AuthFocus::Email);
    }

    #[test]
    fn test_input_length_limits() {
        let mut app = bare_app();
        app.auth_email = "x".repeat(MAX_EMAIL_LENGTH);
        assert!(!app.can_add_email_char());
        app.auth_password = "x".repeat(MAX_PASSWORD_LENGTH - 1);
        assert!(app.can_add_password_char());
    }
}
