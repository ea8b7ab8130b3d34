//! Keyboard input handling for the TUI.
//!
//! Keys are routed by the same gate decision the renderer uses, so the
//! signed-out screen and the signed-in chrome never share bindings.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use vetclinic_core::auth::{protected_route, Admission};

use crate::app::{App, AppState, AuthFocus, AuthMode, Focus, Tab, PAGE_SCROLL_SIZE};

/// Maximum length for a patient-form field as typed.
const MAX_FORM_FIELD_LENGTH: usize = 60;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match protected_route(&app.snapshot()) {
        Admission::Loading => {
            // Only quitting makes sense before the session settles
            return Ok(matches!(key.code, KeyCode::Char('q')));
        }
        Admission::RedirectToSignIn => return handle_auth_input(app, key).await,
        Admission::Render => {}
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle the new-patient overlay
    if matches!(app.state, AppState::AddingPatient) {
        handle_patient_form_input(app, key);
        return Ok(false);
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        handle_search_input(app, key);
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
        }
        KeyCode::Char('o') => {
            app.sign_out().await;
        }
        KeyCode::Char('a') => {
            if app.current_tab == Tab::Patients {
                app.open_patient_form();
            }
        }
        KeyCode::Char('1') => switch_tab(app, Tab::Dashboard),
        KeyCode::Char('2') => switch_tab(app, Tab::Patients),
        KeyCode::Char('3') => switch_tab(app, Tab::Appointments),
        KeyCode::Char('4') => switch_tab(app, Tab::Billing),
        KeyCode::Char('5') => switch_tab(app, Tab::Inventory),
        KeyCode::Char('6') => switch_tab(app, Tab::Staff),
        KeyCode::Char('7') => switch_tab(app, Tab::Reports),
        KeyCode::Char('8') => switch_tab(app, Tab::Messages),
        KeyCode::Left => switch_tab(app, app.current_tab.prev()),
        KeyCode::Right => switch_tab(app, app.current_tab.next()),
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::List => Focus::Detail,
                Focus::Detail => Focus::List,
            };
        }
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                app.search_query.clear();
                app.clamp_selections();
            }
            app.status_message = None;
        }
        _ => {}
    }

    Ok(false)
}

fn switch_tab(app: &mut App, tab: Tab) {
    app.current_tab = tab;
    app.focus = Focus::List;
    app.clamp_selections();
}

// ============================================================================
// Auth screen
// ============================================================================

fn auth_focus_order(mode: AuthMode) -> &'static [AuthFocus] {
    match mode {
        AuthMode::SignIn => &[AuthFocus::Email, AuthFocus::Password, AuthFocus::Button],
        AuthMode::SignUp => &[
            AuthFocus::FullName,
            AuthFocus::Email,
            AuthFocus::Password,
            AuthFocus::Button,
        ],
    }
}

fn cycle_auth_focus(app: &mut App, forward: bool) {
    let order = auth_focus_order(app.auth_mode);
    let current = order
        .iter()
        .position(|f| *f == app.auth_focus)
        .unwrap_or(0);
    let next = if forward {
        (current + 1) % order.len()
    } else {
        (current + order.len() - 1) % order.len()
    };
    app.auth_focus = order[next];
}

async fn handle_auth_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') if app.auth_focus == AuthFocus::Button => {
            // Allow quitting from the button row without typing a 'q'
            return Ok(true);
        }
        KeyCode::F(2) => app.toggle_auth_mode(),
        KeyCode::Tab | KeyCode::Down => cycle_auth_focus(app, true),
        KeyCode::BackTab | KeyCode::Up => cycle_auth_focus(app, false),
        KeyCode::Esc => {
            app.auth_error = None;
            app.auth_notice = None;
        }
        KeyCode::Enter => {
            if app.auth_focus == AuthFocus::Button || app.auth_focus == AuthFocus::Password {
                match app.auth_mode {
                    AuthMode::SignIn => app.attempt_sign_in().await,
                    AuthMode::SignUp => app.attempt_sign_up().await,
                }
            } else {
                cycle_auth_focus(app, true);
            }
        }
        KeyCode::Backspace => match app.auth_focus {
            AuthFocus::FullName => {
                app.auth_full_name.pop();
            }
            AuthFocus::Email => {
                app.auth_email.pop();
            }
            AuthFocus::Password => {
                app.auth_password.pop();
            }
            AuthFocus::Button => {}
        },
        KeyCode::Char(c) => match app.auth_focus {
            AuthFocus::FullName => {
                if app.can_add_name_char() {
                    app.auth_full_name.push(c);
                }
            }
            AuthFocus::Email => {
                if app.can_add_email_char() && !c.is_whitespace() {
                    app.auth_email.push(c);
                }
            }
            AuthFocus::Password => {
                if app.can_add_password_char() {
                    app.auth_password.push(c);
                }
            }
            AuthFocus::Button => {}
        },
        _ => {}
    }

    Ok(false)
}

// ============================================================================
// Search & form overlays
// ============================================================================

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_query.clear();
            app.state = AppState::Normal;
            app.clamp_selections();
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.clamp_selections();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.clamp_selections();
        }
        _ => {}
    }
}

fn handle_patient_form_input(app: &mut App, key: KeyEvent) {
    let field_count = crate::app::PATIENT_FORM_FIELDS.len();
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.patient_form.focus = (app.patient_form.focus + 1) % (field_count + 1);
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.patient_form.focus =
                (app.patient_form.focus + field_count) % (field_count + 1);
        }
        KeyCode::Enter => {
            if app.patient_form.on_button() {
                app.submit_patient_form();
            } else {
                app.patient_form.focus += 1;
            }
        }
        KeyCode::Backspace => {
            if let Some(value) = app.patient_form.field_value_mut() {
                value.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(value) = app.patient_form.field_value_mut() {
                if value.len() < MAX_FORM_FIELD_LENGTH {
                    value.push(c);
                }
            }
        }
        _ => {}
    }
}
