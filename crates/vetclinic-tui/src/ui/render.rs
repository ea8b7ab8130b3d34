use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use vetclinic_core::auth::{protected_route, public_route, Admission, PublicAdmission};
use vetclinic_core::utils::format_amount;
use vetclinic_core::Repository;

use crate::app::{
    App, AppState, AuthFocus, AuthMode, PatientFormState, Tab, PATIENT_FORM_FIELDS,
};

use super::styles;
use super::tabs::{appointments, billing, dashboard, inventory, messages, patients, reports, staff};

pub fn render(frame: &mut Frame, app: &App) {
    let snapshot = app.snapshot();

    // The gate decides what this frame may show; the auth screen is the
    // sign-in entry point that the redirect lands on, itself admitted
    // through the public gate.
    match protected_route(&snapshot) {
        Admission::Loading => render_loading(frame),
        Admission::RedirectToSignIn => match public_route(&snapshot) {
            PublicAdmission::Render => render_auth_screen(frame, app),
            PublicAdmission::Loading => render_loading(frame),
            // The two gates cannot disagree on a settled snapshot
            PublicAdmission::RedirectToDashboard => render_chrome(frame, app),
        },
        Admission::Render => render_chrome(frame, app),
    }
}

fn render_loading(frame: &mut Frame) {
    let area = centered_rect_fixed(40, 5, frame.area());
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Connecting to clinic...", styles::muted_style())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Application chrome (signed-in)
// ============================================================================

fn render_chrome(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::AddingPatient) {
        render_patient_form_overlay(frame, &app.patient_form);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let title = "  VetCare Clinic";
    let role = snapshot.primary_role();
    let who = format!("{} ", snapshot.display_name());
    let badge = format!("[{}] ", role.title());
    let help_hint = "[?] Help";

    let used = title.len() + who.len() + badge.len() + help_hint.len() + 4;
    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(who, styles::list_item_style()),
        Span::styled(badge, styles::role_badge_style(role)),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        Tab::Dashboard,
        Tab::Patients,
        Tab::Appointments,
        Tab::Billing,
        Tab::Inventory,
        Tab::Staff,
        Tab::Reports,
        Tab::Messages,
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = format!("[{}] {}", i + 1, tab.title());
        if *tab == app.current_tab {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    // Show the live search query on the right
    if app.state == AppState::Searching || !app.search_query.is_empty() {
        let search = format!("/{}", app.search_query);
        let main_width: usize = spans.iter().map(|s| s.content.len()).sum();
        let padding = (area.width as usize).saturating_sub(main_width + search.len() + 2);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(search, styles::search_style()));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Dashboard => dashboard::render(frame, app, area),
        Tab::Patients => patients::render(frame, app, area),
        Tab::Appointments => appointments::render(frame, app, area),
        Tab::Billing => billing::render(frame, app, area),
        Tab::Inventory => inventory::render(frame, app, area),
        Tab::Staff => staff::render(frame, app, area),
        Tab::Reports => reports::render(frame, app, area),
        Tab::Messages => messages::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[/] search | [a]dd patient | [o] sign out | [q]uit";
    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        let outstanding =
            vetclinic_core::reports::outstanding_revenue(&app.clinic.invoices.list());
        format!(
            " {} patients | {} outstanding ",
            app.clinic.patients.len(),
            format_amount(outstanding)
        )
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

// ============================================================================
// Auth screen (signed-out)
// ============================================================================

fn render_auth_screen(frame: &mut Frame, app: &App) {
    let extra = app.auth_error.is_some() as u16 + app.auth_notice.is_some() as u16;
    let height = match app.auth_mode {
        AuthMode::SignIn => 13 + 2 * extra,
        AuthMode::SignUp => 14 + 2 * extra,
    };
    let area = centered_rect_fixed(52, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "        ╦  ╦╔═╗╔╦╗╔═╗╔═╗╦═╗╔═╗",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "        ╚╗╔╝║╣  ║ ║  ╠═╣╠╦╝║╣",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "         ╚╝ ╚═╝ ╩ ╚═╝╩ ╩╩╚═╚═╝  clinic",
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            match app.auth_mode {
                AuthMode::SignIn => "   Sign in to your veterinary dashboard",
                AuthMode::SignUp => "   Create your staff account",
            },
            styles::muted_style(),
        )),
        Line::from(""),
    ];

    if app.auth_mode == AuthMode::SignUp {
        lines.push(auth_field_line(
            "Full name",
            &app.auth_full_name,
            app.auth_focus == AuthFocus::FullName,
            false,
        ));
    }
    lines.push(auth_field_line(
        "Email    ",
        &app.auth_email,
        app.auth_focus == AuthFocus::Email,
        false,
    ));
    lines.push(auth_field_line(
        "Password ",
        &app.auth_password,
        app.auth_focus == AuthFocus::Password,
        true,
    ));

    let button_label = match app.auth_mode {
        AuthMode::SignIn => "  Sign in  ",
        AuthMode::SignUp => "  Sign up  ",
    };
    let button_focused = app.auth_focus == AuthFocus::Button;
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("              ["),
        Span::styled(
            if button_focused {
                format!("▶{}◀", button_label.trim_matches(' '))
            } else {
                button_label.to_string()
            },
            if button_focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ),
        Span::raw("]"),
    ]));

    if let Some(ref notice) = app.auth_notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", notice),
            styles::success_style(),
        )));
    }
    if let Some(ref error) = app.auth_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   [Tab]", styles::help_key_style()),
        Span::styled(" next field  ", styles::muted_style()),
        Span::styled("[F2]", styles::help_key_style()),
        Span::styled(
            match app.auth_mode {
                AuthMode::SignIn => " create account",
                AuthMode::SignUp => " back to sign in",
            },
            styles::muted_style(),
        ),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn auth_field_line<'a>(label: &'a str, value: &str, focused: bool, mask: bool) -> Line<'a> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let shown: String = if mask {
        "*".repeat(value.chars().count().min(24))
    } else {
        value.chars().rev().take(24).collect::<Vec<_>>().into_iter().rev().collect()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{}: [", label), styles::muted_style()),
        Span::styled(format!("{:<24}{}", shown, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

// ============================================================================
// Overlays
// ============================================================================

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 22, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  VetCare Clinic", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  1-8       ", styles::help_key_style()),
            Span::styled("Switch tabs", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ←/→       ", styles::help_key_style()),
            Span::styled("Prev/next tab", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", styles::help_key_style()),
            Span::styled("Switch focus (list ↔ detail)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓       ", styles::help_key_style()),
            Span::styled("Navigate list", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  PgUp/PgDn ", styles::help_key_style()),
            Span::styled("Scroll by page", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  /         ", styles::help_key_style()),
            Span::styled("Search current tab", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  a         ", styles::help_key_style()),
            Span::styled("Add patient (Patients tab)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  o         ", styles::help_key_style()),
            Span::styled("Sign out", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  q         ", styles::help_key_style()),
            Span::styled("Quit", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_patient_form_overlay(frame: &mut Frame, form: &PatientFormState) {
    let height = 8 + PATIENT_FORM_FIELDS.len() as u16 + form.errors.len().min(3) as u16;
    let area = centered_rect_fixed(56, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("  New Patient", styles::title_style())),
        Line::from(""),
    ];

    for (i, label) in PATIENT_FORM_FIELDS.iter().enumerate() {
        let focused = form.focus == i;
        let style = if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let cursor = if focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(format!("{:<8}: [", label), styles::muted_style()),
            Span::styled(format!("{:<28}{}", form.field_value(i), cursor), style),
            Span::styled("]", styles::muted_style()),
        ]));
    }

    lines.push(Line::from(""));
    let button_focused = form.on_button();
    lines.push(Line::from(vec![
        Span::raw("               ["),
        Span::styled(
            if button_focused { "▶ Save ◀" } else { "  Save  " },
            if button_focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ),
        Span::raw("]  Esc to cancel"),
    ]));

    for error in form.errors.iter().take(3) {
        lines.push(Line::from(Span::styled(
            format!(" {}", error.message),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  VetCare Clinic", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
