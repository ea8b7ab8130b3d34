//! Role-gated dashboard variants.
//!
//! The signed-in account's primary role picks which variant renders, one
//! handler per role; accounts with no recognized role get the
//! [`Role::DEFAULT`] variant.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use vetclinic_core::models::{AppointmentStatus, InvoiceStatus, PatientStatus, Role};
use vetclinic_core::reports;
use vetclinic_core::utils::format_amount;
use vetclinic_core::Repository;

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.snapshot().primary_role() {
        Role::Admin => render_admin(frame, app, area),
        Role::Doctor => render_doctor(frame, app, area),
        Role::Receptionist => render_receptionist(frame, app, area),
        Role::Accountant => render_accountant(frame, app, area),
    }
}

fn split_dashboard(area: Rect) -> (Vec<Rect>, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(rows[0]);

    (cards.to_vec(), rows[1])
}

fn stat_card(frame: &mut Frame, area: Rect, title: &str, value: String, note: &str, style: Style) {
    let lines = vec![
        Line::from(Span::styled(format!(" {}", value), style)),
        Line::from(Span::styled(format!(" {}", note), styles::muted_style())),
    ];
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn panel(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Variants
// ============================================================================

fn render_admin(frame: &mut Frame, app: &App, area: Rect) {
    let (cards, body) = split_dashboard(area);
    let invoices = app.clinic.invoices.list();
    let inventory = app.clinic.inventory.list();
    let low = reports::low_stock_items(&inventory);

    stat_card(
        frame,
        cards[0],
        "Patients",
        app.clinic.patients.len().to_string(),
        "registered",
        styles::title_style(),
    );
    stat_card(
        frame,
        cards[1],
        "Monthly revenue",
        format_amount(reports::monthly_history().last().map(|m| m.revenue).unwrap_or(0.0)),
        "this month",
        styles::success_style(),
    );
    stat_card(
        frame,
        cards[2],
        "Staff",
        app.clinic.staff.len().to_string(),
        "team members",
        styles::highlight_style(),
    );
    stat_card(
        frame,
        cards[3],
        "Inventory",
        app.clinic.inventory.len().to_string(),
        &format!("{} low stock", low.len()),
        if low.is_empty() {
            styles::success_style()
        } else {
            styles::error_style()
        },
    );

    let mut lines = vec![Line::from("")];
    lines.push(Line::from(vec![
        Span::styled("  Outstanding invoices  ", styles::muted_style()),
        Span::styled(
            format_amount(reports::outstanding_revenue(&invoices)),
            styles::warning_style(),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Monthly performance",
        styles::highlight_style(),
    )));
    for metric in reports::monthly_history() {
        lines.push(history_bar(&metric));
    }
    panel(frame, body, "Clinic overview", lines);
}

fn render_doctor(frame: &mut Frame, app: &App, area: Rect) {
    let (cards, body) = split_dashboard(area);
    let appointments = app.clinic.appointments.list();
    let patients = app.clinic.patients.list();
    let in_treatment = patients
        .iter()
        .filter(|p| p.status == PatientStatus::Treatment)
        .count();
    let critical = patients
        .iter()
        .filter(|p| p.status == PatientStatus::Critical)
        .count();
    let open: Vec<_> = appointments.iter().filter(|a| a.is_open()).collect();

    stat_card(
        frame,
        cards[0],
        "Appointments",
        open.len().to_string(),
        "on the schedule",
        styles::title_style(),
    );
    stat_card(
        frame,
        cards[1],
        "In treatment",
        in_treatment.to_string(),
        "patients",
        styles::warning_style(),
    );
    stat_card(
        frame,
        cards[2],
        "Critical",
        critical.to_string(),
        "need attention",
        if critical == 0 {
            styles::success_style()
        } else {
            styles::error_style()
        },
    );
    stat_card(
        frame,
        cards[3],
        "Urgent",
        reports::appointments_by_status(&appointments, AppointmentStatus::Urgent).to_string(),
        "walk-ins",
        styles::error_style(),
    );

    let mut lines = vec![Line::from("")];
    for appointment in open.iter().take(8) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", appointment.time_str()), styles::muted_style()),
            Span::styled(
                format!("{:<12}", appointment.patient_name),
                styles::list_item_style(),
            ),
            Span::styled(
                format!("{:<14}", appointment.kind.to_string()),
                styles::list_item_style(),
            ),
            Span::styled(appointment.doctor.clone(), styles::muted_style()),
        ]));
    }
    panel(frame, body, "Today's schedule", lines);
}

fn render_receptionist(frame: &mut Frame, app: &App, area: Rect) {
    let (cards, body) = split_dashboard(area);
    let appointments = app.clinic.appointments.list();
    let messages = app.clinic.messages.list();

    stat_card(
        frame,
        cards[0],
        "Appointments",
        appointments.len().to_string(),
        "booked",
        styles::title_style(),
    );
    stat_card(
        frame,
        cards[1],
        "Confirmed",
        reports::appointments_by_status(&appointments, AppointmentStatus::Confirmed).to_string(),
        "ready to go",
        styles::success_style(),
    );
    stat_card(
        frame,
        cards[2],
        "Patients",
        app.clinic.patients.len().to_string(),
        "on file",
        styles::highlight_style(),
    );
    stat_card(
        frame,
        cards[3],
        "Reminders",
        messages
            .iter()
            .filter(|m| m.status == vetclinic_core::models::MessageStatus::Scheduled)
            .count()
            .to_string(),
        "scheduled",
        styles::warning_style(),
    );

    let mut lines = vec![Line::from("")];
    for appointment in appointments.iter().take(8) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", appointment.time_str()), styles::muted_style()),
            Span::styled(
                format!("{:<12}", appointment.patient_name),
                styles::list_item_style(),
            ),
            Span::styled(
                format!("{:<16}", appointment.owner_name),
                styles::list_item_style(),
            ),
            Span::styled(appointment.status.to_string(), styles::muted_style()),
        ]));
    }
    panel(frame, body, "Front desk", lines);
}

fn render_accountant(frame: &mut Frame, app: &App, area: Rect) {
    let (cards, body) = split_dashboard(area);
    let invoices = app.clinic.invoices.list();
    let overdue = invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Overdue)
        .count();

    stat_card(
        frame,
        cards[0],
        "Collected",
        format_amount(reports::revenue_by_status(&invoices, InvoiceStatus::Paid)),
        "paid invoices",
        styles::success_style(),
    );
    stat_card(
        frame,
        cards[1],
        "Outstanding",
        format_amount(reports::outstanding_revenue(&invoices)),
        "pending + overdue",
        styles::warning_style(),
    );
    stat_card(
        frame,
        cards[2],
        "Overdue",
        overdue.to_string(),
        "invoices",
        if overdue == 0 {
            styles::success_style()
        } else {
            styles::error_style()
        },
    );
    stat_card(
        frame,
        cards[3],
        "Invoices",
        invoices.len().to_string(),
        "this period",
        styles::title_style(),
    );

    let mut lines = vec![Line::from("")];
    lines.push(Line::from(Span::styled(
        "  Revenue by month",
        styles::highlight_style(),
    )));
    for metric in reports::monthly_history() {
        lines.push(history_bar(&metric));
    }
    panel(frame, body, "Finance", lines);
}

/// One month as a text bar, scaled against the series peak.
fn history_bar(metric: &reports::MonthlyMetric) -> Line<'static> {
    let peak = reports::monthly_history()
        .iter()
        .map(|m| m.revenue)
        .fold(f64::MIN, f64::max);
    let width = ((metric.revenue / peak) * 24.0).round() as usize;
    Line::from(vec![
        Span::styled(format!("  {:<4}", metric.month), styles::muted_style()),
        Span::styled("█".repeat(width.max(1)), styles::title_style()),
        Span::styled(
            format!(" {}", format_amount(metric.revenue)),
            styles::muted_style(),
        ),
    ])
}
