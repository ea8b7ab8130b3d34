use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use vetclinic_core::models::InvoiceStatus;
use vetclinic_core::reports;
use vetclinic_core::utils::format_amount;
use vetclinic_core::Repository;

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_activity(frame, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    render_species(frame, app, right[0]);
    render_revenue(frame, app, right[1]);
}

fn render_activity(frame: &mut Frame, area: Rect) {
    let history = reports::monthly_history();
    let peak_patients = history.iter().map(|m| m.patients).max().unwrap_or(1);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Patients seen", styles::highlight_style())),
    ];
    for metric in &history {
        let width = (metric.patients as usize * 24) / peak_patients as usize;
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<4}", metric.month), styles::muted_style()),
            Span::styled("█".repeat(width.max(1)), styles::success_style()),
            Span::styled(format!(" {}", metric.patients), styles::muted_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Revenue", styles::highlight_style())));
    let peak_revenue = history.iter().map(|m| m.revenue).fold(f64::MIN, f64::max);
    for metric in &history {
        let width = ((metric.revenue / peak_revenue) * 24.0).round() as usize;
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<4}", metric.month), styles::muted_style()),
            Span::styled("█".repeat(width.max(1)), styles::title_style()),
            Span::styled(
                format!(" {}", format_amount(metric.revenue)),
                styles::muted_style(),
            ),
        ]));
    }

    let block = Block::default()
        .title(" Six-month activity ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_species(frame: &mut Frame, app: &App, area: Rect) {
    let patients = app.clinic.patients.list();
    let breakdown = reports::species_breakdown(&patients);
    let total = patients.len().max(1);

    let mut lines = vec![Line::from("")];
    for (species, count) in breakdown {
        let width = (count * 20) / total;
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<8}", species.to_string()), styles::muted_style()),
            Span::styled("█".repeat(width.max(1)), styles::highlight_style()),
            Span::styled(
                format!(" {} ({}%)", count, count * 100 / total),
                styles::muted_style(),
            ),
        ]));
    }

    let block = Block::default()
        .title(" Patients by species ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_revenue(frame: &mut Frame, app: &App, area: Rect) {
    let invoices = app.clinic.invoices.list();

    let entries = [
        (InvoiceStatus::Paid, styles::success_style()),
        (InvoiceStatus::Pending, styles::warning_style()),
        (InvoiceStatus::Overdue, styles::error_style()),
    ];

    let mut lines = vec![Line::from("")];
    for (status, style) in entries {
        let amount = reports::revenue_by_status(&invoices, status);
        let count = invoices.iter().filter(|i| i.status == status).count();
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<9}", status.to_string()), style),
            Span::styled(
                format!("{:>12}  ({} invoices)", format_amount(amount), count),
                styles::list_item_style(),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Outstanding ", styles::muted_style()),
        Span::styled(
            format_amount(reports::outstanding_revenue(&invoices)),
            styles::warning_style(),
        ),
    ]));

    let block = Block::default()
        .title(" Billing summary ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
