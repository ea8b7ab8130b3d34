use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use vetclinic_core::models::{Appointment, AppointmentStatus};
use vetclinic_core::reports;
use vetclinic_core::Repository;

use crate::app::{App, Focus};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_day_summary(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    render_table(frame, app, body[0]);
    render_detail(frame, app, body[1]);
}

fn status_style(status: AppointmentStatus) -> ratatui::style::Style {
    match status {
        AppointmentStatus::Confirmed | AppointmentStatus::Completed => styles::success_style(),
        AppointmentStatus::Scheduled => styles::list_item_style(),
        AppointmentStatus::InProgress => styles::highlight_style(),
        AppointmentStatus::Urgent => styles::error_style(),
        AppointmentStatus::Cancelled => styles::muted_style(),
    }
}

fn render_day_summary(frame: &mut Frame, app: &App, area: Rect) {
    let appointments = app.clinic.appointments.list();
    let confirmed = reports::appointments_by_status(&appointments, AppointmentStatus::Confirmed);
    let in_progress =
        reports::appointments_by_status(&appointments, AppointmentStatus::InProgress);
    let urgent = reports::appointments_by_status(&appointments, AppointmentStatus::Urgent);

    let line = Line::from(vec![
        Span::styled(format!(" Total {} ", appointments.len()), styles::list_item_style()),
        Span::styled("| ", styles::muted_style()),
        Span::styled(format!("Confirmed {} ", confirmed), styles::success_style()),
        Span::styled("| ", styles::muted_style()),
        Span::styled(format!("In progress {} ", in_progress), styles::highlight_style()),
        Span::styled("| ", styles::muted_style()),
        Span::styled(format!("Urgent {}", urgent), styles::error_style()),
    ]);

    let block = Block::default()
        .title(" Schedule ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let appointments = app.filtered_appointments();
    let focused = matches!(app.focus, Focus::List);

    let header = Row::new([
        Cell::from("Time"),
        Cell::from("Patient"),
        Cell::from("Type"),
        Cell::from("Doctor"),
        Cell::from("Status"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = appointments
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.time_str()),
                Cell::from(a.patient_name.clone()),
                Cell::from(a.kind.to_string()),
                Cell::from(a.doctor.clone()),
                Cell::from(Span::styled(a.status.to_string(), status_style(a.status))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(12),
    ];

    let title = format!(" Appointments ({}) ", appointments.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.appointment_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let appointments = app.filtered_appointments();
    let selected = appointments.get(app.appointment_selection);
    let focused = matches!(app.focus, Focus::Detail);

    let content = match selected {
        Some(appointment) => detail_lines(appointment),
        None => vec![Line::from(Span::styled(
            " No appointment selected",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));
    frame.render_widget(
        Paragraph::new(content).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn detail_lines(a: &Appointment) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} - {}", a.patient_name, a.kind),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" When          ", styles::muted_style()),
            Span::styled(
                format!("{} {}", a.date.format("%b %d, %Y"), a.time_str()),
                styles::list_item_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Duration      ", styles::muted_style()),
            Span::styled(format!("{} min", a.duration_minutes), styles::list_item_style()),
        ]),
        Line::from(vec![
            Span::styled(" Doctor        ", styles::muted_style()),
            Span::styled(a.doctor.clone(), styles::list_item_style()),
        ]),
        Line::from(vec![
            Span::styled(" Status        ", styles::muted_style()),
            Span::styled(a.status.to_string(), status_style(a.status)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Owner         ", styles::muted_style()),
            Span::styled(a.owner_name.clone(), styles::list_item_style()),
        ]),
    ];

    if let Some(ref phone) = a.owner_phone {
        lines.push(Line::from(vec![
            Span::styled(" Phone         ", styles::muted_style()),
            Span::styled(phone.clone(), styles::list_item_style()),
        ]));
    }

    if let Some(ref notes) = a.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Notes", styles::highlight_style())));
        lines.push(Line::from(Span::styled(
            format!(" {}", notes),
            styles::list_item_style(),
        )));
    }

    lines
}
