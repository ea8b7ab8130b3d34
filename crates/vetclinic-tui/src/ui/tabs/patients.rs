use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use vetclinic_core::models::{Patient, PatientStatus};

use crate::app::{App, Focus};
use crate::ui::styles;

/// Render the Patients tab - roster table with a detail panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn status_style(status: PatientStatus) -> ratatui::style::Style {
    match status {
        PatientStatus::Healthy => styles::success_style(),
        PatientStatus::Treatment => styles::warning_style(),
        PatientStatus::Critical => styles::error_style(),
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let patients = app.filtered_patients();
    let focused = matches!(app.focus, Focus::List);

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Species"),
        Cell::from("Breed"),
        Cell::from("Owner"),
        Cell::from("Status"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = patients
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.species.to_string()),
                Cell::from(p.breed_str().to_string()),
                Cell::from(p.owner.name.clone()),
                Cell::from(Span::styled(p.status.to_string(), status_style(p.status))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(24),
        Constraint::Length(8),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(10),
    ];

    let title = format!(" Patients ({}) ", patients.len());
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
    state.select(Some(app.patient_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let patients = app.filtered_patients();
    let selected = patients.get(app.patient_selection);
    let focused = matches!(app.focus, Focus::Detail);

    let content = match selected {
        Some(patient) => detail_lines(patient),
        None => vec![Line::from(Span::styled(
            " No patient selected",
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

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<14}", label), styles::muted_style()),
        Span::styled(value, styles::list_item_style()),
    ])
}

fn detail_lines(patient: &Patient) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", patient.display_label()),
            styles::title_style(),
        )),
        Line::from(""),
        field("Breed", patient.breed_str().to_string()),
        field("Age", format!("{} yrs", patient.age_str())),
        field("Gender", patient.gender.clone().unwrap_or_else(|| "-".into())),
        field("Weight", patient.weight_str()),
        field(
            "Microchip",
            patient.microchip.clone().unwrap_or_else(|| "-".into()),
        ),
        Line::from(vec![
            Span::styled(" Status        ", styles::muted_style()),
            Span::styled(patient.status.to_string(), status_style(patient.status)),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Owner", styles::highlight_style())),
        field("Name", patient.owner.name.clone()),
        field("Phone", patient.owner.phone.clone()),
        field(
            "Email",
            patient.owner.email.clone().unwrap_or_else(|| "-".into()),
        ),
        field(
            "Address",
            patient.owner.address.clone().unwrap_or_else(|| "-".into()),
        ),
    ];

    // Medical block only when something is recorded
    let medical = &patient.medical;
    if medical.allergies.is_some()
        || medical.medications.is_some()
        || medical.conditions.is_some()
        || medical.notes.is_some()
    {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Medical", styles::highlight_style())));
        if let Some(ref allergies) = medical.allergies {
            lines.push(field("Allergies", allergies.clone()));
        }
        if let Some(ref medications) = medical.medications {
            lines.push(field("Medications", medications.clone()));
        }
        if let Some(ref conditions) = medical.conditions {
            lines.push(field("Conditions", conditions.clone()));
        }
        if let Some(ref notes) = medical.notes {
            lines.push(field("Notes", notes.clone()));
        }
    }

    if !patient.visits.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Visit history",
            styles::highlight_style(),
        )));
        for visit in &patient.visits {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", visit.date.format("%b %d, %Y")),
                    styles::muted_style(),
                ),
                Span::styled(visit.reason.clone(), styles::list_item_style()),
                Span::styled(format!("  {}", visit.doctor), styles::muted_style()),
            ]));
        }
    }

    if let Some(next) = patient.next_vaccination {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Next vaccination ", styles::muted_style()),
            Span::styled(
                next.format("%b %d, %Y").to_string(),
                styles::warning_style(),
            ),
        ]));
    }

    lines
}
