use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use vetclinic_core::models::StaffMember;

use crate::app::{App, Focus};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let members = app.filtered_staff();
    let focused = matches!(app.focus, Focus::List);

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Role"),
        Cell::from("Department"),
        Cell::from("Status"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = members
        .iter()
        .map(|m| {
            let duty_style = if m.on_duty {
                styles::success_style()
            } else {
                styles::muted_style()
            };
            Row::new(vec![
                Cell::from(m.name.clone()),
                Cell::from(Span::styled(m.role.title(), styles::role_badge_style(m.role))),
                Cell::from(m.department.clone().unwrap_or_else(|| "-".into())),
                Cell::from(Span::styled(m.status_str(), duty_style)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Length(14),
        Constraint::Fill(3),
        Constraint::Length(9),
    ];

    let title = format!(" Staff ({}) ", members.len());
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
    state.select(Some(app.staff_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let members = app.filtered_staff();
    let selected = members.get(app.staff_selection);
    let focused = matches!(app.focus, Focus::Detail);

    let content = match selected {
        Some(member) => detail_lines(member),
        None => vec![Line::from(Span::styled(
            " No staff member selected",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .title(" Member ")
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
        Span::styled(format!(" {:<16}", label), styles::muted_style()),
        Span::styled(value, styles::list_item_style()),
    ])
}

fn detail_lines(member: &StaffMember) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", member.name), styles::title_style()),
            Span::styled(
                format!("[{}]", member.role.title()),
                styles::role_badge_style(member.role),
            ),
        ]),
        Line::from(""),
        field(
            "Department",
            member.department.clone().unwrap_or_else(|| "-".into()),
        ),
        field("Email", member.email.clone()),
        field("Phone", member.phone.clone().unwrap_or_else(|| "-".into())),
    ];

    if let Some(ref specialization) = member.specialization {
        lines.push(field("Specialization", specialization.clone()));
    }
    if let Some(ref schedule) = member.schedule {
        lines.push(field("Schedule", schedule.clone()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", member.status_str()),
        if member.on_duty {
            styles::success_style()
        } else {
            styles::muted_style()
        },
    )));

    lines
}
