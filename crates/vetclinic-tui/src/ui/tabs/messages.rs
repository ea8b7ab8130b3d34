use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use vetclinic_core::models::{Message, MessageStatus};

use crate::app::{App, Focus};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn status_style(status: MessageStatus) -> ratatui::style::Style {
    match status {
        MessageStatus::Sent => styles::success_style(),
        MessageStatus::Scheduled => styles::highlight_style(),
        MessageStatus::Draft => styles::muted_style(),
        MessageStatus::Failed => styles::error_style(),
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let messages = app.filtered_messages();
    let focused = matches!(app.focus, Focus::List);

    let header = Row::new([
        Cell::from("Date"),
        Cell::from("Recipient"),
        Cell::from("Subject"),
        Cell::from("Via"),
        Cell::from("Status"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = messages
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.date.format("%b %d").to_string()),
                Cell::from(m.recipient.clone()),
                Cell::from(m.subject.clone()),
                Cell::from(m.channel.to_string()),
                Cell::from(Span::styled(m.status.to_string(), status_style(m.status))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(6),
        Constraint::Length(10),
    ];

    let title = format!(" Communications ({}) ", messages.len());
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
    state.select(Some(app.message_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let messages = app.filtered_messages();
    let selected = messages.get(app.message_selection);
    let focused = matches!(app.focus, Focus::Detail);

    let content = match selected {
        Some(message) => detail_lines(message),
        None => vec![Line::from(Span::styled(
            " No message selected",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .title(" Message ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));
    frame.render_widget(
        Paragraph::new(content).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn detail_lines(message: &Message) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", message.subject),
            styles::title_style(),
        )),
        Line::from(vec![
            Span::styled(
                format!(" {} via {} ", message.date.format("%b %d, %Y"), message.channel),
                styles::muted_style(),
            ),
            Span::styled(message.status.to_string(), status_style(message.status)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" To      ", styles::muted_style()),
            Span::styled(message.recipient.clone(), styles::list_item_style()),
        ]),
    ];

    if let Some(ref patient) = message.patient_name {
        lines.push(Line::from(vec![
            Span::styled(" Patient ", styles::muted_style()),
            Span::styled(patient.clone(), styles::list_item_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", message.body),
        styles::list_item_style(),
    )));

    lines
}
