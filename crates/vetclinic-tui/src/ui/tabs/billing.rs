use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use vetclinic_core::models::{Invoice, InvoiceStatus};
use vetclinic_core::utils::format_amount;

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

fn status_style(status: InvoiceStatus) -> ratatui::style::Style {
    match status {
        InvoiceStatus::Paid => styles::success_style(),
        InvoiceStatus::Pending => styles::warning_style(),
        InvoiceStatus::Overdue => styles::error_style(),
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let invoices = app.filtered_invoices();
    let focused = matches!(app.focus, Focus::List);

    let header = Row::new([
        Cell::from("Invoice"),
        Cell::from("Patient"),
        Cell::from("Owner"),
        Cell::from("Total"),
        Cell::from("Status"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = invoices
        .iter()
        .map(|i| {
            Row::new(vec![
                Cell::from(i.number.clone()),
                Cell::from(i.patient_name.clone()),
                Cell::from(i.owner_name.clone()),
                Cell::from(format_amount(i.total())),
                Cell::from(Span::styled(i.status.to_string(), status_style(i.status))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(12),
        Constraint::Length(9),
    ];

    let title = format!(" Invoices ({}) ", invoices.len());
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
    state.select(Some(app.invoice_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let invoices = app.filtered_invoices();
    let selected = invoices.get(app.invoice_selection);
    let focused = matches!(app.focus, Focus::Detail);

    let content = match selected {
        Some(invoice) => detail_lines(invoice),
        None => vec![Line::from(Span::styled(
            " No invoice selected",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .title(" Invoice ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));
    frame.render_widget(
        Paragraph::new(content).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn detail_lines(invoice: &Invoice) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} - {}", invoice.number, invoice.patient_name),
            styles::title_style(),
        )),
        Line::from(vec![
            Span::styled(
                format!(" {} ", invoice.date.format("%b %d, %Y")),
                styles::muted_style(),
            ),
            Span::styled(invoice.status.to_string(), status_style(invoice.status)),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Services", styles::highlight_style())),
    ];

    for service in &invoice.services {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<26}", service.name), styles::list_item_style()),
            Span::styled(
                format!("{:>10}", format_amount(service.price)),
                styles::list_item_style(),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(money_line("Subtotal", invoice.subtotal()));
    lines.push(money_line("Tax", invoice.tax));
    if invoice.discount > 0.0 {
        lines.push(money_line("Discount", -invoice.discount));
    }
    lines.push(Line::from(vec![
        Span::styled(" Total         ", styles::muted_style()),
        Span::styled(
            format_amount(invoice.total()),
            styles::title_style(),
        ),
    ]));

    lines.push(Line::from(""));
    if let Some(method) = invoice.payment_method {
        lines.push(Line::from(vec![
            Span::styled(" Paid via      ", styles::muted_style()),
            Span::styled(method.to_string(), styles::list_item_style()),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled(" Due           ", styles::muted_style()),
            Span::styled(
                invoice.due_date.format("%b %d, %Y").to_string(),
                styles::warning_style(),
            ),
        ]));
    }

    lines
}

fn money_line(label: &str, amount: f64) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!(" {:<14}", label), styles::muted_style()),
        Span::styled(format_amount(amount), styles::list_item_style()),
    ])
}
