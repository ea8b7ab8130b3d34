use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use vetclinic_core::models::InventoryItem;
use vetclinic_core::utils::format_amount;

use crate::app::{App, Focus};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let items = app.filtered_inventory();
    let focused = matches!(app.focus, Focus::List);
    let low_count = items.iter().filter(|i| i.is_low_stock()).count();

    let header = Row::new([
        Cell::from("Item"),
        Cell::from("Category"),
        Cell::from("Stock"),
        Cell::from("Reorder at"),
        Cell::from("Unit price"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = items
        .iter()
        .map(|i| {
            let stock_style = if i.is_low_stock() {
                styles::error_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(i.name.clone()),
                Cell::from(i.category.to_string()),
                Cell::from(Span::styled(i.stock_str(), stock_style)),
                Cell::from(format!("{}", i.reorder_level)),
                Cell::from(format_amount(i.unit_price)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(11),
    ];

    let title = format!(" Inventory ({}, {} low) ", items.len(), low_count);
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
    state.select(Some(app.inventory_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let items = app.filtered_inventory();
    let selected = items.get(app.inventory_selection);
    let focused = matches!(app.focus, Focus::Detail);

    let content = match selected {
        Some(item) => detail_lines(item),
        None => vec![Line::from(Span::styled(
            " No item selected",
            styles::muted_style(),
        ))],
    };

    let block = Block::default()
        .title(" Item ")
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
        Span::styled(format!(" {:<12}", label), styles::muted_style()),
        Span::styled(value, styles::list_item_style()),
    ])
}

fn detail_lines(item: &InventoryItem) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(format!(" {}", item.name), styles::title_style())),
        Line::from(""),
        field("Category", item.category.to_string()),
        field("In stock", item.stock_str()),
        field("Reorder at", format!("{} {}", item.reorder_level, item.unit)),
        field("Unit price", format_amount(item.unit_price)),
        field(
            "Supplier",
            item.supplier.clone().unwrap_or_else(|| "-".into()),
        ),
        field(
            "Location",
            item.location.clone().unwrap_or_else(|| "-".into()),
        ),
    ];

    if let Some(expiry) = item.expiry {
        lines.push(field("Expires", expiry.format("%b %d, %Y").to_string()));
    }

    if item.is_low_stock() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Low stock - reorder needed",
            styles::error_style(),
        )));
    }

    lines
}
