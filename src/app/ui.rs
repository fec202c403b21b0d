use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState,
        Tabs, Wrap,
    },
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use strum::IntoEnumIterator;

use crate::app::{
    Portfolio,
    app::Tab,
    utils::{format_money, format_percent, format_shares},
};

pub fn render(
    frame: &mut Frame,
    portfolio: &Portfolio,
    tab: Tab,
    table_state: &mut TableState,
    popup_message: &Option<String>,
    error_popup: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let titles = Tab::iter()
        .enumerate()
        .map(|(i, t)| format!("{} {}", i + 1, t))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(tab.index())
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .block(
            Block::default()
                .title("Financial Portfolio Tracker")
                .borders(Borders::ALL),
        );
    frame.render_widget(tabs, chunks[0]);

    match tab {
        Tab::Dashboard => render_dashboard(frame, chunks[1], portfolio, table_state),
        Tab::Assets => render_assets(frame, chunks[1], portfolio, table_state),
        Tab::Transactions => render_transactions(frame, chunks[1], portfolio, table_state),
        Tab::Insights => render_insights(frame, chunks[1], portfolio),
    }

    let help = Paragraph::new(
        "q quit | Tab/←/→ switch view | ↑/↓ select | r refresh | d delete transaction",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);

    if let Some(message) = popup_message {
        render_popup(frame, message, Color::Cyan);
    }
    if let Some(message) = error_popup {
        render_popup(frame, message, Color::Red);
    }
}

fn gain_color(value: &Decimal) -> Color {
    if *value >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

fn header(cells: &[&'static str]) -> Row<'static> {
    Row::new(
        cells
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
    )
    .height(1)
}

fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let empty_message = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(empty_message, area);
}

fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    portfolio: &Portfolio,
    table_state: &mut TableState,
) {
    let holdings = portfolio.holdings();

    if holdings.is_empty() {
        render_empty(
            frame,
            area,
            "No assets in your portfolio yet. Add some with `finance-tracker asset add`.",
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(10),
        ])
        .split(area);

    let summary = portfolio.summary();
    let totals = Line::from(vec![
        format!("Total Portfolio Value: {}", format_money(summary.total_value())).into(),
        "    ".into(),
        Span::styled(
            format!(
                "Total Gain/Loss: {} ({})",
                format_money(summary.total_gain_loss()),
                format_percent(summary.gain_loss_ratio())
            ),
            Style::default().fg(gain_color(summary.total_gain_loss())),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(totals).block(
            Block::default()
                .title("Portfolio Summary")
                .borders(Borders::ALL),
        ),
        chunks[0],
    );

    let rows = holdings.iter().map(|holding| {
        let gain_loss = holding.gain_loss();
        let cells = [
            Cell::from(holding.ticker().to_string()),
            Cell::from(holding.name().to_string()),
            Cell::from(holding.asset_class().to_string()),
            Cell::from(format_shares(holding.net_shares())),
            Cell::from(format_money(holding.cost_basis())),
            Cell::from(format_money(holding.current_price())),
            Cell::from(format_money(&holding.current_value())),
            Cell::from(format_money(&gain_loss))
                .style(Style::default().fg(gain_color(&gain_loss))),
        ];
        Row::new(cells).height(1)
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
    ];

    let table = Table::new(rows, widths)
        .header(header(&[
            "Ticker",
            "Name",
            "Class",
            "Shares",
            "Cost Basis",
            "Current Price",
            "Current Value",
            "Gain/Loss",
        ]))
        .block(Block::default().title("Holdings Breakdown").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(table, chunks[1], table_state);

    let bars = summary
        .value_by_class()
        .iter()
        .map(|(class, value)| {
            Bar::default()
                .label(Line::from(class.to_string()))
                .value(value.round().to_u64().unwrap_or(0))
                .text_value(format_money(value))
        })
        .collect::<Vec<_>>();
    let chart = BarChart::default()
        .block(Block::default().title("Portfolio by Asset Class").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(16)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan));
    frame.render_widget(chart, chunks[2]);
}

fn render_assets(
    frame: &mut Frame,
    area: Rect,
    portfolio: &Portfolio,
    table_state: &mut TableState,
) {
    let assets = portfolio.assets();

    if assets.is_empty() {
        render_empty(frame, area, "No assets to display.");
        return;
    }

    let rows = assets.iter().map(|asset| {
        Row::new([
            Cell::from(asset.ticker().to_string()),
            Cell::from(asset.name().to_string()),
            Cell::from(asset.asset_class().to_string()),
            Cell::from(format_money(asset.current_price())),
        ])
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Min(30),
        Constraint::Length(14),
        Constraint::Length(15),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["Ticker", "Name", "Class", "Current Price"]))
        .block(Block::default().title("Assets").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(table, area, table_state);
}

fn render_transactions(
    frame: &mut Frame,
    area: Rect,
    portfolio: &Portfolio,
    table_state: &mut TableState,
) {
    let transactions = portfolio.transactions();

    if transactions.is_empty() {
        render_empty(frame, area, "No transactions logged yet.");
        return;
    }

    let rows = transactions.iter().map(|transaction| {
        Row::new([
            Cell::from(transaction.id().to_string()),
            Cell::from(transaction.ticker().to_string()),
            Cell::from(transaction.date().to_string()),
            Cell::from(transaction.transaction_type().to_string()),
            Cell::from(format_shares(transaction.shares())),
            Cell::from(format_money(transaction.price_per_share())),
            Cell::from(format_money(transaction.total_cost())),
        ])
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
    ];

    let table = Table::new(rows, widths)
        .header(header(&[
            "ID",
            "Ticker",
            "Date",
            "Type",
            "Shares",
            "Price",
            "Total Cost",
        ]))
        .block(Block::default().title("Transaction History").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(table, area, table_state);
}

fn render_insights(frame: &mut Frame, area: Rect, portfolio: &Portfolio) {
    let Some(insights) = portfolio.insights() else {
        render_empty(
            frame,
            area,
            "No insights available. Please add assets and transactions.",
        );
        return;
    };

    let lines = vec![
        Line::from(format!("Total Unique Assets:      {}", insights.total_unique_assets())),
        Line::from(format!("Total Transactions:       {}", insights.total_transactions())),
        Line::from(format!(
            "Total Buy Cost:           {}",
            format_money(insights.total_buy_cost())
        )),
        Line::from(format!(
            "Average Price per Share:  {}",
            format_money(insights.avg_price_per_share())
        )),
        Line::from(format!(
            "Max Transaction Cost:     {}",
            format_money(insights.max_transaction_cost())
        )),
        Line::from(format!(
            "Min Transaction Cost:     {}",
            format_money(insights.min_transaction_cost())
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Business Insights").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_popup(frame: &mut Frame, message: &str, color: Color) {
    let area = popup_area(frame.area(), 50, 5);
    let popup = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
