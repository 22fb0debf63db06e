//! Frame rendering. Pure presentation: reads [`GameState`], never mutates it.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::dialog::{DialogMessage, OpenDialog};
use crate::models::Currency;
use crate::state::{GameState, Phase};
use crate::ui::layout::{DialogLayout, ScreenLayout};

const TITLE: &str = "FX Trading Simulator";
const HINT: &str = "Select a currency to trade · press n or click Next Day to move the market";
/// History points shown in the chart.
const CHART_POINTS: usize = 30;
const RECENT_TRADES: usize = 3;

const HIGHLIGHT: Color = Color::Cyan;
const TEXT: Color = Color::White;
const PROFIT: Color = Color::Green;
const LOSS: Color = Color::LightRed;
const NEWS: Color = Color::Yellow;
const SELECTED_BG: Color = Color::DarkGray;

const SERIES_COLORS: [Color; 6] = [
    Color::LightBlue,
    Color::LightYellow,
    Color::Green,
    Color::Magenta,
    Color::LightRed,
    Color::LightCyan,
];

fn series_color(idx: usize) -> Color {
    SERIES_COLORS[idx % SERIES_COLORS.len()]
}

fn pnl_color(value: f64) -> Color {
    if value >= 0.0 {
        PROFIT
    } else {
        LOSS
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(HIGHLIGHT))
}

pub fn draw(frame: &mut Frame, state: &GameState, layout: &ScreenLayout) {
    match state.phase {
        Phase::Intro => draw_intro(frame, frame.area(), state.wallet.initial_cash()),
        Phase::Trading => draw_trading(frame, state, layout),
    }
}

// ─── Start Screen ─────────────────────────────────────────────────────────────

fn draw_intro(frame: &mut Frame, area: Rect, initial_cash: f64) {
    let heading = Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD);
    let body = Style::default().fg(TEXT);

    let mut lines = vec![
        Line::from(Span::styled(TITLE, heading)),
        Line::from(""),
        Line::from(Span::styled("Welcome to the FX trading simulator!", body)),
        Line::from(""),
        Line::from(Span::styled("Background", heading)),
        Line::from(Span::styled("You are a new trader on the currency markets", body)),
        Line::from(Span::styled(
            format!("with ${initial_cash:.2} of starting capital."),
            body,
        )),
        Line::from(Span::styled("Buy and sell currencies, ride the swings,", body)),
        Line::from(Span::styled("and grow your wealth!", body)),
        Line::from(""),
        Line::from(Span::styled("How to play", heading)),
    ];
    for step in [
        "1. Pick a currency from the market list (click, arrows or 1-6)",
        "2. Press Buy or Sell (b / s)",
        "3. Enter the amount in the trade panel and confirm with Enter",
        "4. Press Next Day (n) to move the market",
        "5. Watch the news and the rate chart",
        "6. Manage your portfolio to maximise its value",
    ] {
        lines.push(Line::from(Span::styled(step, body)));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled("Tips", heading)),
        Line::from(Span::styled("- Rates drift with momentum from day to day", body)),
        Line::from(Span::styled("- Random market news can jolt rates", body)),
        Line::from(Span::styled("- Keep an eye on the daily change column", body)),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start...",
            Style::default().fg(NEWS).add_modifier(Modifier::SLOW_BLINK),
        )),
    ]);

    let intro = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel(TITLE));
    frame.render_widget(intro, area);
}

// ─── Trading Screen ───────────────────────────────────────────────────────────

fn draw_trading(frame: &mut Frame, state: &GameState, layout: &ScreenLayout) {
    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, layout.title);

    draw_header(frame, state, layout.header);
    draw_market(frame, state, layout);
    draw_portfolio(frame, state, layout.portfolio);
    draw_chart(frame, state, layout.chart);
    draw_news(frame, state, layout.news);
    draw_transactions(frame, state, layout.transactions);

    draw_button(frame, layout.next_day_button, "Next Day");
    draw_button(frame, layout.buy_button, "Buy");
    draw_button(frame, layout.sell_button, "Sell");

    let hint = Paragraph::new(Span::styled(HINT, Style::default().fg(Color::Gray)))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout.hint);

    if let Some(open) = state.dialog.state() {
        draw_dialog(frame, state, open, &layout.dialog);
    }
}

fn draw_header(frame: &mut Frame, state: &GameState, area: Rect) {
    let wallet = &state.wallet;
    let line = Line::from(vec![
        Span::styled(format!("Day {}", state.day), Style::default().fg(TEXT)),
        Span::raw("    "),
        Span::styled(format!("Cash: ${:.2}", wallet.cash()), Style::default().fg(TEXT)),
        Span::raw("    "),
        Span::styled(
            format!("Total: ${:.2}", wallet.total_value()),
            Style::default().fg(TEXT),
        ),
        Span::raw("    "),
        Span::styled(
            format!("P&L: ${:.2} ({:.2}%)", wallet.profit(), wallet.profit_pct()),
            Style::default().fg(pnl_color(wallet.profit())),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(Block::bordered()), area);
}

fn draw_market(frame: &mut Frame, state: &GameState, layout: &ScreenLayout) {
    frame.render_widget(panel("Currency Market"), layout.market);

    for (idx, (currency, row)) in state
        .market
        .currencies()
        .iter()
        .zip(&layout.currency_rows)
        .enumerate()
    {
        if row.height == 0 {
            continue;
        }
        let selected = state.selected == Some(idx);
        let base = if selected {
            Style::default().bg(SELECTED_BG).fg(TEXT)
        } else {
            Style::default().fg(TEXT)
        };
        let marker = if selected { "▶ " } else { "  " };

        let change = match currency.daily_change_pct() {
            Some(pct) => Span::styled(format!("{pct:+.2}%"), base.fg(pnl_color(pct))),
            None => Span::styled("   --", base),
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(marker, base.fg(HIGHLIGHT)),
                Span::styled(
                    format!("{:<5}", currency.code),
                    base.add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("1 {} = ${:.4}  ", currency.code, currency.rate), base),
                change,
            ]),
            Line::from(Span::styled(format!("  {}", currency.name), base.fg(Color::Gray))),
        ];
        frame.render_widget(Paragraph::new(lines).style(base), *row);
    }
}

fn draw_portfolio(frame: &mut Frame, state: &GameState, area: Rect) {
    let holdings = state.wallet.holdings();
    let lines: Vec<Line> = if holdings.is_empty() {
        vec![Line::from("No holdings")]
    } else {
        holdings
            .iter()
            .map(|(code, amount)| {
                let value = state
                    .market
                    .rate_of(code)
                    .map(|rate| amount * rate)
                    .unwrap_or(0.0);
                Line::from(format!("{code}: {amount:.2} (${value:.2})"))
            })
            .collect()
    };
    let portfolio = Paragraph::new(lines)
        .style(Style::default().fg(TEXT))
        .block(panel("Portfolio"));
    frame.render_widget(portfolio, area);
}

fn draw_chart(frame: &mut Frame, state: &GameState, area: Rect) {
    let currencies = state.market.currencies();
    let shown: Vec<(usize, &Currency, String)> = match state.selected_currency() {
        Some(c) => vec![(state.selected.unwrap_or(0), c, format!("{}/USD", c.code))],
        None => currencies
            .iter()
            .take(3)
            .enumerate()
            .map(|(i, c)| (i, c, c.code.clone()))
            .collect(),
    };

    let series: Vec<Vec<(f64, f64)>> = shown
        .iter()
        .map(|(_, c, _)| {
            c.recent_history(CHART_POINTS)
                .into_iter()
                .enumerate()
                .map(|(x, y)| (x as f64, y))
                .collect()
        })
        .collect();

    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut max_x: f64 = 1.0;
    for points in &series {
        for &(x, y) in points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
            max_x = max_x.max(x);
        }
    }
    if !min_y.is_finite() || !max_y.is_finite() {
        (min_y, max_y) = (0.0, 1.0);
    }
    let padding = if (max_y - min_y).abs() < f64::EPSILON {
        (max_y.abs() * 0.05).max(0.01)
    } else {
        (max_y - min_y) * 0.05
    };
    let y_bounds = [min_y - padding, max_y + padding];

    let datasets: Vec<Dataset> = shown
        .iter()
        .zip(&series)
        .map(|((idx, _, label), points)| {
            Dataset::default()
                .name(label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(*idx)))
                .data(points)
        })
        .collect();

    let y_labels = vec![
        Span::raw(format!("{:.4}", y_bounds[0])),
        Span::raw(format!("{:.4}", (y_bounds[0] + y_bounds[1]) / 2.0)),
        Span::raw(format!("{:.4}", y_bounds[1])),
    ];

    let chart = Chart::new(datasets)
        .block(panel("Rate Trend"))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(y_labels)
                .bounds(y_bounds),
        );
    frame.render_widget(chart, area);
}

fn draw_news(frame: &mut Frame, state: &GameState, area: Rect) {
    let style = match state.news.current() {
        Some(_) => Style::default().fg(NEWS).add_modifier(Modifier::BOLD),
        None => Style::default().fg(TEXT),
    };
    let news = Paragraph::new(Span::styled(state.news.display_text(), style))
        .block(panel("Market News"));
    frame.render_widget(news, area);
}

fn draw_transactions(frame: &mut Frame, state: &GameState, area: Rect) {
    let recent = state.wallet.recent_transactions(RECENT_TRADES);
    let lines: Vec<Line> = if recent.is_empty() {
        vec![Line::from("No trades yet")]
    } else {
        recent.iter().map(|t| Line::from(t.to_string())).collect()
    };
    let trades = Paragraph::new(lines)
        .style(Style::default().fg(TEXT))
        .block(panel("Recent Trades"));
    frame.render_widget(trades, area);
}

fn draw_button(frame: &mut Frame, area: Rect, label: &str) {
    let button = Paragraph::new(Span::styled(
        label,
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(Block::bordered().border_style(Style::default().fg(HIGHLIGHT)));
    frame.render_widget(button, area);
}

// ─── Trade Dialog ─────────────────────────────────────────────────────────────

fn draw_dialog(frame: &mut Frame, state: &GameState, open: &OpenDialog, layout: &DialogLayout) {
    frame.render_widget(Clear, layout.popup);
    frame.render_widget(panel(open.mode.title()), layout.popup);

    if let Some(currency) = state.market.find(&open.code) {
        let info = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{} ({})", currency.name, currency.code),
                Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "Rate: 1 {} = ${:.4}   Held: {:.2}",
                    currency.code,
                    currency.rate,
                    state.wallet.holding(&currency.code)
                ),
                Style::default().fg(TEXT),
            )),
        ]);
        frame.render_widget(info, layout.info);
    }

    let label = Paragraph::new("\nAmount:").style(Style::default().fg(TEXT));
    frame.render_widget(label, layout.amount_label);

    let border = if open.input_focused { HIGHLIGHT } else { Color::Gray };
    let cursor = if open.cursor_visible() { "▏" } else { " " };
    let field = Paragraph::new(Line::from(vec![
        Span::styled(open.input.as_str(), Style::default().fg(TEXT)),
        Span::styled(cursor, Style::default().fg(TEXT)),
    ]))
    .block(Block::bordered().border_style(Style::default().fg(border)));
    frame.render_widget(field, layout.amount_field);

    let hint = Paragraph::new("Type an amount, Enter to confirm, Esc to cancel")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout.hint);

    if let Some(message) = &open.message {
        let color = match message {
            DialogMessage::Success(_) => PROFIT,
            DialogMessage::Error(_) => LOSS,
        };
        let msg = Paragraph::new(Span::styled(
            message.text(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(msg, layout.message);
    }

    draw_button(frame, layout.confirm_button, "Confirm");
    draw_button(frame, layout.cancel_button, "Cancel");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::config::Config;
    use crate::models::TradeMode;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(state: &GameState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let layout = ScreenLayout::compute(Rect::new(0, 0, 120, 40), state.market.len());
        terminal.draw(|frame| draw(frame, state, &layout)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(120)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn make_state() -> GameState {
        GameState::new(&Config { seed: Some(8), skip_intro: true, ..Config::default() })
    }

    #[test]
    fn test_intro_screen() {
        let state = GameState::new(&Config { seed: Some(8), ..Config::default() });
        let screen = render_to_string(&state);
        assert!(screen.contains("Press any key to start"));
        assert!(screen.contains("with $10000.00 of starting capital."));
    }

    #[test]
    fn test_intro_shows_configured_cash() {
        let state = GameState::new(&Config {
            seed: Some(8),
            initial_cash: 2_500.0,
            ..Config::default()
        });
        let screen = render_to_string(&state);
        assert!(screen.contains("with $2500.00 of starting capital."));
    }

    #[test]
    fn test_trading_screen_panels() {
        let state = make_state();
        let screen = render_to_string(&state);
        for text in ["Day 1", "Currency Market", "EUR", "No holdings", "No trades yet", CALM] {
            assert!(screen.contains(text), "missing {text:?}");
        }
    }

    const CALM: &str = crate::engine::market_events::CALM_MARKET;

    #[test]
    fn test_dialog_and_trade_log_render() {
        let mut state = make_state();
        state.dispatch(Command::Select(1));
        state.dispatch(Command::OpenTrade(TradeMode::Buy));
        state.dispatch(Command::ConfirmTrade);

        let screen = render_to_string(&state);
        assert!(screen.contains("Buy Currency"));
        assert!(screen.contains("Bought 100.00 EUR"));
        assert!(screen.contains("BUY 100.00 EUR @ 1.0800"));
        assert!(screen.contains("EUR: 100.00"));
    }
}
