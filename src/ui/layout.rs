//! Screen geometry shared by the renderer and pointer hit-testing.
//!
//! The layout is recomputed on every frame from the terminal size, and the
//! input mapper uses the last computed copy, so clicks always line up with
//! what was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Terminal rows used per currency in the market list.
pub const CURRENCY_ROW_HEIGHT: u16 = 2;
const LEFT_COLUMN_WIDTH: u16 = 40;
const DIALOG_WIDTH: u16 = 52;
const DIALOG_HEIGHT: u16 = 14;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub header: Rect,
    pub market: Rect,
    pub currency_rows: Vec<Rect>,
    pub portfolio: Rect,
    pub chart: Rect,
    pub news: Rect,
    pub transactions: Rect,
    pub buy_button: Rect,
    pub sell_button: Rect,
    pub next_day_button: Rect,
    pub hint: Rect,
    pub dialog: DialogLayout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogLayout {
    pub popup: Rect,
    pub info: Rect,
    pub amount_label: Rect,
    pub amount_field: Rect,
    pub hint: Rect,
    pub message: Rect,
    pub confirm_button: Rect,
    pub cancel_button: Rect,
}

/// `true` when the terminal cell `(column, row)` lies inside `rect`.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

impl ScreenLayout {
    pub fn compute(area: Rect, currency_count: usize) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LEFT_COLUMN_WIDTH), Constraint::Min(20)])
            .split(rows[2]);

        let market_height = currency_count as u16 * CURRENCY_ROW_HEIGHT + 2;
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(market_height), Constraint::Min(3)])
            .split(body[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(5),
            ])
            .split(body[1]);

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(16),
                Constraint::Length(10),
                Constraint::Length(10),
            ])
            .split(rows[3]);

        let market = left[0];
        let inner_x = market.x.saturating_add(1);
        let inner_width = market.width.saturating_sub(2);
        let inner_bottom = market.y.saturating_add(market.height.saturating_sub(1));
        let currency_rows = (0..currency_count)
            .map(|i| {
                let y = market.y + 1 + i as u16 * CURRENCY_ROW_HEIGHT;
                let height = CURRENCY_ROW_HEIGHT.min(inner_bottom.saturating_sub(y));
                Rect::new(inner_x, y.min(inner_bottom), inner_width, height)
            })
            .collect();

        Self {
            title: rows[0],
            header: rows[1],
            market,
            currency_rows,
            portfolio: left[1],
            chart: right[0],
            news: right[1],
            transactions: right[2],
            next_day_button: buttons[1],
            buy_button: buttons[2],
            sell_button: buttons[3],
            hint: rows[4],
            dialog: DialogLayout::compute(area),
        }
    }
}

impl DialogLayout {
    fn compute(area: Rect) -> Self {
        let width = DIALOG_WIDTH.min(area.width);
        let height = DIALOG_HEIGHT.min(area.height);
        let popup = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        let inner = Rect::new(
            popup.x.saturating_add(2),
            popup.y.saturating_add(1),
            popup.width.saturating_sub(4),
            popup.height.saturating_sub(2),
        );
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(inner);

        let amount = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(10), Constraint::Length(16), Constraint::Min(0)])
            .split(rows[2]);

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(35),
                Constraint::Percentage(10),
                Constraint::Percentage(35),
                Constraint::Percentage(10),
            ])
            .split(rows[5]);

        Self {
            popup,
            info: rows[0],
            amount_label: amount[0],
            amount_field: amount[1],
            hint: rows[3],
            message: rows[4],
            confirm_button: buttons[1],
            cancel_button: buttons[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_layout() -> ScreenLayout {
        ScreenLayout::compute(Rect::new(0, 0, 120, 40), 6)
    }

    #[test]
    fn test_hit_bounds() {
        let rect = Rect::new(10, 5, 4, 2);
        assert!(hit(rect, 10, 5));
        assert!(hit(rect, 13, 6));
        assert!(!hit(rect, 14, 6));
        assert!(!hit(rect, 13, 7));
        assert!(!hit(rect, 9, 5));
    }

    #[test]
    fn test_currency_rows_stack_inside_market() {
        let layout = make_layout();
        assert_eq!(layout.currency_rows.len(), 6);
        for (i, row) in layout.currency_rows.iter().enumerate() {
            assert_eq!(row.height, CURRENCY_ROW_HEIGHT);
            assert_eq!(row.y, layout.market.y + 1 + i as u16 * CURRENCY_ROW_HEIGHT);
            assert!(row.x > layout.market.x);
        }
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        let layout = make_layout();
        let b = layout.buy_button;
        let s = layout.sell_button;
        let n = layout.next_day_button;
        assert!(n.x + n.width <= b.x);
        assert!(b.x + b.width <= s.x);
        assert!(b.width > 0 && s.width > 0 && n.width > 0);
    }

    #[test]
    fn test_dialog_centered_with_distinct_controls() {
        let layout = make_layout();
        let d = &layout.dialog;
        assert_eq!(d.popup.width, DIALOG_WIDTH);
        assert_eq!(d.popup.x, (120 - DIALOG_WIDTH) / 2);
        assert!(d.amount_field.width > 0);
        assert!(d.confirm_button.x + d.confirm_button.width <= d.cancel_button.x);
        assert!(hit(d.popup, d.confirm_button.x, d.confirm_button.y));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 10, 5), 6);
        assert_eq!(layout.currency_rows.len(), 6);
    }
}
