//! Terminal events → [`Command`]s.
//!
//! | Screen  | Keys                                                         |
//! |---------|--------------------------------------------------------------|
//! | Intro   | any key / click starts                                       |
//! | Market  | `↑`/`↓`/`k`/`j`/Tab select · `1`–`9` pick · `b` buy · `s` sell · `n`/Space next day · `q` quit |
//! | Dialog  | digits, `.`, Backspace, Enter confirm, Esc cancel, Tab focus |
//!
//! Ctrl+C quits from anywhere (raw mode delivers it as a key, not a signal).

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::command::Command;
use crate::dialog::DialogKey;
use crate::models::TradeMode;
use crate::state::{GameState, Phase};
use crate::ui::layout::{hit, ScreenLayout};

pub fn map_event(event: &Event, state: &GameState, layout: &ScreenLayout) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key, state),
        Event::Mouse(mouse) => map_mouse(mouse, state, layout),
        _ => None,
    }
}

fn map_key(key: &KeyEvent, state: &GameState) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    if state.phase == Phase::Intro {
        return Some(Command::Start);
    }
    if state.dialog.is_open() {
        return map_dialog_key(key.code);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => Some(Command::MoveSelection(-1)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Some(Command::MoveSelection(1)),
        KeyCode::Char(c @ '1'..='9') => Some(Command::Select(c as usize - '1' as usize)),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::OpenTrade(TradeMode::Buy)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::OpenTrade(TradeMode::Sell)),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char(' ') => Some(Command::NextDay),
        _ => None,
    }
}

fn map_dialog_key(code: KeyCode) -> Option<Command> {
    let key = match code {
        KeyCode::Esc => DialogKey::Escape,
        KeyCode::Enter => DialogKey::Enter,
        KeyCode::Tab => DialogKey::Tab,
        KeyCode::Backspace => DialogKey::Backspace,
        KeyCode::Char(c) => DialogKey::Char(c),
        _ => return None,
    };
    Some(Command::DialogKey(key))
}

fn map_mouse(mouse: &MouseEvent, state: &GameState, layout: &ScreenLayout) -> Option<Command> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let (col, row) = (mouse.column, mouse.row);

    if state.phase == Phase::Intro {
        return Some(Command::Start);
    }

    if state.dialog.is_open() {
        let dialog = &layout.dialog;
        return Some(if hit(dialog.confirm_button, col, row) {
            Command::ConfirmTrade
        } else if hit(dialog.cancel_button, col, row) {
            Command::CancelTrade
        } else if hit(dialog.amount_field, col, row) {
            Command::FocusAmount
        } else {
            Command::BlurAmount
        });
    }

    if let Some(idx) = layout.currency_rows.iter().position(|r| hit(*r, col, row)) {
        return Some(Command::Select(idx));
    }
    if hit(layout.buy_button, col, row) {
        return Some(Command::OpenTrade(TradeMode::Buy));
    }
    if hit(layout.sell_button, col, row) {
        return Some(Command::OpenTrade(TradeMode::Sell));
    }
    if hit(layout.next_day_button, col, row) {
        return Some(Command::NextDay);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn make_state() -> GameState {
        GameState::new(&Config { seed: Some(1), skip_intro: true, ..Config::default() })
    }

    fn make_layout() -> ScreenLayout {
        ScreenLayout::compute(Rect::new(0, 0, 120, 40), 6)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(rect: Rect) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_market_keys() {
        let state = make_state();
        let layout = make_layout();
        let map = |code| map_event(&press(code), &state, &layout);

        assert_eq!(map(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(map(KeyCode::Char('3')), Some(Command::Select(2)));
        assert_eq!(map(KeyCode::Char('b')), Some(Command::OpenTrade(TradeMode::Buy)));
        assert_eq!(map(KeyCode::Char('s')), Some(Command::OpenTrade(TradeMode::Sell)));
        assert_eq!(map(KeyCode::Char(' ')), Some(Command::NextDay));
        assert_eq!(map(KeyCode::Down), Some(Command::MoveSelection(1)));
        assert_eq!(map(KeyCode::F(1)), None);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut state = make_state();
        state.dispatch(Command::Select(0));
        state.dispatch(Command::OpenTrade(TradeMode::Buy));
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&event, &state, &make_layout()), Some(Command::Quit));
    }

    #[test]
    fn test_dialog_captures_keys() {
        let mut state = make_state();
        state.dispatch(Command::Select(0));
        state.dispatch(Command::OpenTrade(TradeMode::Buy));
        let layout = make_layout();

        assert_eq!(
            map_event(&press(KeyCode::Char('q')), &state, &layout),
            Some(Command::DialogKey(DialogKey::Char('q')))
        );
        assert_eq!(
            map_event(&press(KeyCode::Esc), &state, &layout),
            Some(Command::DialogKey(DialogKey::Escape))
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let state = make_state();
        let event = Event::Key(KeyEvent {
            code: KeyCode::Char('n'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(&event, &state, &make_layout()), None);
    }

    #[test]
    fn test_clicks_on_market_screen() {
        let state = make_state();
        let layout = make_layout();
        assert_eq!(
            map_event(&click(layout.currency_rows[4]), &state, &layout),
            Some(Command::Select(4))
        );
        assert_eq!(
            map_event(&click(layout.next_day_button), &state, &layout),
            Some(Command::NextDay)
        );
        assert_eq!(
            map_event(&click(layout.sell_button), &state, &layout),
            Some(Command::OpenTrade(TradeMode::Sell))
        );
    }

    #[test]
    fn test_clicks_in_dialog() {
        let mut state = make_state();
        state.dispatch(Command::Select(0));
        state.dispatch(Command::OpenTrade(TradeMode::Buy));
        let layout = make_layout();
        let d = &layout.dialog;

        assert_eq!(map_event(&click(d.confirm_button), &state, &layout), Some(Command::ConfirmTrade));
        assert_eq!(map_event(&click(d.cancel_button), &state, &layout), Some(Command::CancelTrade));
        assert_eq!(map_event(&click(d.amount_field), &state, &layout), Some(Command::FocusAmount));
        assert_eq!(map_event(&click(layout.title), &state, &layout), Some(Command::BlurAmount));
    }

    #[test]
    fn test_intro_starts_on_any_input() {
        let state = GameState::new(&Config { seed: Some(1), ..Config::default() });
        let layout = make_layout();
        assert_eq!(map_event(&press(KeyCode::Char('x')), &state, &layout), Some(Command::Start));
        assert_eq!(map_event(&click(layout.chart), &state, &layout), Some(Command::Start));
    }
}
