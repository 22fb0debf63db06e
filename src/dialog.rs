//! # dialog
//!
//! **Trade Dialog** — modal state machine in front of the wallet.
//!
//! ```text
//!            open(mode, selected)          cancel / Esc
//!  Closed ───────────────────────▶ Open ─────────────────▶ Closed
//!    ▲     (no-op if nothing         │
//!    │      is selected)             │ confirm
//!    │                               ├─ bad amount   → message, stay open
//!    │                               ├─ wallet error → message, stay open
//!    │   180 ticks                   └─ success      → message, countdown
//!    └───────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use crate::engine::RateModel;
use crate::error::TradeError;
use crate::models::{Currency, TradeMode, TradeRecord, TradeRequest};
use crate::wallet::Wallet;

/// Amount pre-filled whenever the dialog opens.
pub const DEFAULT_AMOUNT: &str = "100.0";
pub const MAX_INPUT_LEN: usize = 10;
/// Delay between a successful trade and the dialog closing (≈3 s at 60 Hz).
pub const CLOSE_DELAY_TICKS: u32 = 180;
pub const CURSOR_BLINK_TICKS: u32 = 30;

/// Keyboard input the dialog understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Tab,
}

/// What the caller has to do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogMessage {
    Success(String),
    Error(String),
}

impl DialogMessage {
    pub fn text(&self) -> &str {
        match self {
            DialogMessage::Success(s) | DialogMessage::Error(s) => s,
        }
    }
}

// ─── Amount Input ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct AmountInput {
    text: String,
}

impl Default for AmountInput {
    fn default() -> Self {
        Self { text: DEFAULT_AMOUNT.to_string() }
    }
}

impl AmountInput {
    #[cfg(test)]
    pub fn from_text(text: &str) -> Self {
        Self { text: text.to_string() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Append a digit or the decimal point. Returns `false` when rejected.
    pub fn push(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || c == '.') {
            return false;
        }
        if c == '.' && self.text.contains('.') {
            return false;
        }
        if self.text == "0" && c != '.' {
            self.text.clear();
        }
        if self.text.len() >= MAX_INPUT_LEN {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Remove the last character. An emptied field reads `"0"`.
    pub fn backspace(&mut self) {
        self.text.pop();
        if self.text.is_empty() {
            self.text.push('0');
        }
    }

    /// Clear the field if it still holds the untouched default.
    pub fn clear_default(&mut self) {
        if self.text == DEFAULT_AMOUNT {
            self.text.clear();
        }
    }

    pub fn parse(&self) -> Result<f64, TradeError> {
        match self.text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            _ => Err(TradeError::InvalidAmount),
        }
    }
}

// ─── Open State ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct OpenDialog {
    pub mode: TradeMode,
    pub code: String,
    pub input: AmountInput,
    pub input_focused: bool,
    pub message: Option<DialogMessage>,
    close_countdown: Option<u32>,
    cursor_visible: bool,
    cursor_timer: u32,
}

impl OpenDialog {
    fn new(mode: TradeMode, code: &str) -> Self {
        Self {
            mode,
            code: code.to_string(),
            input: AmountInput::default(),
            input_focused: true,
            message: None,
            close_countdown: None,
            cursor_visible: true,
            cursor_timer: 0,
        }
    }

    /// `true` once a trade succeeded and the dialog is counting down.
    pub fn is_closing(&self) -> bool {
        self.close_countdown.is_some()
    }

    pub fn cursor_visible(&self) -> bool {
        self.input_focused && self.cursor_visible
    }

    pub fn request(&self) -> Result<TradeRequest, TradeError> {
        Ok(TradeRequest {
            mode: self.mode,
            code: self.code.clone(),
            amount: self.input.parse()?,
        })
    }
}

// ─── Dialog ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TradeDialog {
    #[default]
    Closed,
    Open(OpenDialog),
}

impl TradeDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, TradeDialog::Open(_))
    }

    pub fn state(&self) -> Option<&OpenDialog> {
        match self {
            TradeDialog::Open(open) => Some(open),
            TradeDialog::Closed => None,
        }
    }

    fn state_mut(&mut self) -> Option<&mut OpenDialog> {
        match self {
            TradeDialog::Open(open) => Some(open),
            TradeDialog::Closed => None,
        }
    }

    /// Open for `selected`. Does nothing and returns `false` when no currency
    /// is selected.
    pub fn open(&mut self, mode: TradeMode, selected: Option<&Currency>) -> bool {
        match selected {
            Some(currency) => {
                debug!(?mode, code = %currency.code, "trade dialog opened");
                *self = TradeDialog::Open(OpenDialog::new(mode, &currency.code));
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        *self = TradeDialog::Closed;
    }

    /// Focus the amount field (pointer click on it).
    pub fn focus_input(&mut self) {
        if let Some(open) = self.state_mut() {
            open.input_focused = true;
            open.input.clear_default();
        }
    }

    /// Unfocus the amount field (pointer click elsewhere in the dialog).
    pub fn blur_input(&mut self) {
        if let Some(open) = self.state_mut() {
            open.input_focused = false;
        }
    }

    pub fn handle_key(&mut self, key: DialogKey) -> KeyOutcome {
        let Some(open) = self.state_mut() else {
            return KeyOutcome::Handled;
        };
        match key {
            DialogKey::Escape => return KeyOutcome::Cancel,
            DialogKey::Enter => return KeyOutcome::Confirm,
            DialogKey::Tab => open.input_focused = true,
            _ if open.is_closing() || !open.input_focused => {}
            DialogKey::Backspace => open.input.backspace(),
            DialogKey::Char(c) => {
                open.input.push(c);
            }
        }
        KeyOutcome::Handled
    }

    /// Validate the amount and run the trade against `wallet` at the
    /// currency's current rate.
    ///
    /// Returns `None` when there is nothing to confirm (closed, or already
    /// counting down after a success).
    pub fn confirm(
        &mut self,
        wallet: &mut Wallet,
        market: &RateModel,
    ) -> Option<Result<TradeRecord, TradeError>> {
        let open = self.state_mut()?;
        if open.is_closing() {
            return None;
        }

        let Some(rate) = market.rate_of(&open.code) else {
            warn!(code = %open.code, "trade dialog refers to an unknown currency");
            return None;
        };

        let result = open
            .request()
            .and_then(|request| wallet.execute(&request, rate));

        match &result {
            Ok(record) => {
                open.message = Some(DialogMessage::Success(record.summary()));
                open.close_countdown = Some(CLOSE_DELAY_TICKS);
            }
            Err(err) => {
                open.message = Some(DialogMessage::Error(err.to_string()));
            }
        }
        Some(result)
    }

    /// Advance one frame: cursor blink and the post-success countdown.
    pub fn tick(&mut self) {
        let Some(open) = self.state_mut() else {
            return;
        };

        open.cursor_timer += 1;
        if open.cursor_timer >= CURSOR_BLINK_TICKS {
            open.cursor_visible = !open.cursor_visible;
            open.cursor_timer = 0;
        }

        if let Some(remaining) = open.close_countdown {
            if remaining <= 1 {
                self.close();
            } else {
                open.close_countdown = Some(remaining - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_market() -> RateModel {
        RateModel::new(vec![
            Currency::new("EUR", "Euro", 1.5, 0.008),
            Currency::new("GBP", "British Pound", 1.27, 0.01),
        ])
    }

    fn open_dialog(mode: TradeMode, market: &RateModel) -> TradeDialog {
        let mut dialog = TradeDialog::default();
        assert!(dialog.open(mode, market.find("EUR")));
        dialog
    }

    fn set_amount(dialog: &mut TradeDialog, text: &str) {
        if let TradeDialog::Open(open) = dialog {
            open.input = AmountInput::from_text(text);
        }
    }

    #[test]
    fn test_open_requires_selection() {
        let mut dialog = TradeDialog::default();
        assert!(!dialog.open(TradeMode::Buy, None));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_open_resets_fields() {
        let market = make_market();
        let dialog = open_dialog(TradeMode::Sell, &market);
        let open = dialog.state().unwrap();
        assert_eq!(open.input.as_str(), DEFAULT_AMOUNT);
        assert_eq!(open.code, "EUR");
        assert!(open.input_focused);
        assert!(open.message.is_none());
    }

    #[test]
    fn test_amount_input_rules() {
        let mut input = AmountInput::from_text("");
        assert!(input.push('1'));
        assert!(input.push('.'));
        assert!(!input.push('.'));
        assert!(!input.push('x'));
        assert!(input.push('5'));
        assert_eq!(input.as_str(), "1.5");

        let mut input = AmountInput::from_text("0");
        input.push('7');
        assert_eq!(input.as_str(), "7");

        let mut input = AmountInput::from_text("0");
        input.push('.');
        assert_eq!(input.as_str(), "0.");
    }

    #[test]
    fn test_amount_input_caps_length() {
        let mut input = AmountInput::from_text("");
        for _ in 0..15 {
            input.push('9');
        }
        assert_eq!(input.as_str().len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_backspace_to_zero() {
        let mut input = AmountInput::from_text("5");
        input.backspace();
        assert_eq!(input.as_str(), "0");
        input.backspace();
        assert_eq!(input.as_str(), "0");
    }

    #[test]
    fn test_focus_clears_only_untouched_default() {
        let market = make_market();
        let mut dialog = open_dialog(TradeMode::Buy, &market);
        dialog.focus_input();
        assert_eq!(dialog.state().unwrap().input.as_str(), "");

        set_amount(&mut dialog, "42");
        dialog.focus_input();
        assert_eq!(dialog.state().unwrap().input.as_str(), "42");
    }

    #[test]
    fn test_confirm_invalid_amount_keeps_open() {
        let market = make_market();
        let mut wallet = Wallet::new(10_000.0);
        for text in ["", ".", "0"] {
            let mut dialog = open_dialog(TradeMode::Buy, &market);
            set_amount(&mut dialog, text);
            let result = dialog.confirm(&mut wallet, &market).unwrap();
            assert_eq!(result, Err(TradeError::InvalidAmount));
            assert!(dialog.is_open());
            assert_eq!(
                dialog.state().unwrap().message,
                Some(DialogMessage::Error("Invalid amount".into()))
            );
        }
        assert!(wallet.transactions().is_empty());
    }

    #[test]
    fn test_confirm_wallet_error_allows_retry() {
        let market = make_market();
        let mut wallet = Wallet::new(100.0);
        let mut dialog = open_dialog(TradeMode::Buy, &market);
        set_amount(&mut dialog, "1000");

        let result = dialog.confirm(&mut wallet, &market).unwrap();
        assert!(matches!(result, Err(TradeError::InsufficientFunds { .. })));
        assert!(!dialog.state().unwrap().is_closing());

        set_amount(&mut dialog, "10");
        assert!(dialog.confirm(&mut wallet, &market).unwrap().is_ok());
        assert_eq!(wallet.holding("EUR"), 10.0);
    }

    #[test]
    fn test_success_closes_after_delay() {
        let market = make_market();
        let mut wallet = Wallet::new(10_000.0);
        let mut dialog = open_dialog(TradeMode::Buy, &market);

        let record = dialog.confirm(&mut wallet, &market).unwrap().unwrap();
        assert_eq!(record.rate, 1.5);
        assert_eq!(record.amount, 100.0);

        for _ in 0..CLOSE_DELAY_TICKS - 1 {
            dialog.tick();
        }
        assert!(dialog.is_open());
        dialog.tick();
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_confirm_ignored_while_closing() {
        let market = make_market();
        let mut wallet = Wallet::new(10_000.0);
        let mut dialog = open_dialog(TradeMode::Buy, &market);
        dialog.confirm(&mut wallet, &market);
        assert!(dialog.confirm(&mut wallet, &market).is_none());
        assert_eq!(wallet.transactions().len(), 1);
    }

    #[test]
    fn test_keys_drive_outcomes() {
        let market = make_market();
        let mut dialog = open_dialog(TradeMode::Buy, &market);
        dialog.focus_input();
        for c in "12.5".chars() {
            assert_eq!(dialog.handle_key(DialogKey::Char(c)), KeyOutcome::Handled);
        }
        dialog.handle_key(DialogKey::Backspace);
        assert_eq!(dialog.state().unwrap().input.as_str(), "12.");
        assert_eq!(dialog.handle_key(DialogKey::Enter), KeyOutcome::Confirm);
        assert_eq!(dialog.handle_key(DialogKey::Escape), KeyOutcome::Cancel);
    }

    #[test]
    fn test_blurred_input_ignores_typing() {
        let market = make_market();
        let mut dialog = open_dialog(TradeMode::Buy, &market);
        dialog.blur_input();
        dialog.handle_key(DialogKey::Char('9'));
        assert_eq!(dialog.state().unwrap().input.as_str(), DEFAULT_AMOUNT);

        dialog.handle_key(DialogKey::Tab);
        assert!(dialog.state().unwrap().input_focused);
    }

    #[test]
    fn test_cursor_blinks() {
        let market = make_market();
        let mut dialog = open_dialog(TradeMode::Buy, &market);
        assert!(dialog.state().unwrap().cursor_visible());
        for _ in 0..CURSOR_BLINK_TICKS {
            dialog.tick();
        }
        assert!(!dialog.state().unwrap().cursor_visible());
    }
}
