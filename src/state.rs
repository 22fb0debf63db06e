//! # state
//!
//! [`GameState`] — the single context the loop owns and passes by `&mut` to
//! dispatch, tick and render. Nothing is global and nothing is shared across
//! threads, so no locking is involved.

use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{debug, info};

use crate::command::{Command, Flow};
use crate::config::Config;
use crate::dialog::{KeyOutcome, TradeDialog};
use crate::engine::{MarketEventFeed, RateModel};
use crate::events::GameEvent;
use crate::models::{default_roster, Currency, TradeMode};
use crate::wallet::Wallet;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Trading,
}

// ─── GameState ────────────────────────────────────────────────────────────────

pub struct GameState {
    pub phase: Phase,
    pub market: RateModel,
    pub wallet: Wallet,
    pub dialog: TradeDialog,
    pub news: MarketEventFeed,
    /// Current day, starting at 1.
    pub day: u32,
    /// Index into `market.currencies()`.
    pub selected: Option<usize>,
    rng: Pcg64,
}

impl GameState {
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };

        let state = Self {
            phase: if config.skip_intro { Phase::Trading } else { Phase::Intro },
            market: RateModel::new(default_roster()),
            wallet: Wallet::new(config.initial_cash),
            dialog: TradeDialog::default(),
            news: MarketEventFeed::new(),
            day: 1,
            selected: None,
            rng,
        };

        state.journal(&GameEvent::SessionStarted {
            seed: config.seed,
            initial_cash: config.initial_cash,
        });
        state
    }

    pub fn selected_currency(&self) -> Option<&Currency> {
        self.selected.and_then(|idx| self.market.get(idx))
    }

    /// Write a game event to the journal target.
    fn journal(&self, event: &GameEvent) {
        info!(target: "fxsim::journal", "{}", event.to_json());
    }

    // ─── Day Advance ──────────────────────────────────────────────────────────

    /// Rates → revalue → news and shocks → day counter, in that order.
    pub fn advance_day(&mut self) {
        self.market.advance(&mut self.rng);
        self.wallet.revalue(self.market.currencies());
        let roll = self.news.roll(&mut self.rng, self.market.currencies_mut());
        self.day += 1;

        if let Some(headline) = roll.headline {
            self.journal(&GameEvent::NewsPublished {
                day: self.day,
                headline: headline.to_string(),
            });
        }
        self.journal(&GameEvent::DayAdvanced {
            day: self.day,
            rates: self
                .market
                .currencies()
                .iter()
                .map(|c| (c.code.clone(), c.rate))
                .collect(),
            shocks: roll.shocks,
            total_value: self.wallet.total_value(),
            profit: self.wallet.profit(),
        });
    }

    // ─── Dispatcher ───────────────────────────────────────────────────────────

    pub fn dispatch(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Tick => self.tick(),
            Command::Start => self.phase = Phase::Trading,
            _ if self.phase == Phase::Intro => {}
            Command::Select(idx) => {
                if idx < self.market.len() {
                    self.selected = Some(idx);
                }
            }
            Command::MoveSelection(delta) => self.move_selection(delta),
            Command::OpenTrade(mode) => self.open_trade(mode),
            Command::NextDay => {
                if !self.dialog.is_open() {
                    self.advance_day();
                }
            }
            Command::DialogKey(key) => match self.dialog.handle_key(key) {
                KeyOutcome::Confirm => self.confirm_trade(),
                KeyOutcome::Cancel => self.dialog.close(),
                KeyOutcome::Handled => {}
            },
            Command::FocusAmount => self.dialog.focus_input(),
            Command::BlurAmount => self.dialog.blur_input(),
            Command::ConfirmTrade => self.confirm_trade(),
            Command::CancelTrade => self.dialog.close(),
        }
        Flow::Continue
    }

    /// One frame: dialog timers and the news display countdown.
    pub fn tick(&mut self) {
        self.dialog.tick();
        self.news.tick();
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.market.len() as isize;
        if len == 0 || self.dialog.is_open() {
            return;
        }
        let next = match self.selected {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.selected = Some(next as usize);
    }

    fn open_trade(&mut self, mode: TradeMode) {
        if self.dialog.is_open() {
            return;
        }
        let selected = self.selected.and_then(|idx| self.market.get(idx));
        if !self.dialog.open(mode, selected) {
            debug!(?mode, "trade requested with no currency selected");
        }
    }

    fn confirm_trade(&mut self) {
        let Some(result) = self.dialog.confirm(&mut self.wallet, &self.market) else {
            return;
        };
        match result {
            Ok(record) => {
                self.wallet.revalue(self.market.currencies());
                self.journal(&GameEvent::TradeExecuted { record: Box::new(record) });
            }
            Err(err) => {
                if let Some(open) = self.dialog.state() {
                    self.journal(&GameEvent::TradeRejected {
                        mode: open.mode,
                        code: open.code.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}
