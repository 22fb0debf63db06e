//! # ui::app
//!
//! The frame loop. Single-threaded: one current-thread runtime multiplexes
//!
//! ```text
//!   Ctrl+C (SIGINT) ──────────┐
//!   frame interval (60 Hz) ───┼──▶ select! ──▶ GameState::dispatch ──▶ draw
//!   terminal events ──────────┘
//! ```
//!
//! and nothing is ever spawned.

use anyhow::Context;
use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::command::{Command, Flow};
use crate::config::Config;
use crate::state::GameState;
use crate::ui::input::map_event;
use crate::ui::layout::ScreenLayout;
use crate::ui::render;
use crate::ui::terminal::{cleanup_terminal, init_terminal, TuiTerminal};

/// Take over the terminal, run until quit or interrupt, then restore it.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let mut terminal = init_terminal().context("Failed to initialise terminal")?;
    let result = event_loop(&mut terminal, config).await;
    if let Err(e) = cleanup_terminal(&mut terminal) {
        error!(error = %e, "terminal restore failed");
    }
    result
}

async fn event_loop(terminal: &mut TuiTerminal, config: &Config) -> anyhow::Result<()> {
    let mut state = GameState::new(config);
    let mut layout = ScreenLayout::default();
    let mut events = EventStream::new();

    let mut frames = tokio::time::interval(config.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    info!(fps = config.fps, "frame loop started");

    loop {
        tokio::select! {
            biased;

            _ = &mut interrupt => {
                info!("interrupt received — shutting down");
                break;
            }

            _ = frames.tick() => {
                state.dispatch(Command::Tick);
                terminal.draw(|frame| {
                    layout = ScreenLayout::compute(frame.area(), state.market.len());
                    render::draw(frame, &state, &layout);
                })?;
            }

            maybe_event = events.next() => {
                let event = match maybe_event {
                    Some(event) => event.context("Terminal event stream failed")?,
                    None => break,
                };
                if let Some(command) = map_event(&event, &state, &layout) {
                    if state.dispatch(command) == Flow::Quit {
                        info!(day = state.day, "quit requested");
                        break;
                    }
                }
            }
        }
    }

    info!(
        day = state.day,
        total_value = state.wallet.total_value(),
        profit = state.wallet.profit(),
        trades = state.wallet.transactions().len(),
        "session finished"
    );
    Ok(())
}
