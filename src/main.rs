//! # fxsim — Terminal FX Trading Simulator
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐  keys / clicks   ┌─────────────┐  Command   ┌──────────────────────┐
//!  │  Terminal    │ ───────────────▶ │ ui::input   │ ─────────▶ │ GameState::dispatch  │
//!  │  (crossterm) │                  └─────────────┘            │ ├─ RateModel         │
//!  │              │  60 Hz frames                               │ ├─ Wallet            │
//!  │              │ ◀─────────────── ui::render ◀────────────── │ ├─ TradeDialog       │
//!  └──────────────┘                                             │ └─ MarketEventFeed   │
//!                                                               └──────────────────────┘
//! ```
//!
//! ## Environment Variables
//!
//! | Variable             | Default      | Description                        |
//! |----------------------|--------------|------------------------------------|
//! | `FXSIM_SEED`         | entropy      | Seed for reproducible markets      |
//! | `FXSIM_INITIAL_CASH` | `10000`      | Starting cash (USD)                |
//! | `FXSIM_FPS`          | `60`         | Frame cadence                      |
//! | `FXSIM_LOG_FILE`     | unset        | Where tracing output goes          |
//! | `FXSIM_SKIP_INTRO`   | `false`      | Skip the start screen              |
//! | `RUST_LOG`           | `fxsim=info` | Tracing filter                     |

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod command;
mod config;
mod dialog;
mod engine;
mod error;
mod events;
mod models;
mod state;
mod ui;
mod wallet;

use config::Config;

// ─── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional) ──────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Read configuration ────────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;

    // ── 3. Initialise structured logging ─────────────────────────────────────
    // The terminal is the render surface, so logs only go to a file.
    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fxsim=info")))
        .init();

    info!(
        seed = ?config.seed,
        initial_cash = config.initial_cash,
        fps = config.fps,
        "FX simulator starting"
    );

    // ── 4. Run the game until quit / interrupt ───────────────────────────────
    ui::app::run(&config).await?;

    info!("FX simulator stopped");
    Ok(())
}
