//! # config — runtime settings from environment variables
//!
//! | Variable             | Default   | Description                          |
//! |----------------------|-----------|--------------------------------------|
//! | `FXSIM_SEED`         | entropy   | Seed for the simulation RNG          |
//! | `FXSIM_INITIAL_CASH` | `10000`   | Starting cash in USD                 |
//! | `FXSIM_FPS`          | `60`      | Frame cadence (1–240)                |
//! | `FXSIM_LOG_FILE`     | unset     | Append logs to this file             |
//! | `FXSIM_SKIP_INTRO`   | `false`   | Skip the start screen                |

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};

pub const DEFAULT_INITIAL_CASH: f64 = 10_000.0;
pub const DEFAULT_FPS: u32 = 60;
const MAX_FPS: u32 = 240;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` = seed from OS entropy (every run differs).
    pub seed: Option<u64>,
    pub initial_cash: f64,
    pub fps: u32,
    /// Logs are discarded unless this is set; the terminal belongs to the UI.
    pub log_file: Option<PathBuf>,
    pub skip_intro: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            initial_cash: DEFAULT_INITIAL_CASH,
            fps: DEFAULT_FPS,
            log_file: None,
            skip_intro: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key → value lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let seed = get("FXSIM_SEED")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("FXSIM_SEED must be an unsigned integer")?;

        let initial_cash = match get("FXSIM_INITIAL_CASH") {
            Some(v) => {
                let cash: f64 = v
                    .trim()
                    .parse()
                    .context("FXSIM_INITIAL_CASH must be a number")?;
                if !cash.is_finite() || cash <= 0.0 {
                    bail!("FXSIM_INITIAL_CASH must be positive, got {cash}");
                }
                cash
            }
            None => defaults.initial_cash,
        };

        let fps = match get("FXSIM_FPS") {
            Some(v) => {
                let fps: u32 = v.trim().parse().context("FXSIM_FPS must be a number")?;
                if !(1..=MAX_FPS).contains(&fps) {
                    bail!("FXSIM_FPS must be between 1 and {MAX_FPS}, got {fps}");
                }
                fps
            }
            None => defaults.fps,
        };

        let skip_intro = get("FXSIM_SKIP_INTRO")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.skip_intro);

        Ok(Self {
            seed,
            initial_cash,
            fps,
            log_file: get("FXSIM_LOG_FILE").filter(|v| !v.is_empty()).map(PathBuf::from),
            skip_intro,
        })
    }

    /// Interval between two frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps))
    }
}
