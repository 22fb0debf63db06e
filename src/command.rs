//! # command
//!
//! Every player action, as one tagged enum. Input mapping (keys, clicks)
//! produces [`Command`]s; [`crate::state::GameState::dispatch`] is the only
//! place that acts on them.

use crate::dialog::DialogKey;
use crate::models::TradeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the start screen.
    Start,
    /// Select the currency at this list index.
    Select(usize),
    /// Move the selection by this many rows, wrapping around.
    MoveSelection(isize),
    /// Open the trade dialog for the selected currency.
    OpenTrade(TradeMode),
    /// Advance the simulation by one day.
    NextDay,
    /// Keyboard input routed to the open dialog.
    DialogKey(DialogKey),
    /// Pointer click on the amount field.
    FocusAmount,
    /// Pointer click inside the dialog but outside the amount field.
    BlurAmount,
    ConfirmTrade,
    CancelTrade,
    /// One frame elapsed.
    Tick,
    Quit,
}

/// Whether the loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
