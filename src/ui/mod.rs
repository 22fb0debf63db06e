//! Terminal front end: geometry, input mapping, rendering and the frame loop.

pub mod app;
pub mod input;
pub mod layout;
pub mod render;
pub mod terminal;
