//! Command surface consumed by the presentation layer.
//!
//! - `state`: the state container the commands operate on
//! - `commands`: async command functions, one module per tool

pub mod commands;
pub mod state;

pub use state::AppState;
