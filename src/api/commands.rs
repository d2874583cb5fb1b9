//! Command modules
//!
//! Organized per tool (no mod.rs pattern). Every command is async and
//! returns `AppResult` so the host can forward it over IPC unchanged.
//!
//! - `converter`: unit conversion engine and converter view state
//! - `password`: password generation
//! - `colors`: color palette
//! - `transcripts`: transcript history
//! - `actions`: feature registry listing and action dispatch
//! - `settings`: settings persistence

pub mod actions;
pub mod colors;
pub mod converter;
pub mod password;
pub mod settings;
pub mod transcripts;
