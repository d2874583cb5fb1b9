//! Core logic: the tool features and the transcript history they share
//! state with.

pub mod features;
pub mod transcripts;
