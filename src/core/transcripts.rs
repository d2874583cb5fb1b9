//! Transcript history
//!
//! Saved voice-recorder transcripts, newest first.
//!
//! - `history`: the state container handed to the command layer
//! - `storage`: persistence seam (redb on disk, in-memory fallback)

pub mod history;
pub mod storage;

pub use history::{TranscriptHistory, DEFAULT_MAX_ITEMS};
pub use storage::{InMemoryStorage, RedbStorage, Storage};
