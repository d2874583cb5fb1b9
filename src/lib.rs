//! Engine behind the multi-tool app: unit converter, password generator,
//! color palette and voice-recorder transcript history.
//!
//! The presentation layer (rendering, clipboard, microphone, speech
//! recognition) lives outside this crate and talks to it through
//! `api::commands`.

pub mod api;
pub mod core;
pub mod shared;

pub use api::AppState;
pub use shared::error::{AppError, AppResult};

use crate::core::transcripts::TranscriptHistory;
use crate::shared::settings::AppSettings;

/// Build the application state from the user's settings and on-disk history.
///
/// Unreadable settings fall back to defaults; an unavailable history
/// database falls back to memory.
pub async fn init() -> AppResult<AppState> {
    let settings_path = AppSettings::get_settings_path()?;
    let settings = AppSettings::load_from(&settings_path)
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to load settings: {}", e);
            AppSettings::default()
        });

    let transcripts = TranscriptHistory::open_default(settings.transcripts.max_items);
    log::info!("✅ Multi-tool state initialized");

    Ok(AppState::new(settings, settings_path, transcripts))
}
