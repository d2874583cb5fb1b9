//! Settings command module
//!
//! Handles application settings persistence.

use crate::api::state::AppState;
use crate::shared::error::AppResult;
use crate::shared::settings::AppSettings;

/// Get current application settings
pub async fn get_settings_command(state: &AppState) -> AppResult<AppSettings> {
    Ok(state.settings().clone())
}

/// Save application settings to disk and apply them to the live state
pub async fn save_settings_command(state: &AppState, settings: AppSettings) -> AppResult<()> {
    settings.validate()?;
    settings.save_to(state.settings_path()).await?;

    state.transcripts().set_max_items(settings.transcripts.max_items)?;
    {
        let mut palette = state.palette();
        if palette.colors().len() != settings.palette.size {
            palette.resize(settings.palette.size);
        }
    }

    *state.settings() = settings;
    log::info!("[Settings] Settings updated");
    Ok(())
}
