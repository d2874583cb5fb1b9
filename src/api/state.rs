use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::core::features::color_palette::{Palette, MAX_PALETTE_SIZE};
use crate::core::features::unit_converter::ConverterController;
use crate::core::transcripts::TranscriptHistory;
use crate::shared::settings::AppSettings;

/// Everything the commands read or mutate.
///
/// Each field has a single writer at a time; the mutexes only make the state
/// shareable with an async host.
pub struct AppState {
    settings: Mutex<AppSettings>,
    settings_path: PathBuf,
    converter: Mutex<ConverterController>,
    palette: Mutex<Palette>,
    transcripts: TranscriptHistory,
}

impl AppState {
    pub fn new(settings: AppSettings, settings_path: PathBuf, transcripts: TranscriptHistory) -> Self {
        let converter = ConverterController::new(settings.converter.default_category);
        let palette = Palette::new(settings.palette.size.clamp(1, MAX_PALETTE_SIZE));
        Self {
            settings: Mutex::new(settings),
            settings_path,
            converter: Mutex::new(converter),
            palette: Mutex::new(palette),
            transcripts,
        }
    }

    pub fn settings(&self) -> MutexGuard<'_, AppSettings> {
        lock_or_recover(&self.settings, "settings")
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn converter(&self) -> MutexGuard<'_, ConverterController> {
        lock_or_recover(&self.converter, "converter")
    }

    pub fn palette(&self) -> MutexGuard<'_, Palette> {
        lock_or_recover(&self.palette, "palette")
    }

    pub fn transcripts(&self) -> &TranscriptHistory {
        &self.transcripts
    }
}

fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("[AppState] {} mutex poisoned, recovering...", name);
            poisoned.into_inner()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::transcripts::DEFAULT_MAX_ITEMS;

    /// State backed by memory and a throwaway settings path
    pub fn state_in(dir: &Path) -> AppState {
        AppState::new(
            AppSettings::default(),
            dir.join("settings.json"),
            TranscriptHistory::in_memory(DEFAULT_MAX_ITEMS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::unit_converter::Category;
    use crate::core::transcripts::DEFAULT_MAX_ITEMS;

    #[test]
    fn test_state_follows_settings() {
        let mut settings = AppSettings::default();
        settings.converter.default_category = Category::Temperature;
        settings.palette.size = 7;

        let state = AppState::new(
            settings,
            PathBuf::from("settings.json"),
            TranscriptHistory::in_memory(DEFAULT_MAX_ITEMS),
        );
        assert_eq!(state.converter().category(), Category::Temperature);
        assert_eq!(state.palette().colors().len(), 7);
    }
}
