use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tokio::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;

use crate::core::features::color_palette::{self, DEFAULT_PALETTE_SIZE};
use crate::core::features::unit_converter::Category;
use crate::core::transcripts::DEFAULT_MAX_ITEMS;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::PasswordOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct AppSettings {
    pub converter: ConverterSettings,
    pub password: PasswordOptions,
    pub palette: PaletteSettings,
    pub transcripts: TranscriptSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ConverterSettings {
    pub default_category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PaletteSettings {
    #[ts(type = "number")]
    pub size: usize,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self { size: DEFAULT_PALETTE_SIZE }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct TranscriptSettings {
    #[ts(type = "number")]
    pub max_items: usize,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self { max_items: DEFAULT_MAX_ITEMS }
    }
}

impl AppSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "multitools", "multi-tools")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Io("Failed to determine config directory".to_string()))
    }

    pub async fn load() -> AppResult<Self> {
        Self::load_from(&Self::get_settings_path()?).await
    }

    /// Load settings from `path`, writing defaults there if it does not exist
    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !fs::try_exists(path).await? {
            log::info!("[Settings] No settings at {}, writing defaults", path.display());
            let settings = Self::default();
            settings.save_to(path).await?;
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Validation(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the app state cannot be built from
    pub fn validate(&self) -> AppResult<()> {
        color_palette::validate_size(self.palette.size as u64)?;
        Ok(())
    }

    pub async fn save(&self) -> AppResult<()> {
        self.save_to(&Self::get_settings_path()?).await
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        log::debug!("[Settings] Saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = AppSettings::load_from(&path).await.unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_oversized_palette_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "palette": { "size": 10000000000 } }"#).await.unwrap();

        let err = AppSettings::load_from(&path).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.converter.default_category = Category::Temperature;
        settings.password.length = 24;
        settings.password.symbols = false;
        settings.save_to(&path).await.unwrap();

        assert_eq!(AppSettings::load_from(&path).await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{ "converter": { "default_category": "weight" } }"#)
            .await
            .unwrap();

        let settings = AppSettings::load_from(&path).await.unwrap();
        assert_eq!(settings.converter.default_category, Category::Weight);
        assert_eq!(settings.password, PasswordOptions::default());
        assert_eq!(settings.palette.size, DEFAULT_PALETTE_SIZE);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        assert!(matches!(AppSettings::load_from(&path).await, Err(AppError::Validation(_))));
    }
}
