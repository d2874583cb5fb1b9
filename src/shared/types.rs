use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::core::features::unit_converter::Category;

// ============================================================================
// Command palette / feature registry
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommandItem {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub action_type: Option<ActionType>,
    pub widget_type: Option<String>,
}

// Adjacently tagged for frontend compatibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload")]
#[ts(export)]
pub enum ActionType {
    /// Convert a quantity in `params.text` to the target unit id
    ConvertUnit { target: String },
    /// `params` may carry `PasswordOptions`
    GeneratePassword,
    /// `params` may carry `{ "size": n }`
    GeneratePalette,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExecuteActionRequest {
    pub action_type: ActionType,
    #[ts(type = "any")]
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExecuteActionResponse {
    pub result: String,
    #[ts(type = "any")]
    pub metadata: Option<serde_json::Value>,
}

// ============================================================================
// Unit converter
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnitDTO {
    pub id: String,    // e.g. "feet"
    pub label: String, // e.g. "Feet"
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryDTO {
    pub id: Category,
    pub label: String,
    pub units: Vec<UnitDTO>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConvertUnitsRequest {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    /// Raw input; anything that is not a finite number converts to "no result"
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConvertUnitsResponse {
    /// `None` when the input could not be represented as a number
    pub result: Option<f64>,
    pub formatted_result: String,
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParseUnitResponse {
    pub amount: f64,
    pub unit: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConverterSnapshot {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub from_value: String,
    pub to_value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SetUnitsRequest {
    pub from_unit: Option<String>,
    pub to_unit: Option<String>,
}

// ============================================================================
// Password generator
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PasswordOptions {
    #[ts(type = "number")]
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneratedPassword {
    pub password: String,
    pub strength: PasswordStrength,
    pub score: u8,
}

// ============================================================================
// Color palette
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaletteColor {
    /// Lowercase "#rrggbb"
    pub hex: String,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaletteColorDTO {
    pub hex: String,
    pub locked: bool,
    /// "#000000" or "#ffffff", whichever reads better on `hex`
    pub contrast: String,
}

// ============================================================================
// Transcripts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TranscriptItem {
    /// Creation time in epoch millis, also the storage key
    pub id: String,
    pub text: String,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
}

impl TranscriptItem {
    pub fn new(key: u64, text: String, date: DateTime<Utc>) -> Self {
        Self {
            id: key.to_string(),
            text,
            date,
        }
    }
}
