//! Feature plugin system with enum dispatch
//!
//! Uses enum_dispatch for static dispatch over the closed set of tools.

use crate::shared::error::{AppError, AppResult, ERR_UNSUPPORTED_ACTION};
use crate::shared::types::{ActionType, CommandItem, ExecuteActionRequest, ExecuteActionResponse};
use std::sync::OnceLock;
use enum_dispatch::enum_dispatch;

pub mod unit_converter;
pub mod password_generator;
pub mod color_palette;
pub mod recorder;

use async_trait::async_trait;

/// Sync methods trait for enum_dispatch
///
/// enum_dispatch works with sync methods only.
/// Async methods are handled separately via async_trait.
#[enum_dispatch]
pub trait FeatureSync: Send + Sync {
    /// Unique identifier for this feature
    fn id(&self) -> &str;

    /// Commands that open the feature's widget
    fn widget_commands(&self) -> Vec<CommandItem>;

    /// Commands that run immediately without opening a widget.
    /// Example: "Convert to Feet" converts the captured text.
    fn action_commands(&self) -> Vec<CommandItem>;
}

/// Async methods trait (separate from enum_dispatch)
#[async_trait]
pub trait FeatureAsync: Send + Sync {
    /// Execute an action for this feature
    ///
    /// A feature that does not handle `action` returns
    /// `AppError::Unknown(ERR_UNSUPPORTED_ACTION)` so the next one is tried.
    async fn execute_action(
        &self,
        action: &ActionType,
        params: &serde_json::Value,
    ) -> AppResult<ExecuteActionResponse>;
}

#[enum_dispatch(FeatureSync)]
pub enum AppFeature {
    UnitConverter(unit_converter::UnitConverterFeature),
    PasswordGenerator(password_generator::PasswordGeneratorFeature),
    ColorPalette(color_palette::ColorPaletteFeature),
    Recorder(recorder::RecorderFeature),
}

impl AppFeature {
    pub fn all() -> Vec<Self> {
        vec![
            AppFeature::PasswordGenerator(password_generator::PasswordGeneratorFeature),
            AppFeature::ColorPalette(color_palette::ColorPaletteFeature),
            AppFeature::UnitConverter(unit_converter::UnitConverterFeature),
            AppFeature::Recorder(recorder::RecorderFeature),
        ]
    }

    async fn execute_action(
        &self,
        action: &ActionType,
        params: &serde_json::Value,
    ) -> AppResult<ExecuteActionResponse> {
        // enum_dispatch doesn't cover async methods
        match self {
            AppFeature::UnitConverter(f) => f.execute_action(action, params).await,
            AppFeature::PasswordGenerator(f) => f.execute_action(action, params).await,
            AppFeature::ColorPalette(f) => f.execute_action(action, params).await,
            AppFeature::Recorder(f) => f.execute_action(action, params).await,
        }
    }
}

static COMMAND_ITEMS: OnceLock<Vec<CommandItem>> = OnceLock::new();

/// Widget and action commands of every feature, built once
pub fn get_all_command_items() -> &'static [CommandItem] {
    COMMAND_ITEMS.get_or_init(|| {
        let features = AppFeature::all();
        let items: Vec<CommandItem> = features
            .iter()
            .flat_map(|feature| {
                let mut commands = feature.widget_commands();
                commands.extend(feature.action_commands());
                commands
            })
            .collect();
        log::debug!("[Features] Cached {} commands from {} features", items.len(), features.len());
        items
    })
}

fn is_unsupported(err: &AppError) -> bool {
    matches!(err, AppError::Unknown(msg) if msg == ERR_UNSUPPORTED_ACTION)
}

/// Execute an action on the first feature that accepts it.
///
/// A feature that accepts the action but fails stops the search.
pub async fn execute_feature_action(request: &ExecuteActionRequest) -> AppResult<ExecuteActionResponse> {
    for feature in AppFeature::all() {
        match feature.execute_action(&request.action_type, &request.params).await {
            Ok(response) => return Ok(response),
            Err(e) if is_unsupported(&e) => continue,
            Err(e) => {
                log::warn!("[Features] {} failed on {:?}: {}", feature.id(), request.action_type, e);
                return Err(e);
            }
        }
    }

    Err(AppError::Feature(format!("No feature handles {:?}", request.action_type)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_command_ids_are_unique() {
        let items = get_all_command_items();
        let ids: HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
        assert!(ids.contains("widget_recorder"));
        assert!(ids.contains("convert_to_feet"));
    }

    #[tokio::test]
    async fn test_dispatches_to_owning_feature() {
        let request = ExecuteActionRequest {
            action_type: ActionType::ConvertUnit { target: "fahrenheit".to_string() },
            params: json!({ "text": "100 c" }),
        };
        let response = execute_feature_action(&request).await.unwrap();
        assert_eq!(response.result, "212 fahrenheit");
    }

    #[tokio::test]
    async fn test_failure_stops_dispatch() {
        let request = ExecuteActionRequest {
            action_type: ActionType::ConvertUnit { target: "feet".to_string() },
            params: json!({}),
        };
        let err = execute_feature_action(&request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
