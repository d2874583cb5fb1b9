use async_trait::async_trait;

use super::{FeatureAsync, FeatureSync};
use crate::shared::error::{AppError, AppResult, ERR_UNSUPPORTED_ACTION};
use crate::shared::types::{ActionType, CommandItem, ExecuteActionResponse};

/// Voice recorder widget. Capture and recognition live in the presentation
/// layer; this side only keeps the transcript history (`core::transcripts`).
#[derive(Clone)]
pub struct RecorderFeature;

impl FeatureSync for RecorderFeature {
    fn id(&self) -> &'static str {
        "recorder"
    }

    fn widget_commands(&self) -> Vec<CommandItem> {
        vec![CommandItem {
            id: "widget_recorder".to_string(),
            label: "Voice Recorder".to_string(),
            description: Some("Record speech and keep transcripts".to_string()),
            action_type: None,
            widget_type: Some("recorder".to_string()),
        }]
    }

    fn action_commands(&self) -> Vec<CommandItem> {
        Vec::new()
    }
}

#[async_trait]
impl FeatureAsync for RecorderFeature {
    async fn execute_action(
        &self,
        _action_type: &ActionType,
        _params: &serde_json::Value,
    ) -> AppResult<ExecuteActionResponse> {
        Err(AppError::Unknown(ERR_UNSUPPORTED_ACTION.to_string()))
    }
}
