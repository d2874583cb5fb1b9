use crate::core::features::{execute_feature_action, get_all_command_items};
use crate::shared::error::AppResult;
use crate::shared::types::{CommandItem, ExecuteActionRequest, ExecuteActionResponse};

/// Every widget and action command, for the command palette
pub async fn get_command_index() -> AppResult<Vec<CommandItem>> {
    Ok(get_all_command_items().to_vec())
}

pub async fn execute_action_command(request: ExecuteActionRequest) -> AppResult<ExecuteActionResponse> {
    log::debug!("[Actions] Executing {:?}", request.action_type);
    execute_feature_action(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::ActionType;
    use serde_json::json;

    #[tokio::test]
    async fn test_index_lists_all_widgets() {
        let index = get_command_index().await.unwrap();
        let widgets: Vec<_> = index.iter().filter_map(|c| c.widget_type.as_deref()).collect();
        assert_eq!(widgets, vec!["password_generator", "color_palette", "unit_converter", "recorder"]);
    }

    #[tokio::test]
    async fn test_execute_from_json_request() {
        let request: ExecuteActionRequest = serde_json::from_value(json!({
            "action_type": { "type": "ConvertUnit", "payload": { "target": "pounds" } },
            "params": { "text": "1 kg" }
        }))
        .unwrap();
        let response = execute_action_command(request).await.unwrap();
        assert_eq!(response.result, "2.2046 pounds");
    }

    #[tokio::test]
    async fn test_execute_password_action_without_payload() {
        let request: ExecuteActionRequest = serde_json::from_value(json!({
            "action_type": { "type": "GeneratePassword" },
            "params": null
        }))
        .unwrap();
        let response = execute_action_command(request).await.unwrap();
        assert_eq!(response.result.len(), 16);
    }
}
