use crate::api::state::AppState;
use crate::shared::error::AppResult;
use crate::shared::types::TranscriptItem;

pub async fn get_transcripts_command(state: &AppState) -> AppResult<Vec<TranscriptItem>> {
    state.transcripts().items()
}

/// Save a finished transcript. Returns `None` when the text was blank.
pub async fn save_transcript_command(state: &AppState, text: String) -> AppResult<Option<TranscriptItem>> {
    state.transcripts().save(&text)
}

pub async fn update_transcript_command(state: &AppState, item: TranscriptItem) -> AppResult<TranscriptItem> {
    state.transcripts().update(&item)
}

pub async fn delete_transcript_command(state: &AppState, id: String) -> AppResult<bool> {
    state.transcripts().delete(&id)
}

pub async fn clear_transcripts_command(state: &AppState) -> AppResult<()> {
    state.transcripts().clear()
}
