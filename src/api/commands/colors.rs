use crate::api::state::AppState;
use crate::shared::error::AppResult;
use crate::shared::types::PaletteColorDTO;

pub async fn get_palette_command(state: &AppState) -> AppResult<Vec<PaletteColorDTO>> {
    state.palette().to_dto()
}

/// Redraw unlocked colors
pub async fn regenerate_palette_command(state: &AppState) -> AppResult<Vec<PaletteColorDTO>> {
    let mut palette = state.palette();
    palette.regenerate();
    palette.to_dto()
}

pub async fn toggle_color_lock_command(state: &AppState, index: usize) -> AppResult<Vec<PaletteColorDTO>> {
    let mut palette = state.palette();
    palette.toggle_lock(index)?;
    palette.to_dto()
}
