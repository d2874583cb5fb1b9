//! Random color palettes with per-swatch locking.

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;

use super::{FeatureAsync, FeatureSync};
use crate::shared::error::{AppError, AppResult, ERR_UNSUPPORTED_ACTION};
use crate::shared::types::{ActionType, CommandItem, ExecuteActionResponse, PaletteColor, PaletteColorDTO};

pub const DEFAULT_PALETTE_SIZE: usize = 5;
pub const MAX_PALETTE_SIZE: usize = 32;

/// Accept a requested swatch count in 1..=MAX_PALETTE_SIZE
pub fn validate_size(size: u64) -> AppResult<usize> {
    match usize::try_from(size) {
        Ok(size) if (1..=MAX_PALETTE_SIZE).contains(&size) => Ok(size),
        _ => Err(AppError::Validation(format!(
            "Palette size must be between 1 and {}, got {}",
            MAX_PALETTE_SIZE, size
        ))),
    }
}

/// "#rrggbb" drawn from 0..0xFFFFFF
pub fn random_hex<R: Rng + ?Sized>(rng: &mut R) -> String {
    let value: u32 = rng.gen_range(0..0xFF_FFFF);
    let bytes = value.to_be_bytes();
    format!("#{}", hex::encode(&bytes[1..]))
}

/// Black or white text for a background, by perceived luminance
pub fn contrast_color(color: &str) -> AppResult<&'static str> {
    let digits = color.strip_prefix('#').unwrap_or(color);
    let rgb = hex::decode(digits)
        .ok()
        .filter(|bytes| bytes.len() == 3)
        .ok_or_else(|| AppError::Validation(format!("Invalid hex color: {}", color)))?;

    let luminance = (0.299 * f64::from(rgb[0]) + 0.587 * f64::from(rgb[1]) + 0.114 * f64::from(rgb[2])) / 255.0;
    Ok(if luminance > 0.5 { "#000000" } else { "#ffffff" })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<PaletteColor>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE_SIZE)
    }
}

impl Palette {
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let colors = (0..size)
            .map(|_| PaletteColor {
                hex: random_hex(rng),
                locked: false,
            })
            .collect();
        Self { colors }
    }

    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    /// Redraw every unlocked swatch
    pub fn regenerate(&mut self) {
        self.regenerate_with(&mut rand::thread_rng());
    }

    pub fn regenerate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for color in self.colors.iter_mut().filter(|color| !color.locked) {
            color.hex = random_hex(rng);
        }
    }

    /// Grow with fresh unlocked swatches or drop trailing ones
    pub fn resize(&mut self, size: usize) {
        self.resize_with(size, &mut rand::thread_rng());
    }

    pub fn resize_with<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) {
        if size <= self.colors.len() {
            self.colors.truncate(size);
            return;
        }
        let missing = size - self.colors.len();
        self.colors.extend((0..missing).map(|_| PaletteColor {
            hex: random_hex(rng),
            locked: false,
        }));
    }

    /// Flip a swatch's lock, returning the new state
    pub fn toggle_lock(&mut self, index: usize) -> AppResult<bool> {
        let size = self.colors.len();
        let color = self
            .colors
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("Color index {} out of range (palette has {})", index, size)))?;
        color.locked = !color.locked;
        Ok(color.locked)
    }

    pub fn to_dto(&self) -> AppResult<Vec<PaletteColorDTO>> {
        self.colors
            .iter()
            .map(|color| -> AppResult<PaletteColorDTO> {
                Ok(PaletteColorDTO {
                    hex: color.hex.clone(),
                    locked: color.locked,
                    contrast: contrast_color(&color.hex)?.to_string(),
                })
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct ColorPaletteFeature;

impl FeatureSync for ColorPaletteFeature {
    fn id(&self) -> &'static str {
        "color_palette"
    }

    fn widget_commands(&self) -> Vec<CommandItem> {
        vec![CommandItem {
            id: "widget_color_palette".to_string(),
            label: "Color Palette".to_string(),
            description: Some("Generate color palettes".to_string()),
            action_type: None,
            widget_type: Some("color_palette".to_string()),
        }]
    }

    fn action_commands(&self) -> Vec<CommandItem> {
        vec![CommandItem {
            id: "generate_palette".to_string(),
            label: "Generate Palette".to_string(),
            description: None,
            action_type: Some(ActionType::GeneratePalette),
            widget_type: None,
        }]
    }
}

#[async_trait]
impl FeatureAsync for ColorPaletteFeature {
    async fn execute_action(
        &self,
        action_type: &ActionType,
        params: &serde_json::Value,
    ) -> AppResult<ExecuteActionResponse> {
        if *action_type != ActionType::GeneratePalette {
            return Err(AppError::Unknown(ERR_UNSUPPORTED_ACTION.to_string()));
        }

        let size = match params.get("size").and_then(|v| v.as_u64()) {
            Some(size) => validate_size(size)?,
            None => DEFAULT_PALETTE_SIZE,
        };
        let colors = Palette::new(size).to_dto()?;

        Ok(ExecuteActionResponse {
            result: colors
                .iter()
                .map(|color| color.hex.to_uppercase())
                .collect::<Vec<_>>()
                .join(", "),
            metadata: Some(json!({
                "colors": colors,
                "widget": "color_palette"
            })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_hex_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let color = random_hex(&mut rng);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_contrast_color() {
        assert_eq!(contrast_color("#ffffff").unwrap(), "#000000");
        assert_eq!(contrast_color("#000000").unwrap(), "#ffffff");
        assert_eq!(contrast_color("#ffff00").unwrap(), "#000000");
        assert_eq!(contrast_color("#0000ff").unwrap(), "#ffffff");
        assert!(contrast_color("#12345").is_err());
        assert!(contrast_color("#zzzzzz").is_err());
    }

    #[test]
    fn test_regenerate_keeps_locked_colors() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut palette = Palette::with_rng(5, &mut rng);
        assert!(palette.toggle_lock(1).unwrap());
        let before = palette.clone();

        for _ in 0..3 {
            palette.regenerate_with(&mut rng);
        }
        assert_eq!(palette.colors()[1], before.colors()[1]);
        assert_ne!(palette.colors()[0].hex, before.colors()[0].hex);
    }

    #[test]
    fn test_toggle_lock_out_of_range() {
        let mut palette = Palette::new(3);
        assert!(matches!(palette.toggle_lock(3), Err(AppError::Validation(_))));
        assert!(palette.toggle_lock(0).unwrap());
        assert!(!palette.toggle_lock(0).unwrap());
    }

    #[test]
    fn test_validate_size_bounds() {
        assert_eq!(validate_size(1).unwrap(), 1);
        assert_eq!(validate_size(MAX_PALETTE_SIZE as u64).unwrap(), MAX_PALETTE_SIZE);
        assert!(matches!(validate_size(0), Err(AppError::Validation(_))));
        assert!(matches!(validate_size(MAX_PALETTE_SIZE as u64 + 1), Err(AppError::Validation(_))));
        assert!(matches!(validate_size(10_000_000_000), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_resize_keeps_existing_swatches() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut palette = Palette::with_rng(3, &mut rng);
        palette.toggle_lock(0).unwrap();
        let before = palette.clone();

        palette.resize_with(6, &mut rng);
        assert_eq!(palette.colors().len(), 6);
        assert_eq!(&palette.colors()[..3], before.colors());
        assert!(palette.colors()[3..].iter().all(|c| !c.locked));

        palette.resize_with(2, &mut rng);
        assert_eq!(palette.colors(), &before.colors()[..2]);
    }

    #[tokio::test]
    async fn test_execute_rejects_oversized_palette() {
        let err = ColorPaletteFeature
            .execute_action(&ActionType::GeneratePalette, &json!({ "size": 10_000_000_000u64 }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_execute_generate_palette() {
        let response = ColorPaletteFeature
            .execute_action(&ActionType::GeneratePalette, &json!({ "size": 3 }))
            .await
            .unwrap();
        assert_eq!(response.result.split(", ").count(), 3);
        assert_eq!(response.metadata.unwrap()["colors"].as_array().unwrap().len(), 3);
    }
}
