//! Random password generation over selectable character sets.

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;

use super::{FeatureAsync, FeatureSync};
use crate::shared::error::{AppError, AppResult, ERR_UNSUPPORTED_ACTION};
use crate::shared::types::{ActionType, CommandItem, ExecuteActionResponse, GeneratedPassword, PasswordOptions, PasswordStrength};

pub const MIN_LENGTH: usize = 6;
pub const MAX_LENGTH: usize = 64;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

pub fn clamp_length(length: usize) -> usize {
    length.clamp(MIN_LENGTH, MAX_LENGTH)
}

/// Selected sets concatenated in a fixed order; lowercase if none selected
pub fn charset(options: &PasswordOptions) -> String {
    let mut charset = String::new();
    if options.uppercase {
        charset.push_str(UPPERCASE);
    }
    if options.lowercase {
        charset.push_str(LOWERCASE);
    }
    if options.numbers {
        charset.push_str(NUMBERS);
    }
    if options.symbols {
        charset.push_str(SYMBOLS);
    }
    if charset.is_empty() {
        charset.push_str(LOWERCASE);
    }
    charset
}

/// Score the options, not the drawn password: one point each for
/// length >= 12, length >= 16, mixed case, numbers, symbols.
pub fn strength(options: &PasswordOptions) -> (PasswordStrength, u8) {
    let length = clamp_length(options.length);
    let score = [
        length >= 12,
        length >= 16,
        options.uppercase && options.lowercase,
        options.numbers,
        options.symbols,
    ]
    .iter()
    .filter(|hit| **hit)
    .count() as u8;

    let strength = match score {
        0..=2 => PasswordStrength::Weak,
        3 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    };
    (strength, score)
}

pub fn generate_with_rng<R: Rng + ?Sized>(options: &PasswordOptions, rng: &mut R) -> GeneratedPassword {
    let charset = charset(options).into_bytes();
    let password = (0..clamp_length(options.length))
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect();
    let (strength, score) = strength(options);

    GeneratedPassword { password, strength, score }
}

pub fn generate_password(options: &PasswordOptions) -> GeneratedPassword {
    generate_with_rng(options, &mut rand::thread_rng())
}

#[derive(Clone)]
pub struct PasswordGeneratorFeature;

impl FeatureSync for PasswordGeneratorFeature {
    fn id(&self) -> &'static str {
        "password_generator"
    }

    fn widget_commands(&self) -> Vec<CommandItem> {
        vec![CommandItem {
            id: "widget_password_generator".to_string(),
            label: "Password Generator".to_string(),
            description: Some("Generate a random password".to_string()),
            action_type: None,
            widget_type: Some("password_generator".to_string()),
        }]
    }

    fn action_commands(&self) -> Vec<CommandItem> {
        vec![CommandItem {
            id: "generate_password".to_string(),
            label: "Generate Password".to_string(),
            description: Some("16 characters, all character sets".to_string()),
            action_type: Some(ActionType::GeneratePassword),
            widget_type: None,
        }]
    }
}

#[async_trait]
impl FeatureAsync for PasswordGeneratorFeature {
    async fn execute_action(
        &self,
        action_type: &ActionType,
        params: &serde_json::Value,
    ) -> AppResult<ExecuteActionResponse> {
        if *action_type != ActionType::GeneratePassword {
            return Err(AppError::Unknown(ERR_UNSUPPORTED_ACTION.to_string()));
        }

        let options: PasswordOptions = if params.is_null() {
            PasswordOptions::default()
        } else {
            serde_json::from_value(params.clone())?
        };
        let generated = generate_password(&options);

        Ok(ExecuteActionResponse {
            result: generated.password.clone(),
            metadata: Some(json!({
                "strength": generated.strength,
                "score": generated.score,
                "length": generated.password.len(),
                "widget": "password_generator"
            })),
        })
    }
}
