use crate::api::state::AppState;
use crate::core::features::password_generator::generate_password;
use crate::shared::error::AppResult;
use crate::shared::types::{GeneratedPassword, PasswordOptions};

/// Generate a password; without explicit options the saved defaults apply
pub async fn generate_password_command(
    state: &AppState,
    options: Option<PasswordOptions>,
) -> AppResult<GeneratedPassword> {
    let options = options.unwrap_or_else(|| state.settings().password.clone());
    Ok(generate_password(&options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_support::state_in;
    use crate::shared::types::PasswordStrength;

    #[tokio::test]
    async fn test_uses_saved_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        state.settings().password.length = 30;

        let generated = generate_password_command(&state, None).await.unwrap();
        assert_eq!(generated.password.len(), 30);
        assert_eq!(generated.strength, PasswordStrength::Strong);
    }

    #[tokio::test]
    async fn test_explicit_options_win() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let options = PasswordOptions {
            length: 8,
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: false,
        };

        let generated = generate_password_command(&state, Some(options)).await.unwrap();
        assert_eq!(generated.password.len(), 8);
        assert!(generated.password.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(generated.strength, PasswordStrength::Weak);
    }
}
