use anyhow::{Context, Result};

use super::ENV_TOKEN_VAR;

/// Prompts the user for the scoring service's personal access token.
/// Input is hidden and never stored.
pub fn prompt_for_token() -> Result<String> {
    eprintln!("Scoring service access token required.");
    eprintln!("Set {} to skip this prompt.", ENV_TOKEN_VAR);
    eprintln!();

    let token = rpassword::prompt_password("Enter token: ")
        .context("Failed to read token from terminal")?;

    let token = token.trim();

    if token.is_empty() {
        anyhow::bail!("Token cannot be empty");
    }

    Ok(token.to_string())
}
