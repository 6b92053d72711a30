use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config};
use crate::credentials::{get_endpoint_from_env, ENV_TOKEN_VAR};
use crate::features::Preset;
use crate::form::{prompt, prompt_with_default, prompt_yes_no};

fn parse_preset(input: &str) -> Option<Preset> {
    Preset::ALL
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(input.trim()))
}

/// Ask the wizard questions and build the resulting config.
fn ask_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    current_endpoint: Option<String>,
) -> Result<Config> {
    writeln!(output, "The scoring endpoint is the HTTPS URL of the deployed model.")?;
    let endpoint = loop {
        let answer = match &current_endpoint {
            Some(current) => prompt_with_default(input, output, "Scoring endpoint", current)?,
            None => prompt(input, output, "Scoring endpoint: ")?,
        };
        if answer.starts_with("https://") || answer.starts_with("http://") {
            break answer;
        }
        writeln!(output, "  Invalid: must start with https:// or http://. Try again.")?;
    };

    writeln!(output)?;
    writeln!(
        output,
        "The form can start from an example district: coastal, suburban, or rural."
    )?;
    let default_preset = loop {
        let answer = prompt_with_default(input, output, "Default preset", "suburban")?;
        match parse_preset(&answer) {
            Some(preset) => break preset,
            None => writeln!(output, "  Invalid: '{}' is not a preset. Try again.", answer)?,
        }
    };

    Ok(Config {
        endpoint: Some(endpoint),
        default_preset: Some(default_preset),
    })
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, it is offered as the config file path.
/// The access token is never written; it is read from SNOWFLAKE_PAT.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    writeln!(output)?;
    writeln!(output, "house-value configuration")?;
    writeln!(output, "=========================")?;
    writeln!(output)?;

    let config = ask_config(&mut input, &mut output, get_endpoint_from_env())?;

    writeln!(output)?;
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    let path_str = prompt_with_default(
        &mut input,
        &mut output,
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &mut input,
            &mut output,
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            writeln!(output, "Aborted.")?;
            return Ok(());
        }
    }

    save_config(&config_path, &config)?;

    writeln!(output)?;
    writeln!(output, "Config written to {}", config_path.display())?;
    writeln!(
        output,
        "Export {} with your access token, then run `house-value`.",
        ENV_TOKEN_VAR
    )?;

    Ok(())
}
