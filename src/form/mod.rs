//! Terminal form for the eight housing features.
//!
//! Prompt helpers read from any `BufRead` and write to any `Write` so the
//! flows can be driven from tests.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::features::{FeatureSpec, FeatureVector, FEATURE_COUNT};

/// Prompt with a message and return the trimmed input line.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush output")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("Input closed");
    }
    Ok(line.trim().to_string())
}

/// Prompt with a default value. Returns the default if input is empty.
pub fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let answer = prompt(input, output, &format!("{} [{}]: ", message, default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Prompt with a yes/no question.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = prompt(input, output, &format!("{} [{}]: ", message, hint))?.to_lowercase();
    if answer.is_empty() {
        Ok(default_yes)
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}

/// Parse one feature value as typed by the user.
///
/// Out-of-range numbers are accepted here and clamped when the
/// `FeatureVector` is built.
pub fn parse_feature_value(spec: &FeatureSpec, text: &str) -> Result<f64, String> {
    let value: f64 = text
        .trim()
        .replace('_', "")
        .parse()
        .map_err(|_| format!("'{}' is not a number", text.trim()))?;
    if !value.is_finite() {
        return Err(format!("{} must be a finite number", spec.label));
    }
    Ok(value)
}

/// Ask for each feature in wire order, offering `start` as the defaults.
pub fn collect_features<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    start: &FeatureVector,
) -> Result<FeatureVector> {
    writeln!(output, "Housing features (press Enter to keep the value in brackets)")
        .context("Failed to write prompt")?;

    let mut values = [0.0; FEATURE_COUNT];
    for (slot, (spec, current)) in values.iter_mut().zip(start.iter()) {
        let label = format!(
            "{} ({}, {} to {})",
            spec.label,
            spec.key,
            spec.format_value(spec.min),
            spec.format_value(spec.max)
        );
        *slot = loop {
            let answer = prompt_with_default(input, output, &label, &spec.format_value(current))?;
            match parse_feature_value(spec, &answer) {
                Ok(value) => {
                    if !spec.contains(value) {
                        writeln!(
                            output,
                            "  Out of range, using {}",
                            spec.format_value(spec.clamp(value))
                        )
                        .context("Failed to write prompt")?;
                    }
                    break value;
                }
                Err(e) => {
                    writeln!(output, "  Invalid: {}. Try again.", e).context("Failed to write prompt")?;
                }
            }
        };
    }

    FeatureVector::new(values).context("Invalid feature values")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURES;
    use std::io::Cursor;

    fn run_form(script: &str, start: &FeatureVector) -> (Result<FeatureVector>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = collect_features(&mut input, &mut output, start);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_enter_keeps_defaults() {
        let script = "\n".repeat(FEATURE_COUNT);
        let (result, _) = run_form(&script, &FeatureVector::defaults());
        assert_eq!(result.unwrap(), FeatureVector::defaults());
    }

    #[test]
    fn test_typed_values_replace_defaults() {
        let script = "8.3252\n41\n6.9841\n1.0238\n322\n2.5556\n37.88\n-122.23\n";
        let (result, _) = run_form(script, &FeatureVector::defaults());
        let fv = result.unwrap();
        assert_eq!(fv.values()[0], 8.3252);
        assert_eq!(fv.values()[4], 322.0);
        assert_eq!(fv.values()[7], -122.23);
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let script = format!("abc\n5.0\n{}", "\n".repeat(FEATURE_COUNT - 1));
        let (result, output) = run_form(&script, &FeatureVector::defaults());
        assert_eq!(result.unwrap().values()[0], 5.0);
        assert!(output.contains("Invalid: 'abc' is not a number"));
    }

    #[test]
    fn test_nan_is_rejected() {
        let script = format!("NaN\n\n{}", "\n".repeat(FEATURE_COUNT - 1));
        let (result, output) = run_form(&script, &FeatureVector::defaults());
        assert_eq!(result.unwrap().values()[0], 3.8462);
        assert!(output.contains("finite"));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let script = format!("99\n{}", "\n".repeat(FEATURE_COUNT - 1));
        let (result, output) = run_form(&script, &FeatureVector::defaults());
        assert_eq!(result.unwrap().values()[0], 15.0);
        assert!(output.contains("Out of range, using 15.0000"));
    }

    #[test]
    fn test_closed_input_is_error() {
        let (result, _) = run_form("1.0\n", &FeatureVector::defaults());
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_yes_no_default() {
        let mut input = Cursor::new(b"\nyes\nn\n".to_vec());
        let mut output = Vec::new();
        assert!(!prompt_yes_no(&mut input, &mut output, "Again?", false).unwrap());
        assert!(prompt_yes_no(&mut input, &mut output, "Again?", false).unwrap());
        assert!(!prompt_yes_no(&mut input, &mut output, "Again?", true).unwrap());
    }

    #[test]
    fn test_parse_accepts_underscores() {
        assert_eq!(parse_feature_value(&FEATURES[4], "35_682").unwrap(), 35682.0);
    }
}
