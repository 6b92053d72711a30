use owo_colors::OwoColorize;
use serde_json::Value;
use std::io::IsTerminal;

use crate::features::{FeatureVector, Preset, FEATURES};
use crate::predict::{Diagnostic, PredictionOutcome};
use crate::scoring::Prediction;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a dollar amount rounded to whole dollars with thousands
/// separators: 250000.4 -> "$250,000"
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format the headline and raw-value lines for a successful prediction
pub fn format_prediction(prediction: &Prediction, use_colors: bool) -> String {
    let price = format_currency(prediction.house_price);
    let raw = format!("{:.4}", prediction.raw_prediction);

    if use_colors {
        format!(
            "Predicted Median House Value: {}\n  Raw prediction value: {} (in $100,000s)",
            price.bold().green(),
            raw.dimmed()
        )
    } else {
        format!(
            "Predicted Median House Value: {}\n  Raw prediction value: {} (in $100,000s)",
            price, raw
        )
    }
}

fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format an outcome as status line, detail, and (optionally) the raw
/// response as technical details.
pub fn format_outcome(outcome: &PredictionOutcome, use_colors: bool, show_response: bool) -> String {
    let status = outcome.status_message();
    let mut out = if use_colors {
        if outcome.is_success() {
            status.green().to_string()
        } else {
            status.red().to_string()
        }
    } else {
        status
    };

    if let PredictionOutcome::Success { prediction, .. } = outcome {
        out.push('\n');
        out.push_str(&format_prediction(prediction, use_colors));
    }

    match outcome.diagnostic() {
        Some(Diagnostic::Text(text)) => {
            out.push('\n');
            out.push_str(&indent(text));
        }
        Some(Diagnostic::Json { heading, value }) => {
            out.push_str(&format!("\n{}:\n", heading));
            out.push_str(&indent(&format_json(value)));
        }
        None => {}
    }

    if show_response {
        if let Some(raw) = outcome.raw_response() {
            let heading = if use_colors {
                "Technical details".dimmed().to_string()
            } else {
                "Technical details".to_string()
            };
            out.push_str(&format!("\n{}:\n", heading));
            out.push_str(&indent(&format_json(raw)));
        }
    }

    out
}

/// Format the submitted feature values, one per line
pub fn format_feature_summary(features: &FeatureVector) -> String {
    features
        .iter()
        .map(|(spec, value)| format!("  {:<18} {:>10}", spec.label, spec.format_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the feature reference table shown by `house-value features`
pub fn format_feature_table(use_colors: bool) -> String {
    let mut lines = Vec::new();
    lines.push("California Housing Dataset Features:".to_string());
    lines.push(String::new());

    for spec in FEATURES.iter() {
        let key = format!("{:<11}", spec.key);
        let range = format!(
            "[{} to {}, default {}]",
            spec.format_value(spec.min),
            spec.format_value(spec.max),
            spec.format_value(spec.default)
        );
        if use_colors {
            lines.push(format!("  {} {} {}", key.bold(), spec.help, range.dimmed()));
        } else {
            lines.push(format!("  {} {} {}", key, spec.help, range));
        }
    }

    lines.push(String::new());
    lines.push("Target: median house value in hundreds of thousands of dollars".to_string());
    lines.push(String::new());
    lines.push("Presets:".to_string());
    for preset in Preset::ALL {
        lines.push(format!("  {:<11} {}", preset.name(), preset.label()));
    }

    lines.join("\n")
}
