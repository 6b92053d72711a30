use serde::{Deserialize, Serialize};

use crate::features::Preset;

/// Contents of `~/.config/house-value/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// endpoint: https://example.snowflakecomputing.app/predict
/// default_preset: coastal
/// ```
///
/// The access token is deliberately not part of the file; it comes from
/// `SNOWFLAKE_PAT` or the interactive prompt.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scoring endpoint URL, used when SCORING_ENDPOINT and --endpoint are absent
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Preset the form starts from when --preset is not given
    #[serde(default)]
    pub default_preset: Option<Preset>,
}
