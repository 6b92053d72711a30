use serde::{Deserialize, Serialize};

use super::{FeatureVector, FEATURE_COUNT};

/// Example California districts to start the form from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Expensive coastal area (Bay Area block group)
    Coastal,
    /// Average suburban area (the form defaults)
    Suburban,
    /// Rural inland area (Central Valley block group)
    Rural,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Coastal, Preset::Suburban, Preset::Rural];

    /// Name used on the command line and in the config file
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Coastal => "coastal",
            Preset::Suburban => "suburban",
            Preset::Rural => "rural",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Coastal => "Expensive Coastal Area",
            Preset::Suburban => "Average Suburban Area",
            Preset::Rural => "Rural Inland Area",
        }
    }

    fn values(&self) -> [f64; FEATURE_COUNT] {
        match self {
            Preset::Coastal => [8.3252, 41.0, 6.9841, 1.0238, 322.0, 2.5556, 37.88, -122.23],
            Preset::Suburban => *FeatureVector::defaults().values(),
            Preset::Rural => [2.1250, 33.0, 5.6410, 1.1520, 905.0, 2.8910, 39.45, -121.55],
        }
    }

    pub fn features(&self) -> FeatureVector {
        // Preset tables are in range, so this never clamps
        FeatureVector::new(self.values()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURES;

    #[test]
    fn test_presets_are_in_range() {
        for preset in Preset::ALL {
            for (spec, value) in FEATURES.iter().zip(preset.values()) {
                assert!(
                    spec.contains(value),
                    "{:?} has {} out of range: {}",
                    preset,
                    spec.key,
                    value
                );
            }
        }
    }

    #[test]
    fn test_suburban_matches_defaults() {
        assert_eq!(Preset::Suburban.features(), FeatureVector::defaults());
    }
}
