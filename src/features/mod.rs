pub mod presets;

pub use presets::Preset;

use thiserror::Error;

/// Number of model inputs, in wire order
pub const FEATURE_COUNT: usize = 8;

/// Static description of one model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSpec {
    /// Column name used by the training dataset (e.g. "MedInc")
    pub key: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Decimal places shown when the value is displayed or prompted
    pub decimals: usize,
}

impl FeatureSpec {
    /// Clamp a value into this feature's valid range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Format a value with this feature's display precision
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }
}

/// The model inputs in the order the scoring service expects them.
pub const FEATURES: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec {
        key: "MedInc",
        label: "Median Income",
        help: "Median income in block group (in tens of thousands)",
        min: 0.0,
        max: 15.0,
        default: 3.8462,
        decimals: 4,
    },
    FeatureSpec {
        key: "HouseAge",
        label: "House Age",
        help: "Median house age in block group (years)",
        min: 1.0,
        max: 52.0,
        default: 27.0,
        decimals: 1,
    },
    FeatureSpec {
        key: "AveRooms",
        label: "Average Rooms",
        help: "Average number of rooms per household",
        min: 0.8,
        max: 141.0,
        default: 5.4298,
        decimals: 4,
    },
    FeatureSpec {
        key: "AveBedrms",
        label: "Average Bedrooms",
        help: "Average number of bedrooms per household",
        min: 0.3,
        max: 34.0,
        default: 1.0967,
        decimals: 4,
    },
    FeatureSpec {
        key: "Population",
        label: "Population",
        help: "Block group population",
        min: 3.0,
        max: 35682.0,
        default: 3375.0,
        decimals: 0,
    },
    FeatureSpec {
        key: "AveOccup",
        label: "Average Occupancy",
        help: "Average number of household members",
        min: 0.7,
        max: 1243.0,
        default: 3.0625,
        decimals: 4,
    },
    FeatureSpec {
        key: "Latitude",
        label: "Latitude",
        help: "Block group latitude (degrees)",
        min: 32.5,
        max: 42.0,
        default: 33.69,
        decimals: 2,
    },
    FeatureSpec {
        key: "Longitude",
        label: "Longitude",
        help: "Block group longitude (degrees)",
        min: -124.3,
        max: -114.3,
        default: -117.96,
        decimals: 2,
    },
];

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("{key} must be a finite number, got {value}")]
    NonFinite { key: &'static str, value: f64 },
}

/// Eight housing-district features, every value inside its valid range.
///
/// Construction clamps out-of-range values to the nearest bound, so a
/// `FeatureVector` can always be turned into a scoring request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, FeatureError> {
        let mut clamped = values;
        for (value, spec) in clamped.iter_mut().zip(FEATURES.iter()) {
            if !value.is_finite() {
                return Err(FeatureError::NonFinite {
                    key: spec.key,
                    value: *value,
                });
            }
            if !spec.contains(*value) {
                let bounded = spec.clamp(*value);
                tracing::warn!(
                    feature = spec.key,
                    input = *value,
                    clamped = bounded,
                    "feature value out of range, clamping"
                );
                *value = bounded;
            }
        }
        Ok(Self { values: clamped })
    }

    /// The form defaults (an average suburban district)
    pub fn defaults() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (value, spec) in values.iter_mut().zip(FEATURES.iter()) {
            *value = spec.default;
        }
        Self { values }
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Iterate (spec, value) pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&'static FeatureSpec, f64)> + '_ {
        FEATURES.iter().zip(self.values.iter().copied())
    }

    /// Replace individual values, keeping the rest. Overrides are clamped.
    pub fn with_overrides(
        &self,
        overrides: &[Option<f64>; FEATURE_COUNT],
    ) -> Result<Self, FeatureError> {
        let mut values = self.values;
        for (value, over) in values.iter_mut().zip(overrides.iter()) {
            if let Some(v) = over {
                *value = *v;
            }
        }
        Self::new(values)
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        for spec in FEATURES.iter() {
            assert!(spec.contains(spec.default), "{} default out of range", spec.key);
        }
    }

    #[test]
    fn test_new_keeps_in_range_values() {
        let values = [8.3252, 41.0, 6.9841, 1.0238, 322.0, 2.5556, 37.88, -122.23];
        let fv = FeatureVector::new(values).unwrap();
        assert_eq!(fv.values(), &values);
        assert_eq!(fv.values()[0], 8.3252);
        assert_eq!(fv.values()[7], -122.23);
    }

    #[test]
    fn test_new_clamps_out_of_range() {
        let values = [20.0, 0.0, 5.0, 1.0, 1000.0, 3.0, 50.0, -130.0];
        let fv = FeatureVector::new(values).unwrap();
        assert_eq!(fv.values()[0], 15.0);
        assert_eq!(fv.values()[1], 1.0);
        assert_eq!(fv.values()[6], 42.0);
        assert_eq!(fv.values()[7], -124.3);
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let mut values = *FeatureVector::defaults().values();
        values[4] = f64::NAN;
        let err = FeatureVector::new(values).unwrap_err();
        assert!(matches!(err, FeatureError::NonFinite { key: "Population", .. }));

        values[4] = f64::INFINITY;
        assert!(FeatureVector::new(values).is_err());
    }

    #[test]
    fn test_with_overrides() {
        let mut overrides = [None; FEATURE_COUNT];
        overrides[1] = Some(10.0);
        overrides[7] = Some(-100.0);
        let fv = FeatureVector::defaults().with_overrides(&overrides).unwrap();
        assert_eq!(fv.values()[0], 3.8462);
        assert_eq!(fv.values()[1], 10.0);
        // Clamped to the eastern bound
        assert_eq!(fv.values()[7], -114.3);
    }

    #[test]
    fn test_format_value_uses_precision() {
        assert_eq!(FEATURES[0].format_value(3.8462), "3.8462");
        assert_eq!(FEATURES[4].format_value(3375.0), "3375");
        assert_eq!(FEATURES[7].format_value(-117.96), "-117.96");
    }
}
