use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::features::{FeatureVector, FEATURE_COUNT};

/// Row identifier the scoring service's tabular format requires. Single-row
/// requests always use 0.
pub const ROW_INDEX: u32 = 0;

/// Request body for one prediction: `{"data": [[0, f1, ..., f8]]}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRequest {
    row: [f64; FEATURE_COUNT],
}

impl ScoringRequest {
    /// Build the request for a feature vector. Feature order is positional
    /// and fixed by [`crate::features::FEATURES`].
    pub fn new(features: &FeatureVector) -> Self {
        Self {
            row: *features.values(),
        }
    }

    /// Serialize to the JSON text sent on the wire
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&FeatureVector> for ScoringRequest {
    fn from(features: &FeatureVector) -> Self {
        Self::new(features)
    }
}

struct Row<'a>(&'a [f64; FEATURE_COUNT]);

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(FEATURE_COUNT + 1))?;
        seq.serialize_element(&ROW_INDEX)?;
        for value in self.0 {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl Serialize for ScoringRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("ScoringRequest", 1)?;
        body.serialize_field("data", &[Row(&self.row)])?;
        body.end()
    }
}
