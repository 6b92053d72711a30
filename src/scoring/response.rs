use serde_json::Value;
use thiserror::Error;

/// Key under which the scoring service returns its single prediction
pub const PREDICTION_FIELD: &str = "output_feature_0";

/// The model predicts in units of $100,000
pub const PRICE_UNIT: f64 = 100_000.0;

/// A successfully extracted model prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Raw model output in units of $100,000
    pub raw_prediction: f64,
    /// Absolute dollar amount (`raw_prediction * 100000`)
    pub house_price: f64,
}

impl Prediction {
    pub fn from_raw(raw_prediction: f64) -> Self {
        Self {
            raw_prediction,
            house_price: raw_prediction * PRICE_UNIT,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("no prediction data found in response")]
    MissingData,
    #[error("first response row is not an [index, payload] pair")]
    MalformedRow,
    #[error("could not find 'output_feature_0' in prediction data")]
    MissingPredictionField { payload: Value },
    #[error("error extracting prediction: {0}")]
    Unreadable(String),
}

impl ExtractionError {
    /// The most specific JSON worth showing alongside this error, if the
    /// error narrows it down further than the whole response.
    pub fn diagnostic_payload(&self) -> Option<&Value> {
        match self {
            ExtractionError::MissingPredictionField { payload } => Some(payload),
            _ => None,
        }
    }
}

/// A scoring service response after a single validating pass.
///
/// Both variants keep the raw JSON so callers can always show it.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringResponse {
    WellFormed { prediction: Prediction, raw: Value },
    Unexpected { error: ExtractionError, raw: Value },
}

impl ScoringResponse {
    pub fn parse(raw: Value) -> Self {
        match extract_prediction(&raw) {
            Ok(prediction) => ScoringResponse::WellFormed { prediction, raw },
            Err(error) => ScoringResponse::Unexpected { error, raw },
        }
    }

    pub fn raw(&self) -> &Value {
        match self {
            ScoringResponse::WellFormed { raw, .. } | ScoringResponse::Unexpected { raw, .. } => {
                raw
            }
        }
    }
}

/// Extract the prediction from a response shaped like
/// `{"data": [[<index>, {"output_feature_0": <number>, ...}]]}`.
///
/// The row index value and any extra payload fields are ignored.
pub fn extract_prediction(response: &Value) -> Result<Prediction, ExtractionError> {
    let rows = match response.get("data").and_then(Value::as_array) {
        Some(rows) if !rows.is_empty() => rows,
        _ => return Err(ExtractionError::MissingData),
    };

    let payload = match rows[0].as_array() {
        Some(pair) if pair.len() == 2 => &pair[1],
        _ => return Err(ExtractionError::MalformedRow),
    };

    let value = payload
        .as_object()
        .and_then(|fields| fields.get(PREDICTION_FIELD))
        .ok_or_else(|| ExtractionError::MissingPredictionField {
            payload: payload.clone(),
        })?;

    let raw_prediction = value.as_f64().ok_or_else(|| {
        ExtractionError::Unreadable(format!(
            "'{}' is not a number: {}",
            PREDICTION_FIELD, value
        ))
    })?;

    Ok(Prediction::from_raw(raw_prediction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_well_formed_prediction() {
        let response = json!({"data": [[0, {"output_feature_0": 2.5}]]});
        let prediction = extract_prediction(&response).unwrap();
        assert_eq!(prediction.raw_prediction, 2.5);
        assert_eq!(prediction.house_price, 250_000.0);
    }

    #[test]
    fn test_integer_prediction_is_accepted() {
        let response = json!({"data": [[0, {"output_feature_0": 3}]]});
        let prediction = extract_prediction(&response).unwrap();
        assert_eq!(prediction.house_price, 300_000.0);
    }

    #[test]
    fn test_extra_fields_and_row_index_are_ignored() {
        let response = json!({
            "data": [[7, {"output_feature_0": 1.25, "confidence": 0.9}]],
            "model_version": "3"
        });
        let prediction = extract_prediction(&response).unwrap();
        assert_eq!(prediction.raw_prediction, 1.25);
    }

    #[test]
    fn test_only_first_row_is_read() {
        let response = json!({"data": [
            [0, {"output_feature_0": 1.0}],
            [1, {"output_feature_0": 9.0}]
        ]});
        assert_eq!(extract_prediction(&response).unwrap().raw_prediction, 1.0);
    }

    #[test]
    fn test_missing_data_field() {
        let response = json!({"result": []});
        assert_eq!(extract_prediction(&response), Err(ExtractionError::MissingData));
    }

    #[test]
    fn test_empty_data() {
        let response = json!({"data": []});
        assert_eq!(extract_prediction(&response), Err(ExtractionError::MissingData));
    }

    #[test]
    fn test_data_not_a_sequence() {
        let response = json!({"data": {"output_feature_0": 2.5}});
        assert_eq!(extract_prediction(&response), Err(ExtractionError::MissingData));
    }

    #[test]
    fn test_non_object_response() {
        assert_eq!(extract_prediction(&json!([1, 2])), Err(ExtractionError::MissingData));
        assert_eq!(extract_prediction(&json!(null)), Err(ExtractionError::MissingData));
    }

    #[test]
    fn test_malformed_rows() {
        for response in [
            json!({"data": [{"output_feature_0": 2.5}]}),
            json!({"data": [[0]]}),
            json!({"data": [[0, {"output_feature_0": 2.5}, "extra"]]}),
            json!({"data": [2.5]}),
        ] {
            assert_eq!(
                extract_prediction(&response),
                Err(ExtractionError::MalformedRow),
                "{}",
                response
            );
        }
    }

    #[test]
    fn test_missing_prediction_field_keeps_payload() {
        let response = json!({"data": [[0, {"wrong_field": 1.0}]]});
        let err = extract_prediction(&response).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MissingPredictionField {
                payload: json!({"wrong_field": 1.0})
            }
        );
        assert_eq!(err.diagnostic_payload(), Some(&json!({"wrong_field": 1.0})));
    }

    #[test]
    fn test_payload_not_an_object() {
        let response = json!({"data": [[0, 2.5]]});
        let err = extract_prediction(&response).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MissingPredictionField { payload: json!(2.5) }
        );
    }

    #[test]
    fn test_non_numeric_prediction() {
        let response = json!({"data": [[0, {"output_feature_0": "2.5"}]]});
        let err = extract_prediction(&response).unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn test_parse_keeps_raw_on_both_paths() {
        let good = json!({"data": [[0, {"output_feature_0": 2.5}]]});
        let parsed = ScoringResponse::parse(good.clone());
        assert_eq!(parsed.raw(), &good);
        assert!(matches!(parsed, ScoringResponse::WellFormed { .. }));

        let bad = json!({"unexpected": true});
        match ScoringResponse::parse(bad.clone()) {
            ScoringResponse::Unexpected { error, raw } => {
                assert_eq!(error, ExtractionError::MissingData);
                assert_eq!(raw, bad);
            }
            other => panic!("expected Unexpected, got {:?}", other),
        }
    }
}
