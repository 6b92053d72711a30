use serde_json::Value;

use crate::features::FeatureVector;
use crate::scoring::{
    ExtractionError, Prediction, ScoringClient, ScoringError, ScoringRequest, ScoringResponse,
};

/// Result of one submission, with every failure already classified.
///
/// Nothing returned from [`predict`] is an error: the caller renders the
/// outcome and the user decides whether to resubmit.
#[derive(Debug)]
pub enum PredictionOutcome {
    Success { prediction: Prediction, raw: Value },
    Timeout,
    ConnectionFailure { message: String },
    HttpError { status: u16, body: String },
    TransportError { message: String },
    InvalidJson { message: String, body: String },
    Extraction { error: ExtractionError, raw: Value },
    Setup { message: String },
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success { .. })
    }

    /// One-line status message for the user
    pub fn status_message(&self) -> String {
        match self {
            PredictionOutcome::Success { .. } => "Prediction successful!".to_string(),
            PredictionOutcome::Timeout => "Request timed out. Please try again.".to_string(),
            PredictionOutcome::ConnectionFailure { .. } => {
                "Connection error. Check your endpoint URL.".to_string()
            }
            PredictionOutcome::HttpError { status, .. } => format!("API Error {}", status),
            PredictionOutcome::TransportError { message } => format!("Error: {}", message),
            PredictionOutcome::InvalidJson { message, .. } => {
                format!("Response was not valid JSON: {}", message)
            }
            PredictionOutcome::Extraction { error, .. } => capitalize(&error.to_string()),
            PredictionOutcome::Setup { message } => format!("Error: {}", message),
        }
    }

    /// Text worth showing under the status message for diagnosis, if any
    pub fn diagnostic(&self) -> Option<Diagnostic<'_>> {
        match self {
            PredictionOutcome::HttpError { body, .. }
            | PredictionOutcome::InvalidJson { body, .. } => Some(Diagnostic::Text(body)),
            PredictionOutcome::ConnectionFailure { message } => Some(Diagnostic::Text(message)),
            PredictionOutcome::Extraction { error, raw } => match error.diagnostic_payload() {
                Some(payload) => Some(Diagnostic::Json {
                    heading: "Received data",
                    value: payload,
                }),
                None => Some(Diagnostic::Json {
                    heading: "Raw response for debugging",
                    value: raw,
                }),
            },
            _ => None,
        }
    }

    /// The full response body, when one was received and parsed
    pub fn raw_response(&self) -> Option<&Value> {
        match self {
            PredictionOutcome::Success { raw, .. } | PredictionOutcome::Extraction { raw, .. } => {
                Some(raw)
            }
            _ => None,
        }
    }
}

/// Supporting detail attached to a failed outcome
#[derive(Debug, PartialEq)]
pub enum Diagnostic<'a> {
    Text(&'a str),
    Json { heading: &'static str, value: &'a Value },
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<ScoringError> for PredictionOutcome {
    fn from(error: ScoringError) -> Self {
        match error {
            ScoringError::Timeout(_) => PredictionOutcome::Timeout,
            ScoringError::ConnectionFailure(message) => {
                PredictionOutcome::ConnectionFailure { message }
            }
            ScoringError::HttpError { status, body } => PredictionOutcome::HttpError { status, body },
            ScoringError::UnknownTransportError(message) => {
                PredictionOutcome::TransportError { message }
            }
            ScoringError::InvalidJson { message, body } => {
                PredictionOutcome::InvalidJson { message, body }
            }
            ScoringError::InvalidSetup(message) => PredictionOutcome::Setup { message },
        }
    }
}

/// Build the payload, call the scoring service once, and extract the
/// prediction. Every failure is folded into the returned outcome.
pub async fn predict(client: &ScoringClient, features: &FeatureVector) -> PredictionOutcome {
    let request = ScoringRequest::new(features);

    let raw = match client.score(&request).await {
        Ok(raw) => raw,
        Err(error) => return PredictionOutcome::from(error),
    };

    match ScoringResponse::parse(raw) {
        ScoringResponse::WellFormed { prediction, raw } => {
            tracing::info!(
                raw_prediction = prediction.raw_prediction,
                house_price = prediction.house_price,
                "prediction extracted"
            );
            PredictionOutcome::Success { prediction, raw }
        }
        ScoringResponse::Unexpected { error, raw } => {
            tracing::warn!(error = %error, "unexpected scoring response shape");
            PredictionOutcome::Extraction { error, raw }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_status_messages_are_distinct() {
        let outcomes = vec![
            PredictionOutcome::Success {
                prediction: Prediction::from_raw(2.5),
                raw: json!({}),
            },
            PredictionOutcome::Timeout,
            PredictionOutcome::ConnectionFailure {
                message: "refused".to_string(),
            },
            PredictionOutcome::HttpError {
                status: 500,
                body: "server error".to_string(),
            },
            PredictionOutcome::TransportError {
                message: "reset".to_string(),
            },
            PredictionOutcome::InvalidJson {
                message: "expected value".to_string(),
                body: "<html>".to_string(),
            },
            PredictionOutcome::Extraction {
                error: ExtractionError::MissingData,
                raw: json!({}),
            },
        ];

        let mut messages: Vec<String> = outcomes.iter().map(|o| o.status_message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), outcomes.len());
    }

    #[test]
    fn test_http_error_message_has_status_and_body() {
        let outcome = PredictionOutcome::from(ScoringError::HttpError {
            status: 500,
            body: "server error".to_string(),
        });
        assert_eq!(outcome.status_message(), "API Error 500");
        assert_eq!(outcome.diagnostic(), Some(Diagnostic::Text("server error")));
    }

    #[test]
    fn test_timeout_maps_to_timeout() {
        let outcome = PredictionOutcome::from(ScoringError::Timeout(Duration::from_secs(30)));
        assert!(matches!(outcome, PredictionOutcome::Timeout));
        assert!(outcome.diagnostic().is_none());
    }

    #[test]
    fn test_missing_field_shows_payload() {
        let outcome = PredictionOutcome::Extraction {
            error: ExtractionError::MissingPredictionField {
                payload: json!({"wrong_field": 1.0}),
            },
            raw: json!({"data": [[0, {"wrong_field": 1.0}]]}),
        };
        assert_eq!(
            outcome.status_message(),
            "Could not find 'output_feature_0' in prediction data"
        );
        assert_eq!(
            outcome.diagnostic(),
            Some(Diagnostic::Json {
                heading: "Received data",
                value: &json!({"wrong_field": 1.0}),
            })
        );
    }

    #[test]
    fn test_missing_data_shows_raw_response() {
        let raw = json!({"unexpected": true});
        let outcome = PredictionOutcome::Extraction {
            error: ExtractionError::MissingData,
            raw: raw.clone(),
        };
        assert_eq!(outcome.status_message(), "No prediction data found in response");
        assert_eq!(
            outcome.diagnostic(),
            Some(Diagnostic::Json {
                heading: "Raw response for debugging",
                value: &raw,
            })
        );
        assert_eq!(outcome.raw_response(), Some(&raw));
    }
}
