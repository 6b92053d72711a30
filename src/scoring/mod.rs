pub mod client;
pub mod payload;
pub mod response;

pub use client::{authorization_value, ScoringClient, ScoringError, AUTH_SCHEME, REQUEST_TIMEOUT};
pub use payload::ScoringRequest;
pub use response::{extract_prediction, ExtractionError, Prediction, ScoringResponse};
