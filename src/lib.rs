//! Predict California median house values with a remote scoring service.
//!
//! The flow is [`features`] → [`scoring::ScoringRequest`] →
//! [`scoring::ScoringClient`] → [`scoring::ScoringResponse`], orchestrated by
//! [`predict::predict`], which folds every failure into a
//! [`predict::PredictionOutcome`].

pub mod config;
pub mod credentials;
pub mod features;
pub mod form;
pub mod output;
pub mod predict;
pub mod scoring;
pub mod telemetry;
