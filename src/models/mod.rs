// src/models/mod.rs

//! Domain models for the lookup application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod envelope;
mod fields;
mod report;
mod request;

// Re-export all public types
pub use config::{
    API_KEY_ENV, ApiConfig, BASE_URL_ENV, Config, LoggingConfig, OutputConfig, TIMEOUT_ENV,
    TIMEOUT_RANGE,
};
pub use envelope::{ERROR_KEY, RESULTS_KEY, ResultEnvelope, TEXT_KEY};
pub use fields::{CanonicalField, MappedFields, MappedValue, OTHERS_KEY, RAW_KEY};
pub use report::{ExportOutcome, LookupReport};
pub use request::{LookupRequest, NUMBER_PARAM, QueryStyle};
