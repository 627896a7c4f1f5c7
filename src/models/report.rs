//! Outcome of one lookup as handed to the presenter.

use std::path::PathBuf;

use serde::Serialize;

use crate::models::{MappedFields, ResultEnvelope};

/// What happened to the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportOutcome {
    /// File written
    Written { path: PathBuf, rows: usize },
    /// Export failed; the lookup itself is unaffected
    Failed { message: String },
}

/// Everything one lookup produced.
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    /// The term as sent
    pub term: String,

    /// Normalized API response
    #[serde(flatten)]
    pub envelope: ResultEnvelope,

    /// Canonical view, present when auto-mapping was on
    pub mapped: Option<MappedFields>,

    /// CSV export result, present when an export was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportOutcome>,
}
