// src/pipeline/lookup.rs

//! Lookup pipeline: validate input, fetch, map, export.

use std::path::PathBuf;

use crate::error::Result;
use crate::models::{Config, ExportOutcome, LookupReport};
use crate::pipeline::export::export_csv;
use crate::services::{Fetcher, map_fields};

/// Per-invocation switches.
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Serve a canned record instead of calling the API
    pub mock: bool,

    /// Produce the canonical field mapping
    pub auto_map: bool,

    /// Write `numinfo_<term>.csv` into this directory
    pub export_dir: Option<PathBuf>,
}

/// Run one lookup.
///
/// Only input problems (empty term, missing key, bad timeout) are returned as
/// `Err`, and always before any fetch. Transport and export failures end up in
/// the report.
pub async fn run_lookup(
    config: &Config,
    fetcher: &Fetcher,
    term: &str,
    options: &LookupOptions,
) -> Result<LookupReport> {
    let request = config.request_for(term, options.mock)?;
    log::info!(
        "Looking up {:?}{}",
        request.term(),
        if options.mock { " (mock)" } else { "" }
    );

    let envelope = fetcher.fetch(&request, options.mock).await;
    let mapped = options.auto_map.then(|| map_fields(envelope.data()));

    let export = options.export_dir.as_ref().map(|dir| {
        match export_csv(dir, request.term(), envelope.data()) {
            Ok(summary) => ExportOutcome::Written {
                path: summary.path,
                rows: summary.rows,
            },
            Err(e) => {
                log::warn!("Could not generate CSV: {}", e);
                ExportOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    });

    Ok(LookupReport {
        term: request.term().to_string(),
        envelope,
        mapped,
        export,
    })
}
