// src/services/presenter.rs

//! Console rendering of lookup reports.
//!
//! Produces the text a user sees: status line, summary cards, the overflow
//! section, raw JSON and the export outcome. Rendering returns strings so the
//! caller decides where they go.

use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;
use crate::models::{CanonicalField, ExportOutcome, LookupReport};
use crate::services::mapper::is_truthy;

/// Longest card value shown before truncation, in graphemes.
const MAX_CARD_WIDTH: usize = 80;

/// Width of header and separator rules.
const RULE_WIDTH: usize = 60;

/// Presentation switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print the overflow bucket instead of only counting its keys
    pub show_others: bool,
}

/// Render a report as human-readable text.
pub fn render_text(report: &LookupReport, options: &RenderOptions) -> String {
    let mut out = Vec::new();
    let rule = "═".repeat(RULE_WIDTH);

    out.push(rule.clone());
    out.push(format!("  NumInfo lookup: {}", report.term));
    out.push(rule);

    let status = report
        .envelope
        .status_code()
        .map_or_else(|| "N/A".to_string(), |s| s.to_string());
    out.push(format!("API Response Status: {}", status));
    if let Some(error) = report.envelope.error() {
        out.push(format!("Error: {}", error));
    }

    out.push(String::new());
    out.push("[SUMMARY]".to_string());
    let cards = summary_cards(report);
    if cards.is_empty() {
        out.push("    No known fields in this response".to_string());
    }
    for (label, value) in cards {
        out.push(format!("    {}: {}", label, value));
    }

    if let Some(others) = report.mapped.as_ref().and_then(|m| m.others()) {
        out.push(String::new());
        if options.show_others {
            out.push("[OTHER FIELDS]".to_string());
            let pretty = serde_json::to_string_pretty(others).unwrap_or_default();
            out.extend(pretty.lines().map(|l| format!("    {}", l)));
        } else {
            out.push(format!(
                "[OTHER FIELDS] {} key(s) hidden, use --show-others to expand",
                others.len()
            ));
        }
    }

    out.push(String::new());
    out.push("[RAW JSON]".to_string());
    let raw = serde_json::to_string_pretty(report.envelope.data()).unwrap_or_default();
    out.extend(raw.lines().map(str::to_string));

    match &report.export {
        Some(ExportOutcome::Written { path, rows }) => {
            out.push(String::new());
            out.push(format!("[EXPORT] Wrote {} row(s) to {}", rows, path.display()));
        }
        Some(ExportOutcome::Failed { message }) => {
            out.push(String::new());
            out.push(format!("[EXPORT] Could not generate CSV: {}", message));
        }
        None => {}
    }

    out.push("─".repeat(RULE_WIDTH));
    out.join("\n")
}

/// Render a report as a single pretty JSON document.
pub fn render_json(report: &LookupReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Labeled summary values in canonical order.
///
/// Uses the mapping when there is one; otherwise only raw keys that already
/// carry a canonical name are shown.
pub fn summary_cards(report: &LookupReport) -> Vec<(&'static str, String)> {
    match &report.mapped {
        Some(mapped) => mapped
            .fields()
            .iter()
            .map(|m| (m.field.label(), card_value(&m.value)))
            .collect(),
        None => {
            let Some(object) = report.envelope.data().as_object() else {
                return Vec::new();
            };
            CanonicalField::ALL
                .iter()
                .filter_map(|field| {
                    object
                        .get(field.as_str())
                        .map(|v| (field.label(), card_value(v)))
                })
                .collect()
        }
    }
}

/// Display form of a card value: falsy shows as `N/A`, long text is cut.
fn card_value(value: &Value) -> String {
    if !is_truthy(value) {
        return "N/A".to_string();
    }
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    truncate(&text, MAX_CARD_WIDTH)
}

fn truncate(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    let mut cut: String = graphemes[..max - 1].concat();
    cut.push('…');
    cut
}
