//! Lookup request structure.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::TIMEOUT_RANGE;

/// Query parameter used by the simplified API variant.
pub const NUMBER_PARAM: &str = "number";

/// Shape of the outbound query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryStyle {
    /// `?<key_param>=<key>&<term_param>=<term>`
    #[default]
    KeyTerm,
    /// `?number=<term>`
    Number,
}

/// Everything needed to perform one lookup.
///
/// Built once per invocation and never modified afterwards; fields are only
/// reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    term: String,
    base_url: String,
    key_param: String,
    key_value: String,
    term_param: String,
    timeout_secs: u64,
    query_style: QueryStyle,
}

impl LookupRequest {
    /// Create a request, rejecting an empty term or an out-of-range timeout.
    pub fn new(
        term: &str,
        base_url: &str,
        key_param: &str,
        key_value: impl Into<String>,
        term_param: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        Self::check_term(term)?;
        if !TIMEOUT_RANGE.contains(&timeout_secs) {
            return Err(AppError::input(format!(
                "Timeout must be between {} and {} seconds, got {}",
                TIMEOUT_RANGE.start(),
                TIMEOUT_RANGE.end(),
                timeout_secs
            )));
        }

        Ok(Self {
            term: term.trim().to_string(),
            base_url: base_url.to_string(),
            key_param: key_param.to_string(),
            key_value: key_value.into(),
            term_param: term_param.to_string(),
            timeout_secs,
            query_style: QueryStyle::KeyTerm,
        })
    }

    /// Reject empty or whitespace-only terms.
    pub fn check_term(term: &str) -> Result<()> {
        if term.trim().is_empty() {
            return Err(AppError::input("Please enter a search term."));
        }
        Ok(())
    }

    /// Switch the query string shape.
    pub fn with_query_style(mut self, style: QueryStyle) -> Self {
        self.query_style = style;
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn key_param(&self) -> &str {
        &self.key_param
    }

    pub fn key_value(&self) -> &str {
        &self.key_value
    }

    pub fn term_param(&self) -> &str {
        &self.term_param
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn query_style(&self) -> QueryStyle {
        self.query_style
    }

    /// Query pairs in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        match self.query_style {
            QueryStyle::KeyTerm => vec![
                (self.key_param.as_str(), self.key_value.as_str()),
                (self.term_param.as_str(), self.term.as_str()),
            ],
            QueryStyle::Number => vec![(NUMBER_PARAM, self.term.as_str())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(term: &str, timeout: u64) -> Result<LookupRequest> {
        LookupRequest::new(term, "https://api.example.com/", "key", "k", "term", timeout)
    }

    #[test]
    fn rejects_empty_and_blank_terms() {
        assert!(matches!(request("", 5), Err(AppError::Input(_))));
        assert!(matches!(request("   ", 5), Err(AppError::Input(_))));
    }

    #[test]
    fn rejects_timeout_outside_range() {
        assert!(request("1", 0).is_err());
        assert!(request("1", 31).is_err());
        assert!(request("1", 1).is_ok());
        assert!(request("1", 30).is_ok());
    }

    #[test]
    fn trims_term() {
        assert_eq!(request("  +91 98 ", 5).unwrap().term(), "+91 98");
    }

    #[test]
    fn key_term_query_pairs() {
        let req = request("12345", 5).unwrap();
        assert_eq!(req.query_pairs(), vec![("key", "k"), ("term", "12345")]);
    }

    #[test]
    fn number_query_pairs() {
        let req = request("12345", 5)
            .unwrap()
            .with_query_style(QueryStyle::Number);
        assert_eq!(req.query_pairs(), vec![("number", "12345")]);
    }
}
