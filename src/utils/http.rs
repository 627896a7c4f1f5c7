// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::Result;
use crate::models::{ApiConfig, LookupRequest, QueryStyle};

/// Create a configured asynchronous HTTP client.
///
/// The client-wide timeout is the upper bound; each request sets its own.
pub fn create_client(config: &ApiConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs.max(1)))
        .build()?;
    Ok(client)
}

/// Full GET URL for a request, query parameters appended to any already present.
pub fn build_url(request: &LookupRequest) -> Result<Url> {
    let mut url = Url::parse(request.base_url())?;
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in request.query_pairs() {
            pairs.append_pair(name, value);
        }
    }
    Ok(url)
}

/// URL with the API key value masked, for logging.
pub fn redacted_url(request: &LookupRequest) -> String {
    let Ok(mut url) = Url::parse(request.base_url()) else {
        return request.base_url().to_string();
    };
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in request.query_pairs() {
            let is_key =
                request.query_style() == QueryStyle::KeyTerm && name == request.key_param();
            pairs.append_pair(name, if is_key { "***" } else { value });
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(base: &str) -> LookupRequest {
        LookupRequest::new("+91 98", base, "key", "s3cret", "term", 5).unwrap()
    }

    #[test]
    fn appends_key_and_term() {
        let url = build_url(&request("https://api.example.com/")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/?key=s3cret&term=%2B91+98"
        );
    }

    #[test]
    fn keeps_existing_query() {
        let url = build_url(&request("https://api.example.com/v1?fmt=json")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1?fmt=json&key=s3cret&term=%2B91+98"
        );
    }

    #[test]
    fn number_style_sends_single_param() {
        let req = request("https://api.example.com/").with_query_style(QueryStyle::Number);
        let url = build_url(&req).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/?number=%2B91+98");
    }

    #[test]
    fn rejects_malformed_base_url() {
        assert!(build_url(&request("not a url")).is_err());
    }

    #[test]
    fn redaction_hides_key() {
        let shown = redacted_url(&request("https://api.example.com/"));
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("term=%2B91+98"));
    }
}
