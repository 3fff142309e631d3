use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

use crate::{errors::UpdaterError, types::FileListing};

/// Fetches the list of files a server offers for one category.
#[derive(Debug, Clone)]
pub struct ListingClient {
    client: Client,
}

impl ListingClient {
    pub fn new(timeout: Duration) -> Result<Self, UpdaterError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| UpdaterError::listing(format!("failed to build HTTP client: {}", err)))?;
        Ok(Self { client })
    }

    /// GETs `base_url` and parses the body with [`parse_listing`].
    ///
    /// Transport errors and non-2xx statuses are failures; a successful
    /// response whose body yields no names is an empty listing.
    pub async fn list(&self, base_url: &str) -> Result<FileListing, UpdaterError> {
        debug!("fetching listing from {}", base_url);

        let response = self
            .client
            .get(base_url)
            .send()
            .await
            .map_err(|err| UpdaterError::listing(err.to_string()))?;

        if !response.status().is_success() {
            return Err(UpdaterError::listing(format!(
                "HTTP status code: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| UpdaterError::listing(err.to_string()))?;

        let files = parse_listing(&body);
        debug!("listing from {} has {} entries", base_url, files.len());
        Ok(files)
    }
}

/// A JSON array gives one name per element; anything else is read as
/// plaintext with one name per non-blank line.
pub fn parse_listing(body: &str) -> FileListing {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(body) {
        trace!("listing parsed as JSON array");
        return items
            .into_iter()
            .map(|item| match item {
                Value::String(name) => name,
                other => other.to_string(),
            })
            .collect();
    }

    body.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_array_keeps_order() {
        let files = parse_listing(r#"["pedal-v2.bin", "pedal-v1.bin", "pedal-v2.bin"]"#);
        assert_eq!(files, vec!["pedal-v2.bin", "pedal-v1.bin", "pedal-v2.bin"]);
    }

    #[test]
    fn json_scalars_are_stringified() {
        let files = parse_listing(r#"["a.bin", 7, true]"#);
        assert_eq!(files, vec!["a.bin", "7", "true"]);
    }

    #[test]
    fn plaintext_lines_are_trimmed() {
        let files = parse_listing("  reverb.bin \r\n\n\tdelay.bin\n   \nfuzz.bin\n");
        assert_eq!(files, vec!["reverb.bin", "delay.bin", "fuzz.bin"]);
    }

    #[test]
    fn json_that_is_not_an_array_is_plaintext() {
        assert_eq!(parse_listing(r#""single.bin""#), vec![r#""single.bin""#]);
        assert_eq!(parse_listing("{\"a\": 1}"), vec!["{\"a\": 1}"]);
    }

    #[test]
    fn blank_bodies_are_empty() {
        assert!(parse_listing("").is_empty());
        assert!(parse_listing(" \n\r\n\t").is_empty());
        assert!(parse_listing("[]").is_empty());
    }
}
