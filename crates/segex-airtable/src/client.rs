//! HTTP client for the Airtable REST API.
//!
//! Wraps `reqwest` with bearer-token auth, typed response deserialization,
//! and offset-token pagination for the list endpoint. Non-2xx responses are
//! surfaced as [`AirtableError::UnexpectedStatus`] with the response body so
//! callers can log what the API said.

use std::time::Duration;

use reqwest::{Client, Method, Url};

use crate::error::AirtableError;
use crate::types::{ApiRecord, ListRecordsResponse};

const DEFAULT_BASE_URL: &str = "https://api.airtable.com/v0/";

/// Maximum number of pages to follow for a single list call.
/// Prevents infinite loops on a cycling offset token.
const MAX_PAGES: usize = 50;

/// Client for one table of one Airtable base.
///
/// Use [`AirtableClient::new`] for production or
/// [`AirtableClient::with_base_url`] to point at a mock server in tests.
pub struct AirtableClient {
    client: Client,
    api_key: String,
    table_url: Url,
}

impl AirtableClient {
    /// Creates a new client pointed at the production Airtable API.
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AirtableError::InvalidBaseUrl`] if the
    /// base/table ids do not form a valid URL.
    pub fn new(
        api_key: &str,
        base_id: &str,
        table_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, AirtableError> {
        Self::with_base_url(api_key, base_id, table_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AirtableError::InvalidBaseUrl`] if
    /// `base_url` joined with the base/table ids is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        base_id: &str,
        table_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AirtableError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("segex/0.1 (campaign-exclusions)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so the
        // join appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let table_url = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("{base_id}/{table_id}")))
            .map_err(|e| AirtableError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            table_url,
        })
    }

    /// Fetches one page of records matching `filter_formula`, requesting only
    /// the given field ids.
    ///
    /// Pass the `offset` token from the previous page to continue a listing;
    /// `None` starts from the first page. The returned response carries the
    /// next offset token while more pages remain.
    ///
    /// # Errors
    ///
    /// - [`AirtableError::Http`] on network failure.
    /// - [`AirtableError::UnexpectedStatus`] on a non-2xx response.
    /// - [`AirtableError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn list_page(
        &self,
        filter_formula: &str,
        fields: &[&str],
        offset: Option<&str>,
    ) -> Result<ListRecordsResponse, AirtableError> {
        let mut url = self.table_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("filterByFormula", filter_formula);
            for field in fields {
                pairs.append_pair("fields[]", field);
            }
            if let Some(token) = offset {
                pairs.append_pair("offset", token);
            }
        }

        let body = self.request_json(Method::GET, url, None).await?;
        serde_json::from_value(body).map_err(|e| AirtableError::Deserialize {
            context: format!("list({filter_formula})"),
            source: e,
        })
    }

    /// Fetches all records matching `filter_formula`, following the offset
    /// token until the listing is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates any [`list_page`](Self::list_page) error, and returns
    /// [`AirtableError::PaginationLimit`] if the offset token never runs out
    /// within `MAX_PAGES` pages.
    pub async fn list_all(
        &self,
        filter_formula: &str,
        fields: &[&str],
    ) -> Result<Vec<ApiRecord>, AirtableError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let page = self
                .list_page(filter_formula, fields, offset.as_deref())
                .await?;
            records.extend(page.records);

            match page.offset {
                Some(token) => offset = Some(token),
                None => return Ok(records),
            }
        }

        Err(AirtableError::PaginationLimit {
            context: filter_formula.to_owned(),
            max_pages: MAX_PAGES,
        })
    }

    /// Writes a single field of a single record via PATCH.
    ///
    /// Only the named field is touched; all other cells keep their values.
    ///
    /// # Errors
    ///
    /// - [`AirtableError::Http`] on network failure.
    /// - [`AirtableError::UnexpectedStatus`] on a non-2xx response (e.g. an
    ///   unknown record id or field id).
    pub async fn update_record(
        &self,
        record_id: &str,
        field_id: &str,
        value: &str,
    ) -> Result<(), AirtableError> {
        let url = self.record_url(record_id);
        let payload = serde_json::json!({
            "fields": { field_id: value }
        });
        self.request_json(Method::PATCH, url, Some(payload)).await?;
        Ok(())
    }

    /// URL for a single record: the table URL plus the record id segment.
    fn record_url(&self, record_id: &str) -> Url {
        let mut url = self.table_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(record_id);
        }
        url
    }

    /// Sends a request with bearer auth, asserts a 2xx status, and parses the
    /// response body as JSON.
    async fn request_json(
        &self,
        method: Method,
        url: Url,
        json_body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, AirtableError> {
        let mut request = self
            .client
            .request(method, url.clone())
            .bearer_auth(&self.api_key);
        if let Some(body) = json_body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AirtableError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| AirtableError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
