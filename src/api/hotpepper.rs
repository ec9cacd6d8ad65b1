//! Hot Pepper Gourmet directory client.
//!
//! One GET per page against the gourmet search endpoint with
//! `key, start, count, keyword, format=json`. No retries and no timeout
//! beyond reqwest's defaults.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{NetworkError, RestaurantDirectory, SearchQuery};
use super::types::{Restaurant, SearchEnvelope};

pub const DEFAULT_BASE_URL: &str = "https://webservice.recruit.co.jp/hotpepper/gourmet/v1/";

pub struct HotPepperClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl HotPepperClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Decodes a response body into the shop list.
///
/// An `error` list wins over a `shop` list. A body with neither is a
/// schema mismatch.
pub fn parse_search_body(body: &str) -> Result<Vec<Restaurant>, NetworkError> {
    let envelope: SearchEnvelope =
        serde_json::from_str(body).map_err(|e| NetworkError::Decode(e.to_string()))?;

    if let Some(first) = envelope.results.error.as_ref().and_then(|errors| errors.first()) {
        let code = match &first.code {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(NetworkError::Api {
            code,
            message: first.message.clone(),
        });
    }

    envelope
        .results
        .shop
        .ok_or_else(|| NetworkError::Decode("response has no shop list".to_string()))
}

#[async_trait]
impl RestaurantDirectory for HotPepperClient {
    fn name(&self) -> &str {
        "hotpepper"
    }

    async fn search(&self, query: SearchQuery<'_>) -> Result<Vec<Restaurant>, NetworkError> {
        info!(
            "Directory request: keyword={:?}, start={}, count={}",
            query.keyword, query.start, query.count
        );

        let start = query.start.to_string();
        let count = query.count.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("start", start.as_str()),
                ("count", count.as_str()),
                ("keyword", query.keyword),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        debug!("Directory response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Directory HTTP error: {} - {}", status, body);
            return Err(NetworkError::Status { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        let shops = parse_search_body(&body).inspect_err(|e| warn!("Directory search failed: {}", e))?;
        info!("Directory returned {} shops", shops.len());
        Ok(shops)
    }
}
