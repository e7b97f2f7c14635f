pub mod types;

use reqwest::Client;
use tracing::{Instrument, debug, info_span};

use crate::cards::{CardClass, Lang};
use crate::config::Config;
use crate::retry::{Retriable, RetryPolicy, with_retry};

use types::{CardListResponse, PagePayload};

/// Errors returned while fetching one page of the card list.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Card list API error ({code}): {snippet}")]
    Status { code: u16, snippet: String },

    #[error("Response is not JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    Schema(#[source] serde_json::Error),
}

impl Retriable for ApiError {
    /// Transport failures, HTTP errors and garbled bodies are retried.
    /// A JSON body with the wrong shape will not fix itself.
    fn is_retriable(&self) -> bool {
        !matches!(self, ApiError::Schema(_))
    }
}

/// HTTP client for the official card list endpoint.
///
/// Each call to [`CardListClient::fetch_page`] sends one request at a time and retries
/// transient failures with linear backoff according to the [`Config`].
#[derive(Clone)]
pub struct CardListClient {
    http: Client,
    config: Config,
}

impl CardListClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            config: config.clone(),
        }
    }

    /// Fetch one page of `class` starting at `offset`, retrying transient errors.
    pub async fn fetch_page(
        &self,
        class: CardClass,
        offset: u32,
        lang: Lang,
    ) -> Result<PagePayload, ApiError> {
        let policy = RetryPolicy {
            max_attempts: self.config.max_attempts,
            base_delay: self.config.retry_base_delay,
        };
        let span = info_span!("page", class = class.id(), offset, %lang);
        with_retry(
            policy,
            || self.request_page(class, offset, lang),
            tokio::time::sleep,
        )
        .instrument(span)
        .await
    }

    async fn request_page(
        &self,
        class: CardClass,
        offset: u32,
        lang: Lang,
    ) -> Result<PagePayload, ApiError> {
        let mut url = self.config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("class", &class.id().to_string())
            .append_pair("lang", lang.as_str());

        let response = self
            .http
            .get(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Referer", &self.config.referer)
            .header("User-Agent", crate::USER_AGENT)
            .header("lang", lang.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            debug!(status = %status, "card list API error");
            return Err(ApiError::Status {
                code: status.as_u16(),
                snippet,
            });
        }

        let bytes = response.bytes().await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes).map_err(ApiError::Decode)?;
        let parsed: CardListResponse = serde_json::from_value(body).map_err(ApiError::Schema)?;
        debug!(
            count = ?parsed.data.count,
            details = parsed.data.card_details.len(),
            "page fetched"
        );
        Ok(parsed.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_error() -> serde_json::Error {
        serde_json::from_str::<CardListResponse>("{}").unwrap_err()
    }

    #[test]
    fn schema_errors_are_not_retried() {
        assert!(!ApiError::Schema(schema_error()).is_retriable());
    }

    #[test]
    fn status_and_decode_errors_are_retried() {
        let status = ApiError::Status {
            code: 503,
            snippet: String::new(),
        };
        assert!(status.is_retriable());
        let decode = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(ApiError::Decode(decode).is_retriable());
    }
}
