use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cards::{CardClass, Lang};

const API_URL: &str = "https://shadowverse-wb.com/web/CardList/cardList";
const REFERER: &str = "https://shadowverse-wb.com/web/cardList";
const PAGE_SIZE: u32 = 30;
const MAX_ATTEMPTS: u32 = 3;
/// Backoff before retry `n` is `RETRY_BASE_DELAY * n`.
const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);
const PAGE_DELAY: Duration = Duration::from_millis(300);
const CLASS_DELAY: Duration = Duration::from_millis(200);
/// Per-request timeout covering connect + response body.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const OUTPUT_DIR: &str = "public";

/// Everything a download run needs to know, fixed before the first request.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub referer: String,
    pub classes: Vec<CardClass>,
    pub langs: Vec<Lang>,
    pub page_size: u32,
    pub max_attempts: u32,
    pub retry_base_delay: Duration,
    pub page_delay: Duration,
    pub class_delay: Duration,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(API_URL).expect("API_URL is a valid URL"),
            referer: REFERER.to_string(),
            classes: CardClass::ALL.to_vec(),
            langs: Lang::ALL.to_vec(),
            page_size: PAGE_SIZE,
            max_attempts: MAX_ATTEMPTS,
            retry_base_delay: RETRY_BASE_DELAY,
            page_delay: PAGE_DELAY,
            class_delay: CLASS_DELAY,
            request_timeout: REQUEST_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}

impl Config {
    /// Where the merged document for `lang` is written.
    pub fn output_path(&self, lang: Lang) -> PathBuf {
        self.output_dir.join(format!("cards_{lang}.json"))
    }

    /// Config aimed at a mock server: no politeness or backoff delays.
    #[cfg(test)]
    pub(crate) fn for_endpoint(endpoint: &str, output_dir: &std::path::Path) -> Self {
        Self {
            endpoint: Url::parse(endpoint).expect("test endpoint"),
            retry_base_delay: Duration::ZERO,
            page_delay: Duration::ZERO,
            class_delay: Duration::ZERO,
            output_dir: output_dir.to_path_buf(),
            ..Self::default()
        }
    }
}
