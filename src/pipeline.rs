//! The download run: walk every class page by page for each language, then write one file per language.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::aggregate::Accumulator;
use crate::api::types::PagePayload;
use crate::api::{ApiError, CardListClient};
use crate::cards::{CardClass, Lang};
use crate::config::Config;
use crate::output::{self, OutputError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetching class={class} offset={offset} lang={lang} failed: {source}")]
    Api {
        class: CardClass,
        offset: u32,
        lang: Lang,
        #[source]
        source: ApiError,
    },

    #[error("class={class} lang={lang}: first page did not report a card count")]
    MissingCount { class: CardClass, lang: Lang },

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Source of card list pages.
/// Implemented by `CardListClient` for production; scripted implementations used in tests.
pub trait CardSource {
    async fn fetch_page(
        &self,
        class: CardClass,
        offset: u32,
        lang: Lang,
    ) -> Result<PagePayload, ApiError>;
}

impl CardSource for CardListClient {
    async fn fetch_page(
        &self,
        class: CardClass,
        offset: u32,
        lang: Lang,
    ) -> Result<PagePayload, ApiError> {
        CardListClient::fetch_page(self, class, offset, lang).await
    }
}

/// What one language's run produced.
#[derive(Debug)]
pub struct LanguageSummary {
    pub lang: Lang,
    pub path: PathBuf,
    pub card_details: usize,
    pub fetched_details: usize,
    pub pages: usize,
}

async fn fetch(
    source: &impl CardSource,
    class: CardClass,
    offset: u32,
    lang: Lang,
) -> Result<PagePayload, PipelineError> {
    source
        .fetch_page(class, offset, lang)
        .await
        .map_err(|source| PipelineError::Api {
            class,
            offset,
            lang,
            source,
        })
}

/// Fetch every page of every configured class for `lang`.
///
/// The count reported by a class's first page bounds its pagination; counts on
/// later pages are ignored and may be absent. Offsets step by `page_size` while
/// they stay below it, so a zero or negative count fetches only the first page.
pub async fn fetch_language(
    source: &impl CardSource,
    config: &Config,
    lang: Lang,
) -> Result<Accumulator, PipelineError> {
    let step = config.page_size.max(1);
    let mut acc = Accumulator::new();

    for &class in &config.classes {
        let first = fetch(source, class, 0, lang).await?;
        let Some(count) = first.count else {
            return Err(PipelineError::MissingCount { class, lang });
        };
        let fetched = acc.merge_page(first);
        println!(
            "  [{lang}] class={class} ({}) offset=0 fetched={fetched} total_for_class={count}",
            class.name()
        );

        let mut offset = step;
        while i64::from(offset) < count {
            let page = fetch(source, class, offset, lang).await?;
            let fetched = acc.merge_page(page);
            println!(
                "  [{lang}] class={class} ({}) offset={offset} fetched={fetched}",
                class.name()
            );
            let Some(next) = offset.checked_add(step) else {
                break;
            };
            offset = next;
            debug!(delay_ms = config.page_delay.as_millis() as u64, "pausing between pages");
            tokio::time::sleep(config.page_delay).await;
        }

        tokio::time::sleep(config.class_delay).await;
    }

    println!(
        "  [{lang}] Total unique card details: {}",
        acc.card_details().len()
    );
    Ok(acc)
}

/// Fetch and write every configured language in order. Stops at the first error.
pub async fn run(
    source: &impl CardSource,
    config: &Config,
) -> Result<Vec<LanguageSummary>, PipelineError> {
    output::ensure_dir(&config.output_dir).await?;

    let mut summaries = Vec::with_capacity(config.langs.len());
    for &lang in &config.langs {
        println!("Fetching cards for lang={lang}...");
        let acc = fetch_language(source, config, lang).await?;
        let fetched_details = acc.fetched_details();
        let pages = acc.pages();
        let doc = acc.into_document();

        let path = config.output_path(lang);
        output::write_document(&path, &doc).await?;
        println!(
            "Saved {} ({} card details)\n",
            path.display(),
            doc.card_details.len()
        );
        info!(%lang, pages, details = doc.card_details.len(), "language complete");

        summaries.push(LanguageSummary {
            lang,
            path,
            card_details: doc.card_details.len(),
            fetched_details,
            pages,
        });
    }

    println!("Done!");
    Ok(summaries)
}
