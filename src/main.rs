mod aggregate;
mod api;
mod cards;
mod config;
mod output;
mod pipeline;
mod retry;

pub const USER_AGENT: &str = concat!("svwb-cards/", env!("CARGO_PKG_VERSION"));

use std::path::PathBuf;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use api::CardListClient;
use cards::{CardClass, Lang};
use config::Config;

/// Download the Shadowverse: Worlds Beyond card list into per-language JSON files.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory the `cards_<lang>.json` files are written to
    #[arg(long, value_name = "PATH")]
    output_dir: Option<PathBuf>,

    /// Only fetch this language (repeatable; default: all)
    #[arg(long = "lang", value_enum)]
    langs: Vec<Lang>,

    /// Only fetch this class id, 0-7 (repeatable; default: all)
    #[arg(long = "class", value_parser = parse_class)]
    classes: Vec<CardClass>,
}

fn parse_class(raw: &str) -> Result<CardClass, String> {
    raw.parse::<u8>()
        .ok()
        .and_then(CardClass::new)
        .ok_or_else(|| format!("'{raw}' is not a class id between 0 and 7"))
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::default();
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if !self.langs.is_empty() {
            config.langs = self.langs;
        }
        if !self.classes.is_empty() {
            let mut classes = self.classes;
            classes.sort_unstable();
            classes.dedup();
            config.classes = classes;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("svwb_cards=info".parse()?),
        )
        .init();

    let config = Cli::parse().into_config();
    info!(endpoint = %config.endpoint, output_dir = %config.output_dir.display(), "starting card list download");

    let http = Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()?;
    let client = CardListClient::new(http, &config);

    let summaries = pipeline::run(&client, &config)
        .await
        .inspect_err(|e| tracing::error!("download failed: {e}"))?;

    for summary in &summaries {
        info!(
            lang = %summary.lang,
            path = %summary.path.display(),
            details = summary.card_details,
            fetched = summary.fetched_details,
            pages = summary.pages,
            "written"
        );
    }
    Ok(())
}
