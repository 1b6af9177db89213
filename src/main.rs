mod archiver;
mod collector;
mod config;
mod fetcher;
mod models;
mod parser;
mod retry;

use anyhow::Result;
use tracing::info;

use crate::archiver::PageStore;
use crate::config::Config;
use crate::fetcher::HttpFetcher;
use crate::parser::SecondToLastLink;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::default();
    let http = HttpFetcher::new(&config)?;
    let store = PageStore::new(&config.data_dir);

    let pages_bound = fetcher::fetch_all_pages(&http, &store, &SecondToLastLink::default(), &config)?;
    let products = collector::collect_data(&store, pages_bound, &config)?;

    info!("Archived {} products.", products.len());
    Ok(())
}
