use std::thread;
use anyhow::{Context, Result};
use reqwest::{redirect, Url};
use scraper::Html;
use tracing::{debug, info};
use crate::archiver::PageStore;
use crate::config::Config;
use crate::parser::PageCountStrategy;
use crate::retry::RetryPolicy;

/// Anything that can turn a URL into page markup.
pub trait HtmlSource {
    fn fetch_html(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let max_redirects = config.max_redirects;
        let redirect_policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() > max_redirects {
                attempt.error(format!("Too many redirects (>{max_redirects})"))
            } else {
                attempt.follow()
            }
        });

        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(redirect_policy)
            .build()?;

        Ok(HttpFetcher { client, retry: config.retry })
    }
}

impl HtmlSource for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        self.retry.run(|attempt| {
            debug!(url, attempt, "GET");
            let body = self.client
                .get(url)
                .send()
                .with_context(|| format!("requesting {url}"))?
                .text()
                .with_context(|| format!("reading body of {url}"))?;
            Ok(body)
        })
    }
}

/// Listing URL for page `page` (2 and up); page 1 is the bare catalog URL.
pub fn page_url(config: &Config, page: usize) -> Result<String> {
    let mut url = Url::parse(&config.catalog_url)
        .with_context(|| format!("invalid catalog url {}", config.catalog_url))?;
    url.query_pairs_mut().append_pair(&config.page_param, &page.to_string());
    Ok(url.into())
}

/// Downloads every listing page into `store` and returns the page count plus one,
/// i.e. the exclusive upper bound of the saved page indices.
pub fn fetch_all_pages(
    source: &dyn HtmlSource,
    store: &PageStore,
    strategy: &dyn PageCountStrategy,
    config: &Config,
) -> Result<usize> {
    let first = source.fetch_html(&config.catalog_url)?;
    store.save(1, &first)?;

    let saved = store.load(1)?;
    let pages_count = strategy
        .page_count(&Html::parse_document(&saved))
        .context("reading page count from page 1")?;
    info!(pages_count, "found listing pages");

    for page in 2..=pages_count {
        let url = page_url(config, page)?;
        let html = source.fetch_html(&url)?;
        store.save(page, &html)?;
        debug!(page, url = %url, "saved page");

        thread::sleep(config.page_delay);
    }

    Ok(pages_count + 1)
}
