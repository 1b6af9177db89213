use std::path::PathBuf;
use std::time::Duration;
use crate::retry::RetryPolicy;

pub const CATALOG_URL: &str = "https://shop.casio.ru/catalog/g-shock/filter/gender-is-male/apply/";
pub const ORIGIN: &str = "https://shop.casio.ru";
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36";
pub const PAGE_PARAM: &str = "PAGEN_1";

/// Everything the scraper needs to know about where to fetch from and where to write to.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_url: String,
    /// Prepended verbatim to every product `href`.
    pub origin: String,
    pub user_agent: String,
    pub page_param: String,
    /// Pause after each page 2..=count fetch.
    pub page_delay: Duration,
    pub max_redirects: usize,
    pub retry: RetryPolicy,
    /// Raw page dumps (`page_<i>.html`).
    pub data_dir: PathBuf,
    /// Dated CSV and JSON output.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_url: CATALOG_URL.to_string(),
            origin: ORIGIN.to_string(),
            user_agent: USER_AGENT.to_string(),
            page_param: PAGE_PARAM.to_string(),
            page_delay: Duration::from_secs(2),
            max_redirects: 10,
            retry: RetryPolicy::none(),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
        }
    }
}
