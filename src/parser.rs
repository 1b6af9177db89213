use scraper::{ElementRef, Html, Selector};
use anyhow::{anyhow, bail, Context, Result};
use crate::models::Product;

pub const PRODUCT_LINK: &str = "a.product-item__link";
pub const PRODUCT_ARTICLE: &str = "p.product-item__articul";
pub const PRODUCT_PRICE: &str = "p.product-item__price";
pub const PRICE_PREFIX: &str = "руб. ";
pub const PAGINATION_CONTAINER: &str = "div.bx-pagination-container";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector `{css}`: {e:?}"))
}

fn text_of(el: ElementRef) -> String {
    el.text().collect()
}

/// Reads the total page count out of the first listing page.
pub trait PageCountStrategy {
    fn page_count(&self, doc: &Html) -> Result<usize>;
}

/// Takes the second-to-last link of the pagination container as the page count.
/// The last link is the "next" arrow.
pub struct SecondToLastLink {
    pub container: String,
}

impl Default for SecondToLastLink {
    fn default() -> Self {
        SecondToLastLink { container: PAGINATION_CONTAINER.to_string() }
    }
}

impl PageCountStrategy for SecondToLastLink {
    fn page_count(&self, doc: &Html) -> Result<usize> {
        let container_sel = selector(&self.container)?;
        let link_sel = selector("a")?;

        let container = doc
            .select(&container_sel)
            .next()
            .with_context(|| format!("pagination container `{}` not found", self.container))?;

        let links: Vec<ElementRef> = container.select(&link_sel).collect();
        if links.len() < 2 {
            bail!("pagination container has {} link(s), need at least 2", links.len());
        }

        let text = text_of(links[links.len() - 2]);
        text.trim()
            .parse::<usize>()
            .with_context(|| format!("page count link text `{}` is not a number", text.trim()))
    }
}

/// Removes the currency label once. Text without the label is returned as is.
pub fn strip_price_prefix(raw: &str) -> &str {
    raw.strip_prefix(PRICE_PREFIX).unwrap_or(raw)
}

pub fn product_url(origin: &str, href: &str) -> String {
    format!("{origin}{href}")
}

/// Extracts every product card of a listing page, in document order.
pub fn parse_products(html: &str, origin: &str) -> Result<Vec<Product>> {
    let doc = Html::parse_document(html);
    let link_sel = selector(PRODUCT_LINK)?;
    let article_sel = selector(PRODUCT_ARTICLE)?;
    let price_sel = selector(PRODUCT_PRICE)?;

    let mut products = Vec::new();
    for (idx, card) in doc.select(&link_sel).enumerate() {
        let article = card
            .select(&article_sel)
            .next()
            .with_context(|| format!("product #{idx}: `{PRODUCT_ARTICLE}` not found"))?;
        let price = card
            .select(&price_sel)
            .next()
            .with_context(|| format!("product #{idx}: `{PRODUCT_PRICE}` not found"))?;
        let href = card
            .value()
            .attr("href")
            .with_context(|| format!("product #{idx}: link has no href"))?;

        products.push(Product {
            article: text_of(article).trim().to_string(),
            url: product_url(origin, href),
            price: strip_price_prefix(&text_of(price)).to_string(),
        });
    }

    Ok(products)
}
