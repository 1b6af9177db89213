use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_article")]
    pub article: String,
    #[serde(rename = "product_url")]
    pub url: String,
    #[serde(rename = "product_price")]
    pub price: String,
}

impl Product {
    /// Column order matches `archiver::CSV_HEADER`.
    pub fn to_csv_record(&self) -> [&str; 3] {
        [self.article.as_str(), self.url.as_str(), self.price.as_str()]
    }
}
