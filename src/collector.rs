use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::info;
use crate::archiver::{self, CsvSink, PageStore};
use crate::config::Config;
use crate::models::Product;
use crate::parser;

/// Extracts products from saved pages `1..pages_bound` into today's CSV and JSON files.
pub fn collect_data(store: &PageStore, pages_bound: usize, config: &Config) -> Result<Vec<Product>> {
    collect_data_on(store, pages_bound, config, Local::now().date_naive())
}

pub fn collect_data_on(
    store: &PageStore,
    pages_bound: usize,
    config: &Config,
    date: NaiveDate,
) -> Result<Vec<Product>> {
    let csv_path = config.output_dir.join(archiver::dated_file_name(date, "csv"));
    let json_path = config.output_dir.join(archiver::dated_file_name(date, "json"));
    let total = pages_bound.saturating_sub(1);

    let mut sink = CsvSink::create(&csv_path)?;
    let mut data = Vec::new();

    for page in 1..pages_bound {
        let html = store.load(page)?;
        for product in parser::parse_products(&html, &config.origin)? {
            sink.write(&product)?;
            data.push(product);
        }
        info!(page, total, "processed page");
    }
    sink.finish()?;

    archiver::save_to_file(&data, &json_path)?;
    info!(
        products = data.len(),
        csv = %csv_path.display(),
        json = %json_path.display(),
        "wrote results"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use crate::archiver::tests::scratch_dir;

    fn card(n: usize) -> String {
        format!(
            r#"<a class="product-item__link" href="/catalog/g-shock/{n}/">
                <p class="product-item__articul"> GA-{n} </p>
                <p class="product-item__price">руб. {n}990</p>
            </a>"#
        )
    }

    fn page(cards: std::ops::Range<usize>) -> String {
        let cards: String = cards.map(card).collect();
        format!("<html><body>{cards}</body></html>")
    }

    fn setup(name: &str, pages: &[String]) -> (Config, PageStore) {
        let root = scratch_dir(name);
        let config = Config {
            data_dir: root.join("data"),
            output_dir: root.clone(),
            ..Config::default()
        };
        let store = PageStore::new(&config.data_dir);
        for (i, html) in pages.iter().enumerate() {
            store.save(i + 1, html).unwrap();
        }
        (config, store)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
    }

    #[test]
    fn writes_csv_and_json_in_page_order() {
        let (config, store) = setup("collect_order", &[page(0..3), page(3..5)]);

        let data = collect_data_on(&store, 3, &config, date()).unwrap();

        let articles: Vec<&str> = data.iter().map(|p| p.article.as_str()).collect();
        assert_eq!(articles, vec!["GA-0", "GA-1", "GA-2", "GA-3", "GA-4"]);
        assert_eq!(data[4].url, "https://shop.casio.ru/catalog/g-shock/4/");
        assert_eq!(data[4].price, "4990");

        let csv = fs::read_to_string(config.output_dir.join("data_05_11_2024.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Артикул,Ссылка,Цена");
        assert_eq!(lines.iter().filter(|l| l.starts_with("Артикул")).count(), 1);
        assert_eq!(lines[1], "GA-0,https://shop.casio.ru/catalog/g-shock/0/,0990");

        let json = fs::read_to_string(config.output_dir.join("data_05_11_2024.json")).unwrap();
        let parsed: Vec<Product> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn bound_is_exclusive() {
        let (config, store) = setup("collect_bound", &[page(0..1), page(1..2), page(2..3)]);
        let data = collect_data_on(&store, 3, &config, date()).unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn empty_pages_leave_header_only() {
        let (config, store) = setup("collect_empty", &[page(0..0)]);
        let data = collect_data_on(&store, 2, &config, date()).unwrap();
        assert!(data.is_empty());

        let csv = fs::read_to_string(config.output_dir.join("data_05_11_2024.csv")).unwrap();
        assert_eq!(csv, "Артикул,Ссылка,Цена\n");
        let json = fs::read_to_string(config.output_dir.join("data_05_11_2024.json")).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn missing_page_file_aborts_without_json() {
        let (config, store) = setup("collect_missing", &[page(0..2)]);
        assert!(collect_data_on(&store, 3, &config, date()).is_err());

        // rows of page 1 are already on disk
        let csv = fs::read_to_string(config.output_dir.join("data_05_11_2024.csv")).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(!config.output_dir.join("data_05_11_2024.json").exists());
    }

    #[test]
    fn rerun_same_day_overwrites_outputs() {
        let (config, store) = setup("collect_rerun", &[page(0..2)]);
        collect_data_on(&store, 2, &config, date()).unwrap();
        collect_data_on(&store, 2, &config, date()).unwrap();

        let json = fs::read_to_string(config.output_dir.join("data_05_11_2024.json")).unwrap();
        let parsed: Vec<Product> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);

        let csv = fs::read_to_string(config.output_dir.join("data_05_11_2024.csv")).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }
}
