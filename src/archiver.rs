use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use crate::models::Product;

pub const CSV_HEADER: [&str; 3] = ["Артикул", "Ссылка", "Цена"];

/// `data_<dd_mm_YYYY>.<ext>`
pub fn dated_file_name(date: NaiveDate, ext: &str) -> String {
    format!("data_{}.{ext}", date.format("%d_%m_%Y"))
}

/// Raw listing pages on disk, one `page_<i>.html` per 1-based index.
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PageStore { dir: dir.into() }
    }

    pub fn page_path(&self, page: usize) -> PathBuf {
        self.dir.join(format!("page_{page}.html"))
    }

    pub fn save(&self, page: usize, html: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.page_path(page);
        fs::write(&path, html).with_context(|| format!("writing {}", path.display()))
    }

    pub fn load(&self, page: usize) -> Result<String> {
        let path = self.page_path(page);
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }
}

/// CSV output held open for one extraction pass. The header goes out on creation
/// and every row is flushed as soon as it is written.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;
        Ok(CsvSink { path, writer })
    }

    pub fn write(&mut self, product: &Product) -> Result<()> {
        self.writer
            .write_record(product.to_csv_record())
            .with_context(|| format!("writing row to {}", self.path.display()))?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the whole result set as one pretty-printed array, replacing any earlier file.
pub fn save_to_file(products: &[Product], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, products)?;
    writer.flush()?;
    Ok(())
}
