//! CSV price table adapter.
//!
//! Reads a wide daily table: `Date,SYM1,SYM2,...` with one row per trading
//! day. Rows with the wrong number of fields or an unparsable price are
//! skipped with a warning; the rest of the file is still loaded.

use crate::domain::error::SmagridError;
use crate::domain::price_table::PriceTable;
use crate::ports::data_port::DataPort;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Parses table content already read into memory.
    pub fn parse(content: &str) -> Result<PriceTable, SmagridError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let header = rdr.headers().map_err(|e| SmagridError::Input {
            reason: format!("CSV header error: {}", e),
        })?;
        if header.len() < 2 {
            return Err(SmagridError::Input {
                reason: format!(
                    "header needs a date column and at least one symbol, got {:?}",
                    header.iter().collect::<Vec<_>>()
                ),
            });
        }

        let width = header.len();
        let mut table = PriceTable::new(header.iter().skip(1).map(str::to_string).collect());

        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("skipping unreadable row: {}", e);
                    continue;
                }
            };
            if is_blank(&record) {
                continue;
            }
            if record.len() != width {
                warn!(
                    "skipping row with {} fields, expected {}: {}",
                    record.len(),
                    width,
                    join(&record)
                );
                continue;
            }

            let prices = match parse_prices(&record) {
                Ok(p) => p,
                Err(field) => {
                    warn!("skipping row, cannot parse {:?} as a price: {}", field, join(&record));
                    continue;
                }
            };

            table.push_day(record[0].to_string(), prices)?;
        }

        Ok(table)
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn join(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

fn parse_prices(record: &StringRecord) -> Result<Vec<f64>, String> {
    record
        .iter()
        .skip(1)
        .map(|field| field.parse::<f64>().map_err(|_| field.to_string()))
        .collect()
}

impl DataPort for CsvAdapter {
    fn load_table(&self) -> Result<PriceTable, SmagridError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SmagridError::Input {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        if content.trim().is_empty() {
            return Err(SmagridError::Input {
                reason: format!("{} is empty", self.path.display()),
            });
        }
        Self::parse(&content)
    }
}
