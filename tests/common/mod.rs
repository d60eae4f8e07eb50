#![allow(dead_code)]

use smagrid::domain::backtest::{SearchConfig, SymbolReport};
use smagrid::domain::error::SmagridError;
use smagrid::domain::price_table::PriceTable;
use smagrid::ports::data_port::DataPort;
use smagrid::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Serves a fixed table, or fails every load with an input error.
pub struct MockDataPort {
    pub table: Option<PriceTable>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new(table: PriceTable) -> Self {
        Self {
            table: Some(table),
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            table: None,
            error: Some(reason.to_string()),
        }
    }
}

impl DataPort for MockDataPort {
    fn load_table(&self) -> Result<PriceTable, SmagridError> {
        if let Some(reason) = &self.error {
            return Err(SmagridError::Input {
                reason: reason.clone(),
            });
        }
        Ok(self.table.clone().unwrap_or_default())
    }
}

/// Records every write instead of touching the filesystem.
pub struct MockReportPort {
    pub calls: RefCell<Vec<(Vec<SymbolReport>, PathBuf)>>,
    pub requested: RefCell<Vec<Vec<String>>>,
}

impl MockReportPort {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for MockReportPort {
    fn write(
        &self,
        reports: &[SymbolReport],
        requested: &[String],
        output_path: &Path,
    ) -> Result<(), SmagridError> {
        self.requested.borrow_mut().push(requested.to_vec());
        self.calls
            .borrow_mut()
            .push((reports.to_vec(), output_path.to_path_buf()));
        Ok(())
    }
}

pub const ZIG: [f64; 8] = [10.0, 9.0, 8.0, 10.0, 12.0, 11.0, 10.0, 12.0];
pub const UP: [f64; 8] = [5.0, 6.0, 5.0, 7.0, 6.0, 8.0, 7.0, 9.0];
pub const FLAT: [f64; 8] = [50.0; 8];

/// Two December 2023 days followed by 1/2/2024 through 1/7/2024.
pub fn sample_dates() -> Vec<String> {
    (0..8)
        .map(|i| {
            if i < 2 {
                format!("12/{}/2023", 28 + i)
            } else {
                format!("1/{}/2024", i)
            }
        })
        .collect()
}

pub fn make_table(columns: &[(&str, &[f64])]) -> PriceTable {
    let mut table = PriceTable::new(columns.iter().map(|(s, _)| s.to_string()).collect());
    for (i, date) in sample_dates().into_iter().enumerate() {
        let prices = columns.iter().map(|(_, p)| p[i]).collect();
        table.push_day(date, prices).unwrap();
    }
    table
}

pub fn sample_table() -> PriceTable {
    make_table(&[("ZIG", &ZIG[..]), ("UP", &UP[..]), ("FLAT", &FLAT[..])])
}

/// The sample table as the CSV text the input adapter reads.
pub fn sample_csv() -> String {
    let table = sample_table();
    let mut out = format!("Date,{}\n", table.symbols.join(","));
    for day in &table.days {
        let prices: Vec<String> = day.prices.iter().map(|p| p.to_string()).collect();
        out.push_str(&format!("{},{}\n", day.date, prices.join(",")));
    }
    out
}

pub fn small_config() -> SearchConfig {
    SearchConfig {
        max_period: 4,
        top_n: 5,
        ..SearchConfig::default()
    }
}

pub fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn exit_code_is(code: ExitCode, expected: u8) -> bool {
    code == ExitCode::from(expected)
}
