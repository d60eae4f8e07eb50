//! CSV ranking report adapter.
//!
//! All symbols go into one file:
//!
//! ```text
//! rank,short,long,final_capital,return_pct,trades
//!
//! <first requested symbol rows>
//!
//! MMM,,,,,
//!
//! <MMM rows>
//!
//! ```
//!
//! Capital and return are written as text (leading `'`) so spreadsheets keep
//! every digit: capital with 30 decimals, return with 4.

use crate::domain::backtest::SymbolReport;
use crate::domain::error::SmagridError;
use crate::domain::ranking::RankedEntry;
use crate::ports::report_port::ReportPort;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

pub const HEADER: [&str; 6] = ["rank", "short", "long", "final_capital", "return_pct", "trades"];

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    /// Renders all sections. Only the section of the first requested symbol
    /// goes unlabelled; if that symbol produced no report, every section is
    /// labelled.
    pub fn render(reports: &[SymbolReport], requested: &[String]) -> Result<String, SmagridError> {
        let mut buf = Vec::new();

        write_records(&mut buf, [HEADER.map(String::from)])?;
        blank_line(&mut buf);

        for report in reports {
            if requested.first() != Some(&report.symbol) {
                write_records(&mut buf, [label_fields(&report.symbol)])?;
                blank_line(&mut buf);
            }
            write_records(&mut buf, report.ranked.iter().map(entry_fields))?;
            blank_line(&mut buf);
        }

        String::from_utf8(buf).map_err(|e| SmagridError::Output {
            reason: format!("report is not UTF-8: {}", e),
        })
    }
}

pub fn format_capital(value: f64) -> String {
    format!("'{:.30}", value)
}

pub fn format_return(value: f64) -> String {
    format!("'{:.4}", value)
}

fn label_fields(symbol: &str) -> [String; 6] {
    [symbol.to_string(), String::new(), String::new(), String::new(), String::new(), String::new()]
}

fn entry_fields(entry: &RankedEntry) -> [String; 6] {
    [
        entry.rank.to_string(),
        entry.short_period.to_string(),
        entry.long_period.to_string(),
        format_capital(entry.final_capital),
        format_return(entry.return_pct),
        entry.trade_count.to_string(),
    ]
}

/// Appends `records` to `buf` through a writer that lives only for this call.
fn write_records<I>(buf: &mut Vec<u8>, records: I) -> Result<(), SmagridError>
where
    I: IntoIterator<Item = [String; 6]>,
{
    let mut wtr = WriterBuilder::new().from_writer(buf);
    for record in records {
        wtr.write_record(&record).map_err(|e| SmagridError::Output {
            reason: format!("CSV write error: {}", e),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn blank_line(buf: &mut Vec<u8>) {
    buf.push(b'\n');
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        reports: &[SymbolReport],
        requested: &[String],
        output_path: &Path,
    ) -> Result<(), SmagridError> {
        let content = Self::render(reports, requested)?;
        fs::write(output_path, content).map_err(|e| SmagridError::Output {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_table::EvalRange;
    use tempfile::TempDir;

    fn entry(rank: usize, short_period: usize, long_period: usize, final_capital: f64) -> RankedEntry {
        RankedEntry {
            rank,
            short_period,
            long_period,
            final_capital,
            trade_count: 4,
            return_pct: (final_capital / 10_000.0 - 1.0) * 100.0,
        }
    }

    fn requested(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    fn report(symbol: &str, ranked: Vec<RankedEntry>) -> SymbolReport {
        SymbolReport {
            symbol: symbol.to_string(),
            range: EvalRange::new(0, 1),
            first_date: "1/2/2024".into(),
            last_date: "1/3/2024".into(),
            evaluated: ranked.len(),
            best: None,
            ranked,
        }
    }

    #[test]
    fn capital_and_return_formatting() {
        assert_eq!(format_capital(11_000.0), "'11000.000000000000000000000000000000");
        assert_eq!(format_return(10.0), "'10.0000");
        assert_eq!(format_return(-3.14159), "'-3.1416");
        // exact binary expansion, not shortest round-trip
        assert_eq!(format_capital(0.1), "'0.100000000000000005551115123126");
    }

    #[test]
    fn render_sections() {
        let reports = vec![
            report("AAPL", vec![entry(1, 3, 40, 12_500.0), entry(2, 5, 9, 11_000.0)]),
            report("MMM", vec![entry(1, 1, 2, 10_000.0)]),
        ];
        let out = CsvReportAdapter::render(&reports, &requested(&["AAPL", "MMM"])).unwrap();

        let expected = "rank,short,long,final_capital,return_pct,trades\n\
            \n\
            1,3,40,'12500.000000000000000000000000000000,'25.0000,4\n\
            2,5,9,'11000.000000000000000000000000000000,'10.0000,4\n\
            \n\
            MMM,,,,,\n\
            \n\
            1,1,2,'10000.000000000000000000000000000000,'0.0000,4\n\
            \n";
        assert_eq!(out, expected);
    }

    #[test]
    fn render_labels_every_section_when_first_request_is_missing() {
        // AAPL was requested first but produced no report
        let reports = vec![
            report("KO", vec![entry(1, 2, 7, 10_250.0)]),
            report("MMM", vec![entry(1, 1, 2, 10_000.0)]),
        ];
        let out = CsvReportAdapter::render(&reports, &requested(&["AAPL", "KO", "MMM"])).unwrap();

        let expected = "rank,short,long,final_capital,return_pct,trades\n\
            \n\
            KO,,,,,\n\
            \n\
            1,2,7,'10250.000000000000000000000000000000,'2.5000,4\n\
            \n\
            MMM,,,,,\n\
            \n\
            1,1,2,'10000.000000000000000000000000000000,'0.0000,4\n\
            \n";
        assert_eq!(out, expected);
    }

    #[test]
    fn render_no_reports_is_header_only() {
        let out = CsvReportAdapter::render(&[], &requested(&["AAPL"])).unwrap();
        assert_eq!(out, "rank,short,long,final_capital,return_pct,trades\n\n");
    }

    #[test]
    fn write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sma_rank_all.csv");
        CsvReportAdapter
            .write(&[report("KO", vec![entry(1, 2, 7, 10_250.0)])], &requested(&["KO"]), &path)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("rank,short,long"));
        assert!(content.contains("1,2,7,'10250."));
        assert!(!content.contains("KO,,,,,"));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");
        let result = CsvReportAdapter.write(&[], &requested(&["KO"]), &path);
        assert!(matches!(result, Err(SmagridError::Output { .. })));
    }
}
