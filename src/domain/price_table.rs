//! Daily multi-symbol price table and per-symbol price series.

use crate::domain::error::SmagridError;

/// One trading day: its date label and one price per table symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub date: String,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    pub symbols: Vec<String>,
    pub days: Vec<DayRow>,
}

impl PriceTable {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            days: Vec::new(),
        }
    }

    /// Appends a day. Rows whose width differs from the symbol list are rejected.
    pub fn push_day(&mut self, date: String, prices: Vec<f64>) -> Result<(), SmagridError> {
        if prices.len() != self.symbols.len() {
            return Err(SmagridError::Input {
                reason: format!(
                    "row {} has {} prices, expected {}",
                    date,
                    prices.len(),
                    self.symbols.len()
                ),
            });
        }
        self.days.push(DayRow { date, prices });
        Ok(())
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    pub fn first_date(&self) -> Option<&str> {
        self.days.first().map(|d| d.date.as_str())
    }

    pub fn last_date(&self) -> Option<&str> {
        self.days.last().map(|d| d.date.as_str())
    }

    /// Extracts the aligned price/date series of one symbol.
    pub fn series(&self, symbol: &str) -> Result<PriceSeries, SmagridError> {
        let column = self
            .symbol_index(symbol)
            .ok_or_else(|| SmagridError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?;

        let mut prices = Vec::with_capacity(self.days.len());
        let mut dates = Vec::with_capacity(self.days.len());
        for day in &self.days {
            prices.push(day.prices[column]);
            dates.push(day.date.clone());
        }

        if prices.is_empty() {
            return Err(SmagridError::NoData {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries {
            symbol: symbol.to_string(),
            prices,
            dates,
        })
    }
}

/// Prices of one symbol, index-aligned with their date labels.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub prices: Vec<f64>,
    pub dates: Vec<String>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Inclusive index range of a price series that the simulator evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalRange {
    pub start: usize,
    pub end: usize,
}

impl EvalRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn trading_days(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> PriceTable {
        let mut table = PriceTable::new(vec!["AAPL".into(), "KO".into()]);
        table.push_day("1/2/2024".into(), vec![185.0, 60.0]).unwrap();
        table.push_day("1/3/2024".into(), vec![184.0, 60.5]).unwrap();
        table.push_day("1/4/2024".into(), vec![181.5, 61.0]).unwrap();
        table
    }

    #[test]
    fn series_extracts_column() {
        let table = sample_table();
        let series = table.series("KO").unwrap();

        assert_eq!(series.symbol, "KO");
        assert_eq!(series.prices, vec![60.0, 60.5, 61.0]);
        assert_eq!(series.dates, vec!["1/2/2024", "1/3/2024", "1/4/2024"]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn series_unknown_symbol() {
        let table = sample_table();
        let err = table.series("MSFT").unwrap_err();
        assert!(matches!(err, SmagridError::UnknownSymbol { symbol } if symbol == "MSFT"));
    }

    #[test]
    fn series_without_days_is_no_data() {
        let table = PriceTable::new(vec!["AAPL".into()]);
        let err = table.series("AAPL").unwrap_err();
        assert!(matches!(err, SmagridError::NoData { .. }));
    }

    #[test]
    fn push_day_rejects_wrong_width() {
        let mut table = sample_table();
        let result = table.push_day("1/5/2024".into(), vec![1.0]);
        assert!(matches!(result, Err(SmagridError::Input { .. })));
        assert_eq!(table.day_count(), 3);
    }

    #[test]
    fn first_and_last_dates() {
        let table = sample_table();
        assert_eq!(table.first_date(), Some("1/2/2024"));
        assert_eq!(table.last_date(), Some("1/4/2024"));
        assert_eq!(PriceTable::default().first_date(), None);
    }

    #[test]
    fn eval_range_trading_days() {
        assert_eq!(EvalRange::new(3, 7).trading_days(), 5);
        assert_eq!(EvalRange::new(4, 4).trading_days(), 1);
    }
}
