//! Symbol universe for a search run.
//!
//! Parses symbol lists from configuration and checks each requested symbol
//! against the loaded price table.

use crate::domain::price_table::PriceTable;
use log::{info, warn};
use std::collections::HashSet;

pub const DEFAULT_SYMBOLS: &str = "AAPL,MMM,KO,V,CAT";

#[derive(Debug, Clone)]
pub struct Universe {
    pub symbols: Vec<String>,
}

impl Universe {
    pub fn count(&self) -> usize {
        self.symbols.len()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

pub struct UniverseValidationResult {
    pub universe: Universe,
    pub skipped: Vec<SkippedSymbol>,
}

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnknownSymbol,
    NoData,
}

/// Keeps the requested symbols that exist in `table`, in request order.
pub fn validate_universe(table: &PriceTable, symbols: Vec<String>) -> UniverseValidationResult {
    let mut valid = Vec::new();
    let mut skipped = Vec::new();
    let requested = symbols.len();

    for symbol in symbols {
        if table.symbol_index(&symbol).is_none() {
            warn!("skipping {} (not in price table)", symbol);
            skipped.push(SkippedSymbol {
                symbol,
                reason: SkipReason::UnknownSymbol,
            });
            continue;
        }
        if table.day_count() == 0 {
            warn!("skipping {} (no data rows)", symbol);
            skipped.push(SkippedSymbol {
                symbol,
                reason: SkipReason::NoData,
            });
            continue;
        }
        valid.push(symbol);
    }

    if !skipped.is_empty() {
        info!("Searching {} of {} symbols", valid.len(), requested);
    }

    UniverseValidationResult {
        universe: Universe { symbols: valid },
        skipped,
    }
}
