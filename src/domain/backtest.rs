//! Per-symbol search run.
//!
//! SearchConfig holds the parameters of a run; [`run_symbol`] selects one
//! symbol's series from the table, locates the evaluation window, sweeps the
//! period grid and ranks the results.

use log::info;

use crate::domain::date_window::DateWindow;
use crate::domain::error::SmagridError;
use crate::domain::grid_search::{DEFAULT_MAX_PERIOD, GridResult, GridSearch};
use crate::domain::price_table::{EvalRange, PriceTable};
use crate::domain::ranking::{DEFAULT_TOP_N, RankedEntry, rank};
use crate::domain::simulator::INITIAL_CAPITAL;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub initial_capital: f64,
    pub max_period: usize,
    pub top_n: usize,
    pub window: DateWindow,
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            initial_capital: INITIAL_CAPITAL,
            max_period: DEFAULT_MAX_PERIOD,
            top_n: DEFAULT_TOP_N,
            window: DateWindow::default(),
            parallel: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SymbolReport {
    pub symbol: String,
    pub range: EvalRange,
    pub first_date: String,
    pub last_date: String,
    pub evaluated: usize,
    pub best: Option<GridResult>,
    pub ranked: Vec<RankedEntry>,
}

impl SymbolReport {
    pub fn trading_days(&self) -> usize {
        self.range.trading_days()
    }
}

pub fn run_symbol(
    table: &PriceTable,
    symbol: &str,
    config: &SearchConfig,
) -> Result<SymbolReport, SmagridError> {
    let series = table.series(symbol)?;

    let range = config
        .window
        .locate(&series.dates)
        .ok_or_else(|| SmagridError::DateRangeNotFound {
            symbol: symbol.to_string(),
            window: config.window.to_string(),
        })?;

    info!(
        "{}: window {} is index {} to {} ({} trading days)",
        symbol,
        config.window,
        range.start,
        range.end,
        range.trading_days()
    );

    let sweep = if config.parallel {
        GridSearch::new_parallel(&series.prices, config.max_period)
            .sweep_parallel(range, config.initial_capital)
    } else {
        GridSearch::new(&series.prices, config.max_period).sweep(range, config.initial_capital)
    };

    let evaluated = sweep.results.len();
    let ranked = rank(sweep.results, config.top_n, config.initial_capital);

    Ok(SymbolReport {
        symbol: symbol.to_string(),
        range,
        first_date: series.dates[range.start].clone(),
        last_date: series.dates[range.end].clone(),
        evaluated,
        best: sweep.best,
        ranked,
    })
}
