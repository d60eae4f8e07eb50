//! Ranking of grid results.
//!
//! Ordering, highest priority first:
//! 1. higher final capital
//! 2. wider `|short - long|` spread
//! 3. smaller short period
//! 4. smaller long period
//!
//! Period pairs are unique within a sweep, so keys 3 and 4 make this a strict
//! total order and the ranking does not depend on input order.

use std::cmp::Ordering;

use crate::domain::grid_search::GridResult;

pub const DEFAULT_TOP_N: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// 1-based position in the full ordering.
    pub rank: usize,
    pub short_period: usize,
    pub long_period: usize,
    pub final_capital: f64,
    pub trade_count: u32,
    pub return_pct: f64,
}

/// (final / initial - 1) * 100
pub fn return_pct(final_capital: f64, initial_capital: f64) -> f64 {
    (final_capital / initial_capital - 1.0) * 100.0
}

pub fn compare_results(a: &GridResult, b: &GridResult) -> Ordering {
    b.final_capital
        .total_cmp(&a.final_capital)
        .then_with(|| b.spread().cmp(&a.spread()))
        .then_with(|| a.short_period.cmp(&b.short_period))
        .then_with(|| a.long_period.cmp(&b.long_period))
}

/// Sorts `results` in ranking order and returns the first `top_n`.
pub fn rank(mut results: Vec<GridResult>, top_n: usize, initial_capital: f64) -> Vec<RankedEntry> {
    results.sort_unstable_by(compare_results);
    results
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, r)| RankedEntry {
            rank: i + 1,
            short_period: r.short_period,
            long_period: r.long_period,
            final_capital: r.final_capital,
            trade_count: r.trade_count,
            return_pct: return_pct(r.final_capital, initial_capital),
        })
        .collect()
}
