//! Exhaustive (short, long) period search.
//!
//! Every pair in `1..=max_period` x `1..=max_period` is simulated, including
//! `short == long`, so a full sweep yields exactly `max_period²` results.
//! Moving averages are computed once per period and shared by both sides.

use rayon::prelude::*;

use crate::domain::indicator::MovingAverage;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::price_table::EvalRange;
use crate::domain::simulator::simulate;

pub const DEFAULT_MAX_PERIOD: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridResult {
    pub short_period: usize,
    pub long_period: usize,
    pub final_capital: f64,
    pub trade_count: u32,
}

impl GridResult {
    pub fn spread(&self) -> usize {
        self.short_period.abs_diff(self.long_period)
    }
}

#[derive(Debug, Clone)]
pub struct GridSweep {
    pub results: Vec<GridResult>,
    /// Highest final capital seen; the earliest pair in sweep order wins ties.
    pub best: Option<GridResult>,
}

pub struct GridSearch<'a> {
    prices: &'a [f64],
    averages: Vec<MovingAverage>,
}

impl<'a> GridSearch<'a> {
    pub fn new(prices: &'a [f64], max_period: usize) -> Self {
        let averages = (1..=max_period)
            .map(|period| calculate_sma(prices, period))
            .collect();
        Self { prices, averages }
    }

    /// Same as [`GridSearch::new`] with the moving averages built on the rayon pool.
    pub fn new_parallel(prices: &'a [f64], max_period: usize) -> Self {
        let averages = (1..=max_period)
            .into_par_iter()
            .map(|period| calculate_sma(prices, period))
            .collect();
        Self { prices, averages }
    }

    pub fn max_period(&self) -> usize {
        self.averages.len()
    }

    pub fn average(&self, period: usize) -> Option<&MovingAverage> {
        period.checked_sub(1).and_then(|i| self.averages.get(i))
    }

    pub fn evaluate(
        &self,
        short_period: usize,
        long_period: usize,
        range: EvalRange,
        initial_capital: f64,
    ) -> GridResult {
        // Periods outside the cache never trade.
        let (Some(short), Some(long)) = (self.average(short_period), self.average(long_period))
        else {
            return GridResult {
                short_period,
                long_period,
                final_capital: initial_capital,
                trade_count: 0,
            };
        };
        let outcome = simulate(
            self.prices,
            short,
            long,
            range.start,
            range.end,
            initial_capital,
        );
        GridResult {
            short_period,
            long_period,
            final_capital: outcome.final_capital,
            trade_count: outcome.trade_count,
        }
    }

    pub fn sweep(&self, range: EvalRange, initial_capital: f64) -> GridSweep {
        let max_period = self.max_period();
        let mut results = Vec::with_capacity(max_period * max_period);
        let mut best: Option<GridResult> = None;

        for short_period in 1..=max_period {
            for long_period in 1..=max_period {
                let result = self.evaluate(short_period, long_period, range, initial_capital);
                if improves(&result, best.as_ref()) {
                    best = Some(result);
                }
                results.push(result);
            }
        }

        GridSweep { results, best }
    }

    /// Parallel sweep over the short-period axis. Results keep sweep order,
    /// so the output matches [`GridSearch::sweep`] exactly.
    pub fn sweep_parallel(&self, range: EvalRange, initial_capital: f64) -> GridSweep {
        let max_period = self.max_period();
        let results: Vec<GridResult> = (1..=max_period)
            .into_par_iter()
            .flat_map_iter(|short_period| {
                (1..=max_period).map(move |long_period| {
                    self.evaluate(short_period, long_period, range, initial_capital)
                })
            })
            .collect();

        let best = first_best(&results);
        GridSweep { results, best }
    }
}

fn improves(candidate: &GridResult, best: Option<&GridResult>) -> bool {
    best.is_none_or(|b| candidate.final_capital > b.final_capital)
}

fn first_best(results: &[GridResult]) -> Option<GridResult> {
    let mut best: Option<GridResult> = None;
    for r in results {
        if improves(r, best.as_ref()) {
            best = Some(*r);
        }
    }
    best
}
