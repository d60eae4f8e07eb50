//! Dual moving-average crossover simulation for a single symbol.
//!
//! Replays one pass over an index range with whole-share, all-in trades:
//! buy on a golden cross while flat, sell everything on a death cross while
//! holding, and liquidate at the last evaluated close. Fills happen at the
//! close of the day the cross is detected.

use crate::domain::indicator::MovingAverage;

pub const INITIAL_CAPITAL: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOutcome {
    pub final_capital: f64,
    pub trade_count: u32,
}

impl SimulationOutcome {
    fn untouched(initial_capital: f64) -> Self {
        Self {
            final_capital: initial_capital,
            trade_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cross {
    Golden,
    Death,
}

/// Classifies the move of `short - long` between two consecutive days.
pub fn detect_cross(diff_prev: f64, diff_now: f64) -> Option<Cross> {
    if diff_prev < 0.0 && diff_now > 0.0 {
        Some(Cross::Golden)
    } else if diff_prev > 0.0 && diff_now < 0.0 {
        Some(Cross::Death)
    } else {
        None
    }
}

fn spread(short: &MovingAverage, long: &MovingAverage, i: usize) -> Option<f64> {
    Some(short.get(i)? - long.get(i)?)
}

/// Runs the crossover state machine over `start..=end` of `prices`.
///
/// The range is clamped to the series; an empty series or a range with
/// `start >= end` after clamping returns the untouched initial capital.
/// Evaluation never begins before index 1, since a cross needs the previous
/// day, and the first evaluated day never opens a position.
pub fn simulate(
    prices: &[f64],
    short: &MovingAverage,
    long: &MovingAverage,
    start: usize,
    end: usize,
    initial_capital: f64,
) -> SimulationOutcome {
    if prices.is_empty() {
        return SimulationOutcome::untouched(initial_capital);
    }
    let end = end.min(prices.len() - 1);
    if start >= end {
        return SimulationOutcome::untouched(initial_capital);
    }
    let start = start.max(1);

    let mut cash = initial_capital;
    let mut shares: u64 = 0;
    let mut trade_count: u32 = 0;

    for i in start..=end {
        let (Some(diff_prev), Some(diff_now)) = (spread(short, long, i - 1), spread(short, long, i))
        else {
            continue;
        };
        let cross = detect_cross(diff_prev, diff_now);
        let price = prices[i];

        if i != start && shares == 0 && cross == Some(Cross::Golden) {
            let affordable = (cash / price).floor();
            if affordable.is_finite() && affordable >= 1.0 {
                let bought = affordable as u64;
                shares += bought;
                cash -= bought as f64 * price;
                trade_count += 1;
            }
        } else if shares > 0 && cross == Some(Cross::Death) {
            cash += shares as f64 * price;
            shares = 0;
            trade_count += 1;
        }
    }

    if shares > 0 {
        cash += shares as f64 * prices[end];
        trade_count += 1;
    }

    SimulationOutcome {
        final_capital: cash,
        trade_count,
    }
}
