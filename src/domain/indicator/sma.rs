//! Simple Moving Average.
//!
//! O(n) running-sum implementation:
//! SMA[n-1] = (P[0] + ... + P[n-1]) / n
//! SMA[i]   = (sum + (P[i] - P[i-n])) / n  for i >= n
//! Warmup: first (n-1) points are undefined. A period of zero or longer than
//! the series yields a fully undefined series of the same length.

use crate::domain::indicator::MovingAverage;

pub fn calculate_sma(prices: &[f64], period: usize) -> MovingAverage {
    if period < 1 || period > prices.len() {
        return MovingAverage::undefined(period, prices.len());
    }

    let mut values = vec![None; prices.len()];
    let divisor = period as f64;

    let mut sum: f64 = 0.0;
    for &price in &prices[..period] {
        sum += price;
    }
    values[period - 1] = Some(sum / divisor);

    for i in period..prices.len() {
        sum += prices[i] - prices[i - period];
        values[i] = Some(sum / divisor);
    }

    MovingAverage { period, values }
}
