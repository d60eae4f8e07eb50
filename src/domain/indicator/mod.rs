//! Moving-average series used by the crossover search.
//!
//! - `MovingAverage`: one optional value per price, `None` during warm-up
//! - [`sma`]: the incremental simple moving average

pub mod sma;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    pub period: usize,
    pub values: Vec<Option<f64>>,
}

impl MovingAverage {
    /// A series of `len` undefined points.
    pub fn undefined(period: usize, len: usize) -> Self {
        Self {
            period,
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Number of leading points with no value.
    pub fn warmup(&self) -> usize {
        self.values.iter().take_while(|v| v.is_none()).count()
    }
}

impl fmt::Display for MovingAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SMA({})", self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_period() {
        assert_eq!(MovingAverage::undefined(20, 3).to_string(), "SMA(20)");
    }

    #[test]
    fn undefined_has_no_values() {
        let ma = MovingAverage::undefined(5, 4);
        assert_eq!(ma.len(), 4);
        assert_eq!(ma.warmup(), 4);
        assert!((0..4).all(|i| ma.get(i).is_none()));
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let ma = MovingAverage {
            period: 1,
            values: vec![Some(1.0), Some(2.0)],
        };
        assert_eq!(ma.get(1), Some(2.0));
        assert_eq!(ma.get(2), None);
        assert_eq!(ma.warmup(), 0);
    }
}
