//! Core domain types and logic.

pub mod price_table;
pub mod date_window;
pub mod indicator;
pub mod simulator;
pub mod grid_search;
pub mod ranking;
pub mod backtest;
pub mod universe;
pub mod config_validation;
pub mod error;
