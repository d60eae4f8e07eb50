//! smagrid — brute-force SMA crossover parameter search.
//!
//! Hexagonal architecture: search engine and types in [`domain`], port traits
//! in [`ports`], CSV and INI implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
