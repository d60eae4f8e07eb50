//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{SearchConfig, SymbolReport, run_symbol};
use crate::domain::config_validation::{parse_window_date, validate_search_config};
use crate::domain::date_window::{DEFAULT_DATE_FORMAT, DEFAULT_PATTERN, DateWindow};
use crate::domain::error::SmagridError;
use crate::domain::grid_search::DEFAULT_MAX_PERIOD;
use crate::domain::ranking::DEFAULT_TOP_N;
use crate::domain::simulator::INITIAL_CAPITAL;
use crate::domain::universe::{DEFAULT_SYMBOLS, parse_symbols, validate_universe};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_INPUT: &str = "multistocks.csv";
pub const DEFAULT_OUTPUT: &str = "sma_rank_all.csv";

#[derive(Parser, Debug)]
#[command(name = "smagrid", about = "Brute-force SMA crossover parameter search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sweep every short/long SMA pair and rank the results per symbol
    Search {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        parallel: bool,
    },
    /// Show symbols and date span of the price table
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Validate a configuration file and print the resolved settings
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Search {
            config,
            input,
            output,
            symbol,
            parallel,
        } => run_search(
            config.as_ref(),
            input.as_ref(),
            output.as_ref(),
            symbol.as_deref(),
            parallel,
        ),
        Command::Info { config, input } => run_info(config.as_ref(), input.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

/// Loads the INI file if one was given; no file means all defaults.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        None => Ok(FileConfigAdapter::empty()),
        Some(path) => {
            info!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path).map_err(|e| {
                error!("{e}");
                ExitCode::from(&e)
            })
        }
    }
}

fn run_search(
    config_path: Option<&PathBuf>,
    input_override: Option<&PathBuf>,
    output_override: Option<&PathBuf>,
    symbol_override: Option<&str>,
    parallel: bool,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_search_config(&adapter) {
        error!("{e}");
        return (&e).into();
    }

    let mut search_config = match build_search_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };
    search_config.parallel |= parallel;

    let symbols = match resolve_symbols(symbol_override, &adapter) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    let input = resolve_input(input_override, &adapter);
    let output = resolve_output(output_override, &adapter);

    run_search_pipeline(
        &CsvAdapter::new(input),
        &CsvReportAdapter,
        &search_config,
        &symbols,
        &output,
    )
}

pub fn build_search_config(adapter: &dyn ConfigPort) -> Result<SearchConfig, SmagridError> {
    Ok(SearchConfig {
        initial_capital: adapter.get_double("search", "initial_capital", INITIAL_CAPITAL),
        max_period: adapter.get_int("search", "max_period", DEFAULT_MAX_PERIOD as i64).max(1)
            as usize,
        top_n: adapter.get_int("search", "top_n", DEFAULT_TOP_N as i64).max(1) as usize,
        window: build_window(adapter)?,
        parallel: adapter.get_bool("search", "parallel", false),
    })
}

pub fn build_window(adapter: &dyn ConfigPort) -> Result<DateWindow, SmagridError> {
    if adapter.has_value("window", "start_date") || adapter.has_value("window", "end_date") {
        let start = parse_window_date(adapter, "start_date")?;
        let end = parse_window_date(adapter, "end_date")?;
        let format = adapter
            .get_string("window", "date_format")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        return Ok(DateWindow::Between { start, end, format });
    }

    let pattern = adapter
        .get_string("window", "contains")
        .unwrap_or_else(|| DEFAULT_PATTERN.to_string());
    Ok(DateWindow::Contains(pattern.trim().to_string()))
}

pub fn resolve_symbols(
    symbol_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, SmagridError> {
    let (key, raw) = match symbol_override {
        Some(s) => ("symbol", s.to_string()),
        None => (
            "symbols",
            config
                .get_string("data", "symbols")
                .unwrap_or_else(|| DEFAULT_SYMBOLS.to_string()),
        ),
    };
    parse_symbols(&raw).map_err(|e| SmagridError::ConfigInvalid {
        section: "data".into(),
        key: key.into(),
        reason: e.to_string(),
    })
}

pub fn resolve_input(input_override: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    input_override
        .cloned()
        .or_else(|| config.get_string("data", "input").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

pub fn resolve_output(output_override: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    output_override
        .cloned()
        .or_else(|| config.get_string("output", "path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

pub fn run_search_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    config: &SearchConfig,
    symbols: &[String],
    output_path: &Path,
) -> ExitCode {
    // Stage 1: load the price table
    let table = match data_port.load_table() {
        Ok(t) => t,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };
    info!("Symbols in table: {}", table.symbols.len());
    info!("Trading days: {}", table.day_count());

    // Stage 2: keep requested symbols present in the table
    let validation = validate_universe(&table, symbols.to_vec());

    // Stage 3: search each symbol; a failing symbol does not stop the others
    let mut reports: Vec<SymbolReport> = Vec::with_capacity(validation.universe.count());
    for symbol in &validation.universe.symbols {
        info!(
            "Searching {}: periods 1..={}, {} pairs",
            symbol,
            config.max_period,
            config.max_period * config.max_period
        );
        match run_symbol(&table, symbol, config) {
            Ok(report) => {
                print_summary(&report);
                reports.push(report);
            }
            Err(e) => warn!("skipping {} ({})", symbol, e),
        }
    }

    if reports.is_empty() {
        let err = SmagridError::NoData {
            symbol: symbols.join(","),
        };
        error!("no symbol produced a ranking: {err}");
        return (&err).into();
    }

    // Stage 4: write the ranking file
    match report_port.write(&reports, symbols, output_path) {
        Ok(()) => {
            info!(
                "Rankings for {} symbols written to: {}",
                reports.len(),
                output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

fn print_summary(report: &SymbolReport) {
    println!("\n==== {} ====", report.symbol);
    println!(
        "Window: {} to {} (index {} to {}, {} trading days)",
        report.first_date,
        report.last_date,
        report.range.start,
        report.range.end,
        report.trading_days()
    );
    if let Some(best) = &report.best {
        println!(
            "Best: short={} long={} final_capital={:.4}",
            best.short_period, best.long_period, best.final_capital
        );
    }
    println!("\nrank\tshort\tlong\tfinal_capital\treturn_pct\ttrades");
    for entry in &report.ranked {
        println!(
            "{}\t{}\t{}\t{:.4}\t{:.4}\t{}",
            entry.rank,
            entry.short_period,
            entry.long_period,
            entry.final_capital,
            entry.return_pct,
            entry.trade_count
        );
    }
}

fn run_info(config_path: Option<&PathBuf>, input_override: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let input = resolve_input(input_override, &config);

    let table = match CsvAdapter::new(input.clone()).load_table() {
        Ok(t) => t,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    println!("{}", input.display());
    println!("  symbols: {} ({})", table.symbols.len(), table.symbols.join(", "));
    println!("  days:    {}", table.day_count());
    match (table.first_date(), table.last_date()) {
        (Some(first), Some(last)) => println!("  range:   {} to {}", first, last),
        _ => println!("  range:   no data rows"),
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(Some(config_path)) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_search_config(&adapter) {
        error!("{e}");
        return (&e).into();
    }

    let config = match build_search_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };
    let symbols = match resolve_symbols(None, &adapter) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    println!("input:           {}", resolve_input(None, &adapter).display());
    println!("output:          {}", resolve_output(None, &adapter).display());
    println!("symbols:         {}", symbols.join(", "));
    println!("window:          {}", config.window);
    println!("initial_capital: {}", config.initial_capital);
    println!("periods:         1..={} ({} pairs)", config.max_period, config.max_period * config.max_period);
    println!("top_n:           {}", config.top_n);
    println!("parallel:        {}", config.parallel);
    println!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
