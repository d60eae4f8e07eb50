//! Configuration validation.
//!
//! Validates all config fields before a search runs. Absent keys are valid
//! (they take their defaults); present keys must hold usable values.

use crate::domain::error::SmagridError;
use crate::domain::universe::parse_symbols;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub fn validate_search_config(config: &dyn ConfigPort) -> Result<(), SmagridError> {
    validate_initial_capital(config)?;
    validate_positive_int(config, "max_period")?;
    validate_positive_int(config, "top_n")?;
    validate_symbols(config)?;
    validate_window(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> SmagridError {
    SmagridError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), SmagridError> {
    let Some(raw) = config.get_string("search", "initial_capital") else {
        return Ok(());
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(()),
        _ => Err(invalid(
            "search",
            "initial_capital",
            "initial_capital must be a positive number",
        )),
    }
}

fn validate_positive_int(config: &dyn ConfigPort, key: &str) -> Result<(), SmagridError> {
    let Some(raw) = config.get_string("search", key) else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 1 => Ok(()),
        _ => Err(invalid("search", key, format!("{} must be a positive integer", key))),
    }
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), SmagridError> {
    match config.get_string("data", "symbols") {
        None => Ok(()),
        Some(s) => parse_symbols(&s)
            .map(|_| ())
            .map_err(|e| invalid("data", "symbols", e.to_string())),
    }
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), SmagridError> {
    let has_start = config.has_value("window", "start_date");
    let has_end = config.has_value("window", "end_date");

    match (has_start, has_end) {
        (false, false) => {
            if let Some(pattern) = config.get_string("window", "contains") {
                if pattern.trim().is_empty() {
                    return Err(invalid("window", "contains", "contains must not be blank"));
                }
            }
            Ok(())
        }
        (true, false) => Err(SmagridError::ConfigMissing {
            section: "window".to_string(),
            key: "end_date".to_string(),
        }),
        (false, true) => Err(SmagridError::ConfigMissing {
            section: "window".to_string(),
            key: "start_date".to_string(),
        }),
        (true, true) => {
            let start = parse_window_date(config, "start_date")?;
            let end = parse_window_date(config, "end_date")?;
            if start > end {
                return Err(invalid(
                    "window",
                    "start_date",
                    "start_date must not be after end_date",
                ));
            }
            Ok(())
        }
    }
}

pub fn parse_window_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, SmagridError> {
    let raw = config
        .get_string("window", key)
        .ok_or_else(|| SmagridError::ConfigMissing {
            section: "window".to_string(),
            key: key.to_string(),
        })?;
    NaiveDate::parse_from_str(raw.trim(), DATE_KEY_FORMAT).map_err(|_| {
        invalid(
            "window",
            key,
            format!("invalid {} format, expected YYYY-MM-DD", key),
        )
    })
}
