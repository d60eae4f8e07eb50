//! Ranking report port trait.

use crate::domain::backtest::SymbolReport;
use crate::domain::error::SmagridError;
use std::path::Path;

/// Port for persisting per-symbol rankings.
pub trait ReportPort {
    /// `reports` follow the order of `requested`; symbols that failed are absent.
    fn write(
        &self,
        reports: &[SymbolReport],
        requested: &[String],
        output_path: &Path,
    ) -> Result<(), SmagridError>;
}
