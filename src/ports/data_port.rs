//! Price data access port trait.

use crate::domain::error::SmagridError;
use crate::domain::price_table::PriceTable;

pub trait DataPort {
    /// Loads the full daily table: every symbol, every parsable day, in file order.
    fn load_table(&self) -> Result<PriceTable, SmagridError>;

    fn list_symbols(&self) -> Result<Vec<String>, SmagridError> {
        Ok(self.load_table()?.symbols)
    }
}
