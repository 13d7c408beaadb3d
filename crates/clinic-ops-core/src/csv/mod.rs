//! Lead CSV export and import.
//!
//! Export produces the fixed eight-column report the front desk hands to
//! marketing; import accepts spreadsheet dumps in the same column order.

mod export;
mod import;

pub use export::*;
pub use import::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    /// Export was asked to serialize an empty lead list.
    #[error("no leads to export")]
    NoRows,
}

pub type CsvResult<T> = Result<T, CsvError>;
