pub mod error;
pub mod reader;
pub mod reports;

pub use error::{ReportError, Result};
