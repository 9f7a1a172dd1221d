//! Report construction, aggregation and rendering.
//!
//! Every report validates its records on construction, folds them into
//! per-entity groups, ranks the finalized rows by average and renders them as
//! a text table. [`registry::ReportRegistry`] maps report names to
//! constructors so the entry point never names a concrete report type.

pub mod aggregate;
pub mod rank;
pub mod registry;
pub mod schema;
pub mod students;
pub mod teachers;
pub mod types;
pub mod utility;

use tracing::warn;

use crate::error::Result;
use crate::reports::types::{ReportKind, Summary, SummaryRow};

/// What every report kind can do once its records are validated.
pub trait Report {
    fn kind(&self) -> ReportKind;

    /// Aggregates the records into unranked rows, collecting skipped rows.
    fn summarize(&self) -> Summary;

    /// Lays out already ranked rows as a table.
    fn render(&self, rows: &[SummaryRow]) -> String;

    /// Ranked rows, highest average first.
    ///
    /// Skipped rows are logged as warnings here.
    ///
    /// # Errors
    ///
    /// [`crate::ReportError::EmptyReport`] when no group survived aggregation.
    fn rows(&self) -> Result<Vec<SummaryRow>> {
        let kind = self.kind();
        let summary = self.summarize();
        for warning in &summary.warnings {
            warn!(report = %kind, row = warning.row, field = %warning.field, "{warning}");
        }
        rank::rank(summary.rows, kind)
    }

    /// The rendered report table.
    fn generate(&self) -> Result<String> {
        let rows = self.rows()?;
        Ok(self.render(&rows))
    }
}
