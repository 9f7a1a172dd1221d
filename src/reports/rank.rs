use crate::error::{ReportError, Result};
use crate::reports::types::{ReportKind, SummaryRow};

/// Orders rows by average, highest first.
///
/// The sort is stable, so equal averages keep the order they were aggregated
/// in. An empty input is an error: there is nothing to render.
pub fn rank(mut rows: Vec<SummaryRow>, kind: ReportKind) -> Result<Vec<SummaryRow>> {
    if rows.is_empty() {
        return Err(ReportError::EmptyReport {
            kind: kind.to_string(),
        });
    }

    rows.sort_by(|a, b| b.average.total_cmp(&a.average));
    Ok(rows)
}
