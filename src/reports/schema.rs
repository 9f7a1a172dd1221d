//! Required-field validation shared by every report kind.

use crate::error::{ReportError, Result};
use crate::reader::Record;

/// Checks that every record carries a non-blank value for each of `required`.
///
/// Runs over the whole batch before anything is aggregated and stops at the
/// first violation. Rows are numbered from 1.
pub fn validate_records(required: &[&str], records: &[Record]) -> Result<()> {
    for (i, record) in records.iter().enumerate() {
        let row = i + 1;
        for &field in required {
            match record.get(field) {
                None => {
                    return Err(ReportError::MissingField {
                        field: field.to_string(),
                        row,
                    });
                }
                Some(value) if value.trim().is_empty() => {
                    return Err(ReportError::EmptyField {
                        field: field.to_string(),
                        row,
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}
