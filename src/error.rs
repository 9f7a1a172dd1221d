//! Error type shared by every stage of report generation.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of the report pipeline.
///
/// Anything in here aborts the invocation. Rows skipped during aggregation are
/// not errors; see [`crate::reports::aggregate::RowWarning`].
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("report '{name}' is not registered (available: {})", available.join(", "))]
    UnknownReportKind { name: String, available: Vec<String> },

    #[error("field '{field}' is missing in row {row}")]
    MissingField { field: String, row: usize },

    #[error("field '{field}' in row {row} must not be empty")]
    EmptyField { field: String, row: usize },

    #[error("no data for report '{kind}'")]
    EmptyReport { kind: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ReportError::NotFound {
            path: PathBuf::from("/non/existent/file.csv"),
        };
        assert_eq!(err.to_string(), "file '/non/existent/file.csv' not found");

        let err = ReportError::MissingField {
            field: "grade".into(),
            row: 3,
        };
        assert_eq!(err.to_string(), "field 'grade' is missing in row 3");

        let err = ReportError::UnknownReportKind {
            name: "nonexistent".into(),
            available: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            err.to_string(),
            "report 'nonexistent' is not registered (available: a, b)"
        );
    }
}
