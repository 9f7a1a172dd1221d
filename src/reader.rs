//! CSV record source.
//!
//! Reads any number of header-first CSV files and concatenates their rows,
//! in file order, into one sequence of [`Record`]s.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::error::{ReportError, Result};

/// One input row: field name to raw string value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn from_csv(headers: &StringRecord, row: &StringRecord) -> Self {
        Self::new(headers.iter().zip(row.iter()))
    }

    /// Value of `field`, if the row has that column.
    ///
    /// When a header repeats, the rightmost column wins.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reads every file in `paths` and returns their rows in order.
///
/// # Errors
///
/// Fails on the first file that is missing ([`ReportError::NotFound`]),
/// unreadable ([`ReportError::Io`]) or malformed ([`ReportError::Parse`]).
/// Rows already read from earlier files are discarded.
#[tracing::instrument(skip_all, fields(files = paths.len()))]
pub fn read_records<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let before = records.len();
        read_file(path, &mut records)?;
        debug!(path = %path.display(), rows = records.len() - before, "CSV file read");
    }

    Ok(records)
}

fn read_file(path: &Path, out: &mut Vec<Record>) -> Result<()> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ReportError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ReportError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut rdr = csv::Reader::from_reader(file);
    let headers = rdr.headers().map_err(|e| csv_error(path, e))?.clone();

    for result in rdr.records() {
        let row = result.map_err(|e| csv_error(path, e))?;
        out.push(Record::from_csv(&headers, &row));
    }

    Ok(())
}

fn csv_error(path: &Path, err: csv::Error) -> ReportError {
    let path = path.to_path_buf();
    if err.is_io_error() {
        ReportError::Io {
            path,
            source: err.into(),
        }
    } else {
        ReportError::Parse { path, source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_get_returns_column_value() {
        let record = Record::new([("student_name", "John"), ("grade", "5")]);
        assert_eq!(record.get("grade"), Some("5"));
        assert_eq!(record.get("teacher_name"), None);
    }

    #[test]
    fn test_duplicate_header_rightmost_wins() {
        let record = Record::new([("grade", "1"), ("grade", "2")]);
        assert_eq!(record.get("grade"), Some("2"));
    }

    #[test]
    fn test_reads_rows_with_extra_columns() {
        let file = csv_file("student_name,subject,grade\nJohn,Math,5\nJane,Physics,4\n");
        let records = read_records(&[file.path()]).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("student_name"), Some("John"));
        assert_eq!(records[0].get("subject"), Some("Math"));
        assert_eq!(records[1].get("grade"), Some("4"));
        let names: Vec<_> = records[1].fields().map(|(k, _)| k).collect();
        assert_eq!(names, ["student_name", "subject", "grade"]);
    }

    #[test]
    fn test_concatenates_files_in_order() {
        let first = csv_file("student_name,grade\nA,1\nB,2\n");
        let second = csv_file("student_name,grade\nC,3\n");
        let records = read_records(&[first.path(), second.path()]).unwrap();

        let names: Vec<_> = records
            .iter()
            .map(|r| r.get("student_name").unwrap())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let file = csv_file("student_name,subject,teacher_name,date,grade\n");
        let records = read_records(&[file.path()]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let present = csv_file("student_name,grade\nA,1\n");
        let missing = Path::new("/non/existent/file.csv");

        let err = read_records(&[present.path(), missing]).unwrap_err();
        match err {
            ReportError::NotFound { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let file = csv_file("student_name,grade\nJohn,5,extra\n");
        let err = read_records(&[file.path()]).unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"student_name,grade\n\xff\xfe,5\n").unwrap();
        let err = read_records(&[file.path()]).unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_records(&[dir.path()]).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
