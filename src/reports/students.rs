//! Average grade per student.

use crate::error::Result;
use crate::reader::Record;
use crate::reports::Report;
use crate::reports::aggregate::{Grouping, finalize, fold_records};
use crate::reports::schema::validate_records;
use crate::reports::types::{GRADE, ReportKind, STUDENT_NAME, Summary, SummaryRow};
use crate::reports::utility::format_average;
use tabled::settings::object::Columns;
use tabled::settings::style::HorizontalLine;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

const GROUPING: Grouping = Grouping {
    key_field: STUDENT_NAME,
    value_field: GRADE,
    member_field: None,
};

/// One rendered line of the student table.
#[derive(Debug, Tabled)]
struct StudentLine {
    #[tabled(rename = "Student Name")]
    name: String,
    #[tabled(rename = "Average Grade")]
    average: String,
}

#[derive(Debug)]
pub struct StudentPerformanceReport {
    records: Vec<Record>,
}

impl StudentPerformanceReport {
    const KIND: ReportKind = ReportKind::StudentsPerformance;

    /// Validates `records` and wraps them.
    ///
    /// # Errors
    ///
    /// The first missing or blank `student_name`/`grade`.
    pub fn new(records: Vec<Record>) -> Result<Self> {
        validate_records(Self::KIND.required_fields(), &records)?;
        Ok(Self { records })
    }

    /// Registry constructor.
    pub fn boxed(records: Vec<Record>) -> Result<Box<dyn Report>> {
        let report: Box<dyn Report> = Box::new(Self::new(records)?);
        Ok(report)
    }
}

impl Report for StudentPerformanceReport {
    fn kind(&self) -> ReportKind {
        Self::KIND
    }

    fn summarize(&self) -> Summary {
        let (groups, warnings) = fold_records(&self.records, &GROUPING);
        Summary {
            rows: finalize(groups, Self::KIND.precision()),
            warnings,
        }
    }

    fn render(&self, rows: &[SummaryRow]) -> String {
        let precision = Self::KIND.precision();
        let lines = rows.iter().map(|row| StudentLine {
            name: row.name.clone(),
            average: format_average(row.average, precision),
        });
        // ASCII grid with a `=` rule under the header.
        let style = Style::ascii()
            .horizontals([(1, HorizontalLine::inherit(Style::ascii()).horizontal('='))]);
        Table::new(lines)
            .with(style)
            .with(Modify::new(Columns::single(1)).with(Alignment::right()))
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    fn row(name: &str, grade: &str) -> Record {
        Record::new([
            ("student_name", name),
            ("subject", "Math"),
            ("teacher_name", "T1"),
            ("date", "2023-09-16"),
            ("grade", grade),
        ])
    }

    #[test]
    fn test_missing_grade_rejected_on_construction() {
        let records = vec![Record::new([
            ("student_name", "John Doe"),
            ("subject", "Math"),
        ])];
        let err = StudentPerformanceReport::new(records).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingField { ref field, row: 1 } if field == "grade"
        ));
    }

    #[test]
    fn test_teacher_name_not_required() {
        let records = vec![Record::new([("student_name", "John"), ("grade", "5")])];
        assert!(StudentPerformanceReport::new(records).is_ok());
    }

    #[test]
    fn test_multiple_grades_same_student() {
        let report = StudentPerformanceReport::new(vec![
            row("John Doe", "5"),
            row("John Doe", "4"),
            row("John Doe", "3"),
        ])
        .unwrap();
        let rows = report.rows().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "John Doe");
        assert_eq!(rows[0].average, 4.0);
    }

    #[test]
    fn test_invalid_grades_skipped() {
        let report = StudentPerformanceReport::new(vec![
            row("John Doe", "5"),
            row("Jane Smith", "invalid"),
            row("Bob Johnson", "4"),
        ])
        .unwrap();
        let summary = report.summarize();

        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].row, 2);
    }

    #[test]
    fn test_generate_sorted_table() {
        let report = StudentPerformanceReport::new(vec![
            row("Low", "2"),
            row("High", "5"),
            row("Mid", "3.5"),
        ])
        .unwrap();
        let out = report.generate().unwrap();

        let expected = "\
+--------------+---------------+
| Student Name | Average Grade |
+==============+===============+
| High         |           5.0 |
+--------------+---------------+
| Mid          |           3.5 |
+--------------+---------------+
| Low          |           2.0 |
+--------------+---------------+";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_exact_tie_rounds_to_even() {
        let report = StudentPerformanceReport::new(vec![
            row("Ann", "4"),
            row("Ann", "4"),
            row("Ann", "4"),
            row("Ann", "5"),
        ])
        .unwrap();
        let rows = report.rows().unwrap();

        assert_eq!(rows[0].average, 4.2);
        assert!(report.generate().unwrap().contains("| Ann          |           4.2 |"));
    }

    #[test]
    fn test_fractional_grades_accepted() {
        let records = vec![row("Ann", "4.5"), row("Ann", "5.0")];
        let report = StudentPerformanceReport::new(records).unwrap();
        let summary = report.summarize();

        assert!(summary.warnings.is_empty());
        assert_eq!(summary.rows[0].average, 4.8);
        assert_eq!(summary.rows[0].count, 2);
    }

    #[test]
    fn test_generate_empty_is_error() {
        let report = StudentPerformanceReport::new(Vec::new()).unwrap();
        assert!(matches!(report.generate(), Err(ReportError::EmptyReport { .. })));
    }
}
