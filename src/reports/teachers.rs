//! Average grade of the students graded by each teacher.

use crate::error::Result;
use crate::reader::Record;
use crate::reports::Report;
use crate::reports::aggregate::{Grouping, finalize, fold_records};
use crate::reports::schema::validate_records;
use crate::reports::types::{
    GRADE, ReportKind, STUDENT_NAME, Summary, SummaryRow, TEACHER_NAME,
};
use crate::reports::utility::format_average;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

const GROUPING: Grouping = Grouping {
    key_field: TEACHER_NAME,
    value_field: GRADE,
    member_field: Some(STUDENT_NAME),
};

#[derive(Debug, Tabled)]
struct TeacherLine {
    #[tabled(rename = "Teacher Name")]
    name: String,
    #[tabled(rename = "Average Grade")]
    average: String,
    #[tabled(rename = "Students Count")]
    count: usize,
    #[tabled(rename = "Students")]
    students: String,
}

#[derive(Debug)]
pub struct TeacherPerformanceReport {
    records: Vec<Record>,
}

impl TeacherPerformanceReport {
    const KIND: ReportKind = ReportKind::TeacherPerformance;

    /// Validates `records` and wraps them.
    ///
    /// `student_name` is required alongside `teacher_name` and `grade` since
    /// every graded row is listed under its teacher.
    pub fn new(records: Vec<Record>) -> Result<Self> {
        validate_records(Self::KIND.required_fields(), &records)?;
        Ok(Self { records })
    }

    pub fn boxed(records: Vec<Record>) -> Result<Box<dyn Report>> {
        let report: Box<dyn Report> = Box::new(Self::new(records)?);
        Ok(report)
    }
}

impl Report for TeacherPerformanceReport {
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
        let lines = rows.iter().map(|row| TeacherLine {
            name: row.name.clone(),
            average: format_average(row.average, precision),
            count: row.count,
            students: row.members.as_deref().unwrap_or_default().join(", "),
        });
        Table::new(lines)
            .with(Style::modern())
            .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
            .to_string()
    }
}
