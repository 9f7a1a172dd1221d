//! Data types used by the report pipeline.

use serde::Serialize;
use std::fmt;

use crate::reports::aggregate::RowWarning;

pub const STUDENT_NAME: &str = "student_name";
pub const TEACHER_NAME: &str = "teacher_name";
pub const GRADE: &str = "grade";

/// Every report the tool knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    StudentsPerformance,
    TeacherPerformance,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [
        ReportKind::StudentsPerformance,
        ReportKind::TeacherPerformance,
    ];

    /// Name used on the command line and as the registry key.
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::StudentsPerformance => "students_performance",
            ReportKind::TeacherPerformance => "teacher_performance",
        }
    }

    /// Fields that must be present and non-blank in every input row.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            ReportKind::StudentsPerformance => &[STUDENT_NAME, GRADE],
            ReportKind::TeacherPerformance => &[TEACHER_NAME, STUDENT_NAME, GRADE],
        }
    }

    /// Decimal places kept in the average.
    pub fn precision(self) -> u32 {
        match self {
            ReportKind::StudentsPerformance => 1,
            ReportKind::TeacherPerformance => 2,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finalized aggregate for one student or teacher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub average: f64,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
}

/// Unranked rows plus the rows that were skipped while producing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
    pub warnings: Vec<RowWarning>,
}
