use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{ReportError, Result};
use crate::reader::{Record, read_records};
use crate::reports::Report;
use crate::reports::students::StudentPerformanceReport;
use crate::reports::teachers::TeacherPerformanceReport;
use crate::reports::types::ReportKind;

/// Builds a report from freshly read records, validating them on the way.
pub type ReportConstructor = fn(Vec<Record>) -> Result<Box<dyn Report>>;

/// Report name to constructor.
///
/// Filled once at startup, then only read.
#[derive(Default)]
pub struct ReportRegistry {
    constructors: HashMap<String, ReportConstructor>,
}

impl ReportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in report kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            ReportKind::StudentsPerformance.name(),
            StudentPerformanceReport::boxed,
        );
        registry.register(
            ReportKind::TeacherPerformance.name(),
            TeacherPerformanceReport::boxed,
        );
        registry
    }

    /// Adds `name`, replacing any previous constructor under it.
    pub fn register(&mut self, name: impl Into<String>, constructor: ReportConstructor) {
        self.constructors.insert(name.into(), constructor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Reads `files` and builds the report registered as `name`.
    ///
    /// # Errors
    ///
    /// [`ReportError::UnknownReportKind`] before any file is touched when
    /// `name` is not registered; otherwise whatever reading or validating the
    /// records fails with.
    #[tracing::instrument(skip(self, files), fields(files = files.len()))]
    pub fn create<P: AsRef<Path>>(&self, name: &str, files: &[P]) -> Result<Box<dyn Report>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ReportError::UnknownReportKind {
                name: name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            })?;

        let records = read_records(files)?;
        debug!(records = records.len(), "Records loaded");
        constructor(records)
    }
}
