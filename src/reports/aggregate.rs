use crate::reader::Record;
use crate::reports::types::SummaryRow;
use crate::reports::utility::{mean, parse_score, round_to};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Which columns drive a grouping pass.
#[derive(Debug, Clone, Copy)]
pub struct Grouping {
    /// Rows sharing this column's value land in the same group.
    pub key_field: &'static str,
    /// Numeric column that is averaged.
    pub value_field: &'static str,
    /// Optional column collected alongside each value.
    pub member_field: Option<&'static str>,
}

/// Values collected for one key while folding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub key: String,
    pub values: Vec<f64>,
    pub members: Vec<String>,
}

/// Groups in first-seen key order.
#[derive(Debug, Default)]
pub struct Groups {
    index: HashMap<String, usize>,
    groups: Vec<Group>,
    with_members: bool,
}

impl Groups {
    fn entry(&mut self, key: &str) -> &mut Group {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.groups.push(Group {
                    key: key.to_string(),
                    ..Group::default()
                });
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx]
    }

    pub fn get(&self, key: &str) -> Option<&Group> {
        self.index.get(key).map(|&idx| &self.groups[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingField,
    InvalidNumber,
}

/// A row left out of aggregation. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowWarning {
    /// 1-based position in the concatenated input.
    pub row: usize,
    pub field: String,
    pub value: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reason, &self.value) {
            (SkipReason::InvalidNumber, Some(value)) => write!(
                f,
                "row {}: invalid number '{}' in field '{}', row skipped",
                self.row, value, self.field
            ),
            _ => write!(
                f,
                "row {}: field '{}' is missing, row skipped",
                self.row, self.field
            ),
        }
    }
}

/// Folds `records` into groups keyed by `grouping.key_field`.
///
/// Rows whose value does not parse as a finite number, or that lack one of the
/// grouping columns, are skipped and reported as warnings in row order.
pub fn fold_records(records: &[Record], grouping: &Grouping) -> (Groups, Vec<RowWarning>) {
    let mut groups = Groups {
        with_members: grouping.member_field.is_some(),
        ..Groups::default()
    };
    let mut warnings = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let row = i + 1;

        macro_rules! require {
            ($field:expr) => {
                match record.get($field) {
                    Some(value) => value,
                    None => {
                        warnings.push(RowWarning {
                            row,
                            field: $field.to_string(),
                            value: None,
                            reason: SkipReason::MissingField,
                        });
                        continue;
                    }
                }
            };
        }

        let key = require!(grouping.key_field);
        let raw = require!(grouping.value_field);
        let member = match grouping.member_field {
            Some(field) => Some(require!(field)),
            None => None,
        };

        let Some(value) = parse_score(raw) else {
            warnings.push(RowWarning {
                row,
                field: grouping.value_field.to_string(),
                value: Some(raw.to_string()),
                reason: SkipReason::InvalidNumber,
            });
            continue;
        };

        let group = groups.entry(key);
        group.values.push(value);
        if let Some(member) = member {
            group.members.push(member.to_string());
        }
    }

    (groups, warnings)
}

/// Turns each non-empty group into a [`SummaryRow`], keeping group order.
pub fn finalize(groups: Groups, precision: u32) -> Vec<SummaryRow> {
    let with_members = groups.with_members;

    groups
        .groups
        .into_iter()
        .filter(|g| !g.values.is_empty())
        .map(|g| {
            let members = with_members.then(|| {
                let mut members = g.members;
                members.sort();
                members
            });
            SummaryRow {
                average: round_to(mean(&g.values), precision),
                count: g.values.len(),
                name: g.key,
                members,
            }
        })
        .collect()
}
