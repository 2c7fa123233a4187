use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::month_year::MonthYear;
use crate::domain::a002_return::RETURNED_YES;
use crate::domain::common::RowOrigin;

/// Order line joined with returns and people, plus the derived date fields.
///
/// Built once per session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub region: String,
    pub sales: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Returned flag; `None` when the order has no returns row.
    pub returned: Option<String>,
    /// Responsible employee; `None` when the region has no people row.
    pub person: Option<String>,
    pub year: i32,
    pub month: u32,
    pub month_year: MonthYear,
    pub origin: RowOrigin,
}

impl MergedRecord {
    pub fn is_returned(&self) -> bool {
        self.returned.as_deref() == Some(RETURNED_YES)
    }
}

/// A right-hand join table had more than one row for a key, so every
/// matching left row was replicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinCardinalityWarning {
    /// Join name, e.g. `"orders ⋈ people"`.
    pub join: String,
    pub key: String,
    /// Number of right-hand rows sharing `key`.
    pub right_rows: usize,
    /// Rows added to the output beyond the left-hand row count.
    pub extra_rows: usize,
}

impl std::fmt::Display for JoinCardinalityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: key {:?} matches {} rows, {} extra output rows",
            self.join, self.key, self.right_rows, self.extra_rows
        )
    }
}

/// Row accounting for the two left joins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub order_rows: usize,
    pub after_returns: usize,
    pub after_people: usize,
    pub warnings: Vec<JoinCardinalityWarning>,
}

impl MergeReport {
    pub fn has_fan_out(&self) -> bool {
        !self.warnings.is_empty()
    }
}
