use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::projections::p001_returns_analysis::{JoinCardinalityWarning, MergedRecord, MonthYear};
use crate::shared::indicators::IndicatorValue;

/// Current filter of the dashboard.
///
/// `None` means "every value present in the data". `Some` of an empty set
/// selects nothing, so the filtered table is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub regions: Option<BTreeSet<String>>,
    /// `None` inside the set stands for rows whose region has no person.
    #[serde(default)]
    pub persons: Option<BTreeSet<Option<String>>>,
    #[serde(default)]
    pub years: Option<BTreeSet<i32>>,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.regions.is_none() && self.persons.is_none() && self.years.is_none()
    }
}

/// A single user interaction with the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum FilterEvent {
    SetRegions(Option<BTreeSet<String>>),
    SetPersons(Option<BTreeSet<Option<String>>>),
    SetYears(Option<BTreeSet<i32>>),
    Reset,
}

impl FilterEvent {
    pub fn apply_to(self, selection: &mut FilterSelection) {
        match self {
            FilterEvent::SetRegions(regions) => selection.regions = regions,
            FilterEvent::SetPersons(persons) => selection.persons = persons,
            FilterEvent::SetYears(years) => selection.years = years,
            FilterEvent::Reset => *selection = FilterSelection::all(),
        }
    }
}

/// Distinct values available for the filter controls, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub persons: Vec<Option<String>>,
    pub years: Vec<i32>,
}

/// Returned line items attributed to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCount {
    pub person: String,
    pub count: usize,
}

/// Returned line items in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month_year: MonthYear,
    pub count: usize,
}

/// Everything a presenter needs to render the dashboard once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub session_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub filter: FilterSelection,
    pub options: FilterOptions,
    /// KPI cards, in catalogue order.
    pub indicators: Vec<IndicatorValue>,
    pub top_employees: Vec<EmployeeCount>,
    /// Ascending by month.
    pub monthly_returns: Vec<MonthlyCount>,
    /// Same buckets as `monthly_returns`, holding the count of the same
    /// month one year earlier. Empty unless the series spans more than a year.
    pub previous_year_returns: Vec<MonthlyCount>,
    /// Share of returned line items per employee; values sum to 1.
    pub employee_share: BTreeMap<String, f64>,
    pub rows: Vec<MergedRecord>,
    pub warnings: Vec<JoinCardinalityWarning>,
}
