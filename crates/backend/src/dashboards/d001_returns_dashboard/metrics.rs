//! Aggregations over a filtered table. Pure functions; inputs are never
//! mutated and an empty table is always a valid input.

use contracts::dashboards::d001_returns_dashboard::{EmployeeCount, MonthlyCount};
use contracts::projections::p001_returns_analysis::{MergedRecord, MonthYear};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Monthly series must be longer than this to get a previous-year line.
pub const PREVIOUS_YEAR_MIN_BUCKETS: usize = 12;

fn returned(rows: &[MergedRecord]) -> impl Iterator<Item = &MergedRecord> {
    rows.iter().filter(|r| r.is_returned())
}

/// Distinct order IDs.
pub fn total_orders(rows: &[MergedRecord]) -> usize {
    rows.iter()
        .map(|r| r.order_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Distinct order IDs among returned rows.
pub fn return_count(rows: &[MergedRecord]) -> usize {
    returned(rows)
        .map(|r| r.order_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// `return_count / total_orders`, or 0 when there are no orders.
pub fn return_rate(rows: &[MergedRecord]) -> f64 {
    let total = total_orders(rows);
    if total == 0 {
        0.0
    } else {
        return_count(rows) as f64 / total as f64
    }
}

/// Mean sales over returned line items; `None` when nothing was returned.
pub fn avg_return_value(rows: &[MergedRecord]) -> Option<f64> {
    let (sum, count) = returned(rows).fold((0.0, 0usize), |(sum, count), r| (sum + r.sales, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Returned line items per employee. Rows without a person are left out.
fn returns_by_person(rows: &[MergedRecord]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in returned(rows) {
        if let Some(person) = row.person.as_deref() {
            *counts.entry(person).or_insert(0) += 1;
        }
    }
    counts
}

/// Top `n` employees by returned line items, highest first. Equal counts
/// are ordered by name.
pub fn top_employees_by_returns(rows: &[MergedRecord], n: usize) -> Vec<EmployeeCount> {
    let mut ranked: Vec<(&str, usize)> = returns_by_person(rows).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(n)
        .map(|(person, count)| EmployeeCount {
            person: person.to_string(),
            count,
        })
        .collect()
}

/// Returned line items per calendar month, oldest first.
pub fn monthly_return_counts(rows: &[MergedRecord]) -> Vec<MonthlyCount> {
    let mut buckets: BTreeMap<MonthYear, usize> = BTreeMap::new();
    for row in returned(rows) {
        *buckets.entry(row.month_year).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(month_year, count)| MonthlyCount { month_year, count })
        .collect()
}

/// For each bucket of `monthly`, the count of the same month a year
/// earlier (0 when that month had no returns). Empty unless the series has
/// more than `PREVIOUS_YEAR_MIN_BUCKETS` buckets.
///
/// Buckets are matched by calendar month, not by shifting the series 12
/// positions, so months with no returns do not misalign the line.
pub fn previous_year_counts(monthly: &[MonthlyCount]) -> Vec<MonthlyCount> {
    if monthly.len() <= PREVIOUS_YEAR_MIN_BUCKETS {
        return Vec::new();
    }

    let by_month: HashMap<MonthYear, usize> =
        monthly.iter().map(|m| (m.month_year, m.count)).collect();

    monthly
        .iter()
        .map(|m| MonthlyCount {
            month_year: m.month_year,
            count: by_month.get(&m.month_year.pred_year()).copied().unwrap_or(0),
        })
        .collect()
}

/// Share of returned line items per employee. Values sum to 1; the map is
/// empty when no returned row has a person.
pub fn employee_contribution_share(rows: &[MergedRecord]) -> BTreeMap<String, f64> {
    let counts = returns_by_person(rows);
    let total: usize = counts.values().sum();
    if total == 0 {
        return BTreeMap::new();
    }

    counts
        .into_iter()
        .map(|(person, count)| (person.to_string(), count as f64 / total as f64))
        .collect()
}
