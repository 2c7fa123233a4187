use contracts::dashboards::d001_returns_dashboard::{FilterOptions, FilterSelection};
use contracts::projections::p001_returns_analysis::MergedRecord;
use std::collections::BTreeSet;

/// Sorted distinct values of the whole table, for the filter controls.
pub fn filter_options(rows: &[MergedRecord]) -> FilterOptions {
    let regions: BTreeSet<&str> = rows.iter().map(|r| r.region.as_str()).collect();
    let persons: BTreeSet<Option<&str>> = rows.iter().map(|r| r.person.as_deref()).collect();
    let years: BTreeSet<i32> = rows.iter().map(|r| r.year).collect();

    FilterOptions {
        regions: regions.into_iter().map(str::to_string).collect(),
        persons: persons
            .into_iter()
            .map(|p| p.map(str::to_string))
            .collect(),
        years: years.into_iter().collect(),
    }
}

/// Whether a row passes every predicate of the selection. An unset
/// predicate accepts everything; an empty set accepts nothing.
pub fn matches(row: &MergedRecord, selection: &FilterSelection) -> bool {
    let region_ok = selection
        .regions
        .as_ref()
        .map_or(true, |set| set.contains(&row.region));
    let person_ok = selection
        .persons
        .as_ref()
        .map_or(true, |set| set.contains(&row.person));
    let year_ok = selection
        .years
        .as_ref()
        .map_or(true, |set| set.contains(&row.year));

    region_ok && person_ok && year_ok
}

/// Fresh table of the rows passing the selection, in table order.
pub fn apply_filter(rows: &[MergedRecord], selection: &FilterSelection) -> Vec<MergedRecord> {
    rows.iter()
        .filter(|row| matches(row, selection))
        .cloned()
        .collect()
}
