//! Returns analysis table: orders joined with returns and people, with
//! derived date fields. Built once per session.

pub mod date_deriver;
pub mod merger;

use contracts::domain::a001_order::OrderRecord;
use contracts::domain::a002_return::ReturnRecord;
use contracts::domain::a003_person::PersonRecord;
use contracts::projections::p001_returns_analysis::{MergeReport, MergedRecord};

use crate::shared::error::PipelineResult;

/// Merge and derive in one step.
pub fn build_table(
    orders: Vec<OrderRecord>,
    returns: &[ReturnRecord],
    people: &[PersonRecord],
) -> PipelineResult<(Vec<MergedRecord>, MergeReport)> {
    let (joined, report) = merger::merge(orders, returns, people);
    let rows = date_deriver::derive_dates(joined)?;
    Ok((rows, report))
}
