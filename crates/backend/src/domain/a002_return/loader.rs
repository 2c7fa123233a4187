use contracts::domain::a001_order::ORDER_ID;
use contracts::domain::a002_return::{ReturnRecord, RETURNED};
use std::path::Path;

use crate::shared::data::csv_source::{field, CsvSource};
use crate::shared::error::LoadError;

/// Read the returns reference table.
pub fn load_returns(path: &Path) -> Result<Vec<ReturnRecord>, LoadError> {
    let source = CsvSource::open(path)?;
    let returns = parse_returns(&source)?;
    tracing::info!("Loaded {} returns rows from {}", returns.len(), path.display());
    Ok(returns)
}

pub fn parse_returns(source: &CsvSource) -> Result<Vec<ReturnRecord>, LoadError> {
    let id_col = source.column(ORDER_ID)?;
    let returned_col = source.column(RETURNED)?;

    Ok(source
        .rows()
        .map(|(_, record)| ReturnRecord {
            order_id: field(record, id_col),
            returned: field(record, returned_col),
        })
        .collect())
}
