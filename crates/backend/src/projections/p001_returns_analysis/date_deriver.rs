use chrono::{Datelike, NaiveDate, NaiveDateTime};
use contracts::projections::p001_returns_analysis::{MergedRecord, MonthYear};

use super::merger::JoinedOrder;
use crate::shared::error::ParseError;

/// Accepted date-only layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Accepted date-time layouts; the time part is dropped.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub fn parse_order_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse every order date and attach year, month and month bucket.
///
/// Fails on the first unparseable date; rows are never dropped or left
/// without a date.
pub fn derive_dates(rows: Vec<JoinedOrder>) -> Result<Vec<MergedRecord>, ParseError> {
    rows.into_iter().map(derive_row).collect()
}

fn derive_row(row: JoinedOrder) -> Result<MergedRecord, ParseError> {
    let JoinedOrder {
        order,
        returned,
        person,
    } = row;

    let date = parse_order_date(&order.order_date).ok_or_else(|| ParseError::InvalidDate {
        origin: order.origin.clone(),
        value: order.order_date.clone(),
    })?;

    Ok(MergedRecord {
        order_id: order.order_id,
        order_date: date,
        region: order.region,
        sales: order.sales,
        attributes: order.attributes,
        returned,
        person,
        year: date.year(),
        month: date.month(),
        month_year: MonthYear::from(date),
        origin: order.origin,
    })
}
