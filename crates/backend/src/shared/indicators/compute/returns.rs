use contracts::projections::p001_returns_analysis::MergedRecord;
use contracts::shared::indicators::*;

use crate::dashboards::d001_returns_dashboard::metrics;
use crate::shared::indicators::metadata::ids;

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

pub fn compute_total_orders(rows: &[MergedRecord]) -> IndicatorValue {
    IndicatorValue {
        id: ids::total_orders(),
        value: Some(metrics::total_orders(rows) as f64),
        status: IndicatorStatus::Neutral,
        subtitle: None,
    }
}

pub fn compute_return_count(rows: &[MergedRecord]) -> IndicatorValue {
    IndicatorValue {
        id: ids::return_count(),
        value: Some(metrics::return_count(rows) as f64),
        status: IndicatorStatus::Neutral,
        subtitle: None,
    }
}

pub fn compute_return_rate(rows: &[MergedRecord]) -> IndicatorValue {
    let subtitle = if metrics::total_orders(rows) == 0 {
        Some("No orders in selection".to_string())
    } else {
        None
    };
    IndicatorValue {
        id: ids::return_rate(),
        value: Some(metrics::return_rate(rows)),
        status: IndicatorStatus::Neutral,
        subtitle,
    }
}

pub fn compute_avg_return_value(rows: &[MergedRecord]) -> IndicatorValue {
    let value = metrics::avg_return_value(rows);
    IndicatorValue {
        id: ids::avg_return_value(),
        value,
        status: IndicatorStatus::Neutral,
        subtitle: value.is_none().then(|| "No returned items".to_string()),
    }
}
