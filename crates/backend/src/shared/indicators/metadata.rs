use contracts::shared::indicators::*;
use once_cell::sync::Lazy;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn total_orders() -> IndicatorId {
        IndicatorId::new("total_orders")
    }
    pub fn return_count() -> IndicatorId {
        IndicatorId::new("return_count")
    }
    pub fn return_rate() -> IndicatorId {
        IndicatorId::new("return_rate")
    }
    pub fn avg_return_value() -> IndicatorId {
        IndicatorId::new("avg_return_value")
    }
}

pub const RETURNS_OVERVIEW_SET: &str = "returns_overview";

static CATALOG: Lazy<IndicatorCatalog> = Lazy::new(build_catalog);

/// Shared, immutable catalogue.
pub fn catalog() -> &'static IndicatorCatalog {
    &CATALOG
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalog {
    let indicators = vec![
        IndicatorMeta {
            id: ids::total_orders(),
            label: "Total Orders".into(),
            short_label: Some("Orders".into()),
            icon: "orders".into(),
            format: ValueFormat::Integer,
            description: Some("Distinct order IDs in the selection".into()),
        },
        IndicatorMeta {
            id: ids::return_count(),
            label: "Return Count".into(),
            short_label: Some("Returns".into()),
            icon: "package-x".into(),
            format: ValueFormat::Integer,
            description: Some("Distinct order IDs flagged Returned = Yes".into()),
        },
        IndicatorMeta {
            id: ids::return_rate(),
            label: "Return Rate".into(),
            short_label: Some("Rate".into()),
            icon: "percent".into(),
            format: ValueFormat::Percent { decimals: 2 },
            description: Some("Return Count / Total Orders".into()),
        },
        IndicatorMeta {
            id: ids::avg_return_value(),
            label: "Avg Return Value".into(),
            short_label: Some("Avg Return".into()),
            icon: "dollar-sign".into(),
            format: ValueFormat::Money {
                currency: "$".into(),
                decimals: 2,
            },
            description: Some("Mean Sales over returned line items".into()),
        },
    ];

    let sets = vec![IndicatorSetMeta {
        id: IndicatorSetId::new(RETURNS_OVERVIEW_SET),
        label: "Returns Overview".into(),
        indicators: vec![
            ids::total_orders(),
            ids::return_count(),
            ids::return_rate(),
            ids::avg_return_value(),
        ],
        columns: 3,
    }];

    IndicatorCatalog { indicators, sets }
}
