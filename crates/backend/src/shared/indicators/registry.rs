use contracts::projections::p001_returns_analysis::MergedRecord;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::returns;
use super::metadata::ids;

type ComputeFn = fn(&[MergedRecord]) -> IndicatorValue;

/// Central registry: maps `IndicatorId` to its compute function.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::total_orders().0, returns::compute_total_orders);
        fns.insert(ids::return_count().0, returns::compute_return_count);
        fns.insert(ids::return_rate().0, returns::compute_return_rate);
        fns.insert(ids::avg_return_value().0, returns::compute_avg_return_value);

        Self { fns }
    }

    /// Compute a batch of indicators over the same rows, in request order.
    /// Unknown ids are logged and skipped.
    pub fn compute(&self, ids: &[IndicatorId], rows: &[MergedRecord]) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            match self.fns.get(&id.0) {
                Some(compute_fn) => results.push(compute_fn(rows)),
                None => tracing::warn!("indicator {} not found in registry", id.0),
            }
        }

        results
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_is_skipped() {
        let registry = IndicatorRegistry::new();
        let values = registry.compute(
            &[IndicatorId::new("nope"), ids::total_orders(), ids::avg_return_value()],
            &[],
        );
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].id, ids::total_orders());
        assert_eq!(values[0].value, Some(0.0));
        assert_eq!(values[1].value, None);
        assert!(values[1].subtitle.is_some());
    }
}
