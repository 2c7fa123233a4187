use contracts::domain::a001_order::OrderRecord;
use contracts::domain::a002_return::ReturnRecord;
use contracts::domain::a003_person::PersonRecord;
use contracts::projections::p001_returns_analysis::{JoinCardinalityWarning, MergeReport};
use std::collections::{BTreeMap, HashMap};

pub const RETURNS_JOIN: &str = "orders ⋈ returns";
pub const PEOPLE_JOIN: &str = "orders ⋈ people";

/// Order line after both left joins, before date derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedOrder {
    pub order: OrderRecord,
    pub returned: Option<String>,
    pub person: Option<String>,
}

/// Left-join orders with returns on order id, then with people on region.
///
/// Keys compare as exact, case-sensitive strings. Every left row survives;
/// a key with several right rows replicates the left row once per right
/// row, in right-table order, and is reported in the returned `MergeReport`.
pub fn merge(
    orders: Vec<OrderRecord>,
    returns: &[ReturnRecord],
    people: &[PersonRecord],
) -> (Vec<JoinedOrder>, MergeReport) {
    let order_rows = orders.len();
    let mut warnings = Vec::new();

    // orders ⋈ returns
    let returns_index = index_by(returns, |r| r.order_id.as_str());
    warnings.extend(fan_out_warnings(
        RETURNS_JOIN,
        &returns_index,
        orders.iter().map(|o| o.order_id.as_str()),
    ));

    let mut with_returns = Vec::with_capacity(order_rows);
    for order in orders {
        match returns_index.get(order.order_id.as_str()) {
            Some(matches) => {
                for ret in matches {
                    with_returns.push(JoinedOrder {
                        order: order.clone(),
                        returned: Some(ret.returned.clone()),
                        person: None,
                    });
                }
            }
            None => with_returns.push(JoinedOrder {
                order,
                returned: None,
                person: None,
            }),
        }
    }
    let after_returns = with_returns.len();

    // (orders ⋈ returns) ⋈ people
    let people_index = index_by(people, |p| p.region.as_str());
    warnings.extend(fan_out_warnings(
        PEOPLE_JOIN,
        &people_index,
        with_returns.iter().map(|j| j.order.region.as_str()),
    ));

    let mut joined = Vec::with_capacity(after_returns);
    for row in with_returns {
        match people_index.get(row.order.region.as_str()) {
            Some(matches) => {
                for person in matches {
                    joined.push(JoinedOrder {
                        person: Some(person.person.clone()),
                        ..row.clone()
                    });
                }
            }
            None => joined.push(row),
        }
    }
    let after_people = joined.len();

    debug_assert!(after_returns >= order_rows && after_people >= after_returns);

    for warning in &warnings {
        tracing::warn!("Join fan-out: {}", warning);
    }
    tracing::info!(
        "Merged {} order lines -> {} after returns -> {} after people",
        order_rows,
        after_returns,
        after_people
    );

    let report = MergeReport {
        order_rows,
        after_returns,
        after_people,
        warnings,
    };
    (joined, report)
}

fn index_by<'a, T>(rows: &'a [T], key: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, Vec<&'a T>> {
    let mut index: HashMap<&str, Vec<&T>> = HashMap::new();
    for row in rows {
        index.entry(key(row)).or_default().push(row);
    }
    index
}

/// One warning per duplicated right key that actually matched left rows.
fn fan_out_warnings<'a, T>(
    join: &str,
    index: &HashMap<&str, Vec<&T>>,
    left_keys: impl Iterator<Item = &'a str>,
) -> Vec<JoinCardinalityWarning> {
    let mut left_hits: BTreeMap<&str, usize> = BTreeMap::new();
    for key in left_keys {
        if index.get(key).map_or(false, |m| m.len() > 1) {
            *left_hits.entry(key).or_insert(0) += 1;
        }
    }

    left_hits
        .into_iter()
        .map(|(key, hits)| {
            let right_rows = index.get(key).map_or(0, Vec::len);
            JoinCardinalityWarning {
                join: join.to_string(),
                key: key.to_string(),
                right_rows,
                extra_rows: hits * (right_rows - 1),
            }
        })
        .collect()
}
