use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::common::RowOrigin;

/// Required column headers of an order partition file.
pub const ORDER_ID: &str = "Order ID";
pub const ORDER_DATE: &str = "Order Date";
pub const REGION: &str = "Region";
pub const SALES: &str = "Sales";

/// One order line as read from a partition file.
///
/// `order_id` is not unique: an order with several line items appears
/// once per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    /// Raw date text; parsed later by the date deriver.
    pub order_date: String,
    pub region: String,
    pub sales: f64,
    /// Every other column of the partition, by header name.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub origin: RowOrigin,
}
