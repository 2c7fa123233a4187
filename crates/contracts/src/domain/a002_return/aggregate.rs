use serde::{Deserialize, Serialize};

pub const RETURNED: &str = "Returned";

/// The only flag value that marks an order as returned.
pub const RETURNED_YES: &str = "Yes";

/// Row of the returns reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub order_id: String,
    pub returned: String,
}

impl ReturnRecord {
    pub fn is_returned(&self) -> bool {
        self.returned == RETURNED_YES
    }
}
