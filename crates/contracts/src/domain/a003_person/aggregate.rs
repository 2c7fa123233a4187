use serde::{Deserialize, Serialize};

pub const PERSON: &str = "Person";

/// Row of the people reference table: the employee responsible for a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub region: String,
    pub person: String,
}
