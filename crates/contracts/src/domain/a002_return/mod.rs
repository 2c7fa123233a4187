pub mod aggregate;

pub use aggregate::{ReturnRecord, RETURNED, RETURNED_YES};
