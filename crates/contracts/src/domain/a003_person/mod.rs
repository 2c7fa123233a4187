pub mod aggregate;

pub use aggregate::{PersonRecord, PERSON};
