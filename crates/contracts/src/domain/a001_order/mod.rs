pub mod aggregate;

pub use aggregate::{OrderRecord, ORDER_DATE, ORDER_ID, REGION, SALES};
