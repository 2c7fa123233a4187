//! Common types shared by all source records

pub mod origin;

// Re-exports
pub use origin::RowOrigin;
