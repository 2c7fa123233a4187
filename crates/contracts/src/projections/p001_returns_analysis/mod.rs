pub mod month_year;
pub mod row;

pub use month_year::MonthYear;
pub use row::{JoinCardinalityWarning, MergeReport, MergedRecord};
