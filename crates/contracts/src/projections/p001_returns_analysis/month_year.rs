use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar month bucket.
///
/// Ordered by year first, then month, so sorting buckets gives calendar
/// order. Serialized as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl MonthYear {
    /// Returns `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Same month one year earlier.
    pub fn pred_year(&self) -> Self {
        Self {
            year: self.year - 1,
            month: self.month,
        }
    }
}

impl From<NaiveDate> for MonthYear {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<MonthYear> for String {
    fn from(value: MonthYear) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for MonthYear {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (year, month) = value
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {value:?}"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in {value:?}"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in {value:?}"))?;
        MonthYear::new(year, month).ok_or_else(|| format!("month out of range in {value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_month_different_year_sorts_apart() {
        let mut buckets = vec![
            MonthYear::new(2024, 1).unwrap(),
            MonthYear::new(2023, 12).unwrap(),
            MonthYear::new(2023, 1).unwrap(),
        ];
        buckets.sort();
        assert_eq!(
            buckets.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
            vec!["2023-01", "2023-12", "2024-01"]
        );
        assert_ne!(buckets[0], buckets[2]);
    }

    #[test]
    fn test_from_date_and_serde() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap();
        let bucket = MonthYear::from(date);
        assert_eq!(bucket.pred_year().to_string(), "2022-07");

        let json = serde_json::to_string(&bucket).unwrap();
        assert_eq!(json, "\"2023-07\"");
        let back: MonthYear = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bucket);
        assert!(serde_json::from_str::<MonthYear>("\"2023-13\"").is_err());
    }
}
