use contracts::domain::a001_order::{OrderRecord, ORDER_DATE, ORDER_ID, REGION, SALES};
use contracts::domain::common::RowOrigin;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::shared::data::csv_source::{field, CsvSource};
use crate::shared::error::{LoadError, ParseError, PipelineResult};

/// Partition files in `dir` matching `pattern`, in lexical order.
pub fn discover_partitions(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, LoadError> {
    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern
    );

    let entries = glob::glob(&full_pattern).map_err(|e| LoadError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| LoadError::Io {
            path: e.path().to_path_buf(),
            source: e.into(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(LoadError::NoPartitions {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }
    Ok(files)
}

/// Read and concatenate every order partition. Row order is preserved
/// and duplicates are kept.
pub fn load_orders(dir: &Path, pattern: &str) -> PipelineResult<Vec<OrderRecord>> {
    let files = discover_partitions(dir, pattern)?;
    tracing::info!("Loading {} order partitions from {}", files.len(), dir.display());

    let mut orders = Vec::new();
    for path in &files {
        let source = CsvSource::open(path)?;
        let mut rows = parse_partition(&source)?;
        tracing::debug!("{}: {} order lines", path.display(), rows.len());
        orders.append(&mut rows);
    }

    tracing::info!("Loaded {} order lines", orders.len());
    Ok(orders)
}

pub fn parse_partition(source: &CsvSource) -> PipelineResult<Vec<OrderRecord>> {
    let id_col = source.column(ORDER_ID)?;
    let date_col = source.column(ORDER_DATE)?;
    let region_col = source.column(REGION)?;
    let sales_col = source.column(SALES)?;
    let required = [id_col, date_col, region_col, sales_col];

    let label = source.label();
    let mut orders = Vec::with_capacity(source.len());

    for (line, record) in source.rows() {
        let origin = RowOrigin::new(label.clone(), line);

        let raw_sales = field(record, sales_col);
        let sales = parse_amount(&raw_sales).ok_or_else(|| ParseError::InvalidNumber {
            origin: origin.clone(),
            column: SALES.to_string(),
            value: raw_sales.clone(),
        })?;

        let attributes: BTreeMap<String, String> = source
            .headers()
            .iter()
            .enumerate()
            .filter(|(i, _)| !required.contains(i))
            .map(|(i, name)| (name.clone(), field(record, i)))
            .collect();

        orders.push(OrderRecord {
            order_id: field(record, id_col),
            order_date: field(record, date_col),
            region: field(record, region_col),
            sales,
            attributes,
            origin,
        });
    }

    Ok(orders)
}

/// Parse a sales amount: an optional `-`, an optional `$`, then a decimal
/// number. Commas are accepted only as thousands separators between
/// groups of three digits.
pub fn parse_amount(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let body = rest.strip_prefix('$').unwrap_or(rest);
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body, None),
    };
    let digits = strip_thousands(int_part)?;
    let normalized = match frac_part {
        Some(frac) => format!("{digits}.{frac}"),
        None => digits,
    };

    let value = normalized.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -value } else { value })
}

/// Remove `,` separators from an integer part, or `None` when they do not
/// split it into a 1-3 digit lead group and 3-digit groups.
fn strip_thousands(int_part: &str) -> Option<String> {
    if !int_part.contains(',') {
        return Some(int_part.to_string());
    }

    let mut groups = int_part.split(',');
    let lead = groups.next()?;
    let lead_ok = (1..=3).contains(&lead.len()) && lead.bytes().all(|b| b.is_ascii_digit());
    if !lead_ok {
        return None;
    }

    let mut digits = lead.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::PipelineError;

    fn write(dir: &Path, name: &str, text: &str) {
        std::fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount(" $1,234.50 "), Some(1234.5));
        assert_eq!(parse_amount("-$5"), Some(-5.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("12,345,678"), Some(12_345_678.0));
        assert_eq!(parse_amount(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_amount_rejects_malformed_numbers() {
        for raw in ["--5", "-$-5", "$$$7", "$-5", "1,23", "1,,2", ",100", "1234,567", "1.2,3", "+5", "$", "-", "1e400"] {
            assert_eq!(parse_amount(raw), None, "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_partitions_concatenate_in_order_without_dedup() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "orders_2023.csv",
            "Order ID,Order Date,Region,Sales,Category\nO1,2023-01-05,East,100,Office\nO1,2023-01-05,East,50,Office\n",
        );
        write(
            dir.path(),
            "orders_2024.csv",
            "Order ID,Order Date,Region,Sales,Category\nO1,2023-01-05,East,100,Office\nO2,2024-02-01,West,10,Tech\n",
        );
        write(dir.path(), "notes.txt", "not an order file");

        let orders = load_orders(dir.path(), "*.csv").unwrap();
        assert_eq!(orders.len(), 4);
        assert_eq!(orders[0].sales, 100.0);
        assert_eq!(orders[1].sales, 50.0);
        assert_eq!(orders[2], OrderRecord { origin: orders[2].origin.clone(), ..orders[0].clone() });
        assert_eq!(orders[3].order_id, "O2");
        assert_eq!(orders[3].attributes.get("Category").map(String::as_str), Some("Tech"));
        assert!(!orders[3].attributes.contains_key("Sales"));
        assert_eq!(orders[3].origin.line, 3);
        assert!(orders[3].origin.file.ends_with("orders_2024.csv"));
    }

    #[test]
    fn test_no_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_orders(dir.path(), "*.csv").unwrap_err();
        assert!(matches!(err, PipelineError::Load(LoadError::NoPartitions { .. })));
    }

    #[test]
    fn test_missing_required_column() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.csv", "Order ID,Order Date,Sales\nO1,2023-01-05,1\n");
        let err = load_orders(dir.path(), "*.csv").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Load(LoadError::MissingColumn { ref column, .. }) if column == REGION
        ));
    }

    #[test]
    fn test_bad_sales_value() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.csv", "Order ID,Order Date,Region,Sales\nO1,2023-01-05,East,lots\n");
        let err = load_orders(dir.path(), "*.csv").unwrap_err();
        match err {
            PipelineError::Parse(ParseError::InvalidNumber { origin, value, .. }) => {
                assert_eq!(origin.line, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decimal_comma_sales_fail_load() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.csv",
            "Order ID,Order Date,Region,Sales\nO1,2023-01-05,East,100\nO2,2023-01-06,East,\"1,23\"\n",
        );
        let err = load_orders(dir.path(), "*.csv").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Parse(ParseError::InvalidNumber { ref origin, ref value, .. })
                if origin.line == 3 && value == "1,23"
        ));
    }

    #[test]
    fn test_join_keys_are_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.csv",
            "Order ID,Order Date,Region,Sales\n O1,2023-01-05,East ,$ 1\n",
        );
        assert!(load_orders(dir.path(), "*.csv").is_err());

        write(dir.path(), "a.csv", "Order ID,Order Date,Region,Sales\n O1,2023-01-05,East , 1 \n");
        let orders = load_orders(dir.path(), "*.csv").unwrap();
        assert_eq!(orders[0].order_id, " O1");
        assert_eq!(orders[0].region, "East ");
        assert_eq!(orders[0].sales, 1.0);
    }
}
