use csv::StringRecord;
use std::path::{Path, PathBuf};

use crate::shared::error::LoadError;

/// A fully read CSV file with a header row.
///
/// Header lookup is case-insensitive and ignores surrounding whitespace.
/// Every data row must have as many fields as the header; a ragged row
/// fails the whole file.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl CsvSource {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(path, &text)
    }

    pub fn from_text(path: &Path, csv_text: &str) -> Result<Self, LoadError> {
        let csv_err = |source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        // Strip UTF-8 BOM if present
        let text = csv_text.trim_start_matches('\u{FEFF}');

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        tracing::debug!(
            "{}: {} columns, {} rows",
            path.display(),
            headers.len(),
            records.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in row origins.
    pub fn label(&self) -> String {
        self.path.display().to_string()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of a required column.
    pub fn column(&self, name: &str) -> Result<usize, LoadError> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| LoadError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    /// Data rows with the file line each one starts on (the header is
    /// line 1).
    pub fn rows(&self) -> impl Iterator<Item = (u64, &StringRecord)> {
        self.records.iter().enumerate().map(|(i, record)| {
            let line = record.position().map_or(i as u64 + 2, |p| p.line());
            (line, record)
        })
    }
}

/// Field value exactly as written; missing fields read as empty.
pub fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).map(str::to_string).unwrap_or_default()
}
