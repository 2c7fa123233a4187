use contracts::domain::a001_order::REGION;
use contracts::domain::a003_person::{PersonRecord, PERSON};
use std::path::Path;

use crate::shared::data::csv_source::{field, CsvSource};
use crate::shared::error::LoadError;

/// Read the people (region → employee) reference table.
pub fn load_people(path: &Path) -> Result<Vec<PersonRecord>, LoadError> {
    let source = CsvSource::open(path)?;
    let people = parse_people(&source)?;
    tracing::info!("Loaded {} people rows from {}", people.len(), path.display());
    Ok(people)
}

pub fn parse_people(source: &CsvSource) -> Result<Vec<PersonRecord>, LoadError> {
    let region_col = source.column(REGION)?;
    let person_col = source.column(PERSON)?;

    Ok(source
        .rows()
        .map(|(_, record)| PersonRecord {
            region: field(record, region_col),
            person: field(record, person_col),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_people() {
        let source = CsvSource::from_text(
            Path::new("People.csv"),
            "Person,Region\nAnna Andreadi,West\nChuck Magee,East\n",
        )
        .unwrap();
        let people = parse_people(&source).unwrap();
        assert_eq!(
            people[1],
            PersonRecord {
                region: "East".into(),
                person: "Chuck Magee".into()
            }
        );
    }

    #[test]
    fn test_wrong_table_is_rejected() {
        let source =
            CsvSource::from_text(Path::new("People.csv"), "Order ID,Returned\nO1,Yes\n").unwrap();
        assert!(matches!(
            parse_people(&source),
            Err(LoadError::MissingColumn { .. })
        ));
    }
}
