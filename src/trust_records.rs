use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use crate::error::{Result, TrustGraphError};

// "SourceName","TargetName","TrustType","TrustAttributes","TrustDirection","WhenCreated","WhenChanged"
const REQUIRED_FIELDS: usize = 5;

/// One row of a trust mapping export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustRecord {
    pub source_name: String,
    pub target_name: String,
    pub trust_type: String,
    pub trust_attributes: String,
    pub trust_direction: String,
    pub when_created: Option<String>,
    pub when_changed: Option<String>,
}

impl TrustRecord {
    /// Builds a record from a raw row, normalizing domain names to
    /// trimmed lower case. The remaining fields are only trimmed.
    pub fn from_row(row: &StringRecord) -> Result<Self> {
        if row.len() < REQUIRED_FIELDS {
            return Err(TrustGraphError::MalformedRow {
                line: row.position().map(|p| p.line()).unwrap_or_default(),
                fields: row.len(),
            });
        }

        let field = |i: usize| row.get(i).unwrap_or_default().trim().to_string();

        Ok(TrustRecord {
            source_name: field(0).to_lowercase(),
            target_name: field(1).to_lowercase(),
            trust_type: field(2),
            trust_attributes: field(3),
            trust_direction: field(4),
            when_created: row.get(5).map(|s| s.trim().to_string()),
            when_changed: row.get(6).map(|s| s.trim().to_string()),
        })
    }

    pub fn is_self_trust(&self) -> bool {
        self.source_name == self.target_name
    }
}

/// Lazy reader over the rows of a trust CSV. The first row is always
/// consumed as the header.
pub struct TrustRecords<R> {
    rows: StringRecordsIntoIter<R>,
}

impl TrustRecords<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> TrustRecords<R> {
    pub fn from_reader(reader: R) -> Self {
        let rows = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        TrustRecords { rows }
    }
}

impl<R: Read> Iterator for TrustRecords<R> {
    type Item = Result<TrustRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.map_err(TrustGraphError::from).and_then(|row| TrustRecord::from_row(&row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "\"SourceName\",\"TargetName\",\"TrustType\",\"TrustAttributes\",\"TrustDirection\",\"WhenCreated\",\"WhenChanged\"\n";

    fn read_all(data: &str) -> Result<Vec<TrustRecord>> {
        TrustRecords::from_reader(data.as_bytes()).collect()
    }

    #[test]
    fn test_normalizes_names() {
        let data = format!(
            "{}\"  DEV.Corp.LOCAL \",\"corp.local\",\"WINDOWS_ACTIVE_DIRECTORY\",\" WITHIN_FOREST \",\"Bidirectional\",\"1/1/2020\",\"2/1/2020\"\n",
            HEADER
        );
        let records = read_all(&data).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.source_name, "dev.corp.local");
        assert_eq!(record.target_name, "corp.local");
        assert_eq!(record.trust_type, "WINDOWS_ACTIVE_DIRECTORY");
        assert_eq!(record.trust_attributes, "WITHIN_FOREST");
        assert_eq!(record.trust_direction, "Bidirectional");
        assert_eq!(record.when_created.as_deref(), Some("1/1/2020"));
        assert_eq!(record.when_changed.as_deref(), Some("2/1/2020"));
    }

    #[test]
    fn test_first_row_is_always_skipped() {
        // the first row looks like data but is still treated as a header
        let data = "a,b,MIT,,Inbound\nc,d,MIT,,Inbound\n";
        let records = read_all(data).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_name, "c");
    }

    #[test]
    fn test_empty_and_header_only_inputs() {
        assert!(read_all("").unwrap().is_empty());
        assert!(read_all(HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_five_fields_are_enough() {
        let data = format!("{}a,b,MIT,,Outbound\n", HEADER);
        let records = read_all(&data).unwrap();

        assert_eq!(records[0].when_created, None);
        assert_eq!(records[0].when_changed, None);
    }

    #[test]
    fn test_short_row_is_fatal() {
        let data = format!("{}a,b,MIT,,Inbound\nc,d,MIT\n", HEADER);
        let err = read_all(&data).unwrap_err();

        match err {
            TrustGraphError::MalformedRow { line, fields } => {
                assert_eq!(line, 3);
                assert_eq!(fields, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TrustRecords::open(&dir.path().join("nope.csv"));

        assert!(matches!(result, Err(TrustGraphError::Io(_))));
    }

    #[test]
    fn test_self_trust() {
        let data = format!("{}Corp.Local,corp.local ,MIT,,Inbound\n", HEADER);
        let records = read_all(&data).unwrap();

        assert!(records[0].is_self_trust());
    }
}
