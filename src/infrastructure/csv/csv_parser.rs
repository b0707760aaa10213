// ============================================================
// CSV PARSER
// ============================================================
// Read exported CSV back into clinical records, with encoding detection

use std::borrow::Cow;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::{debug, warn};

use crate::domain::clinical::{ClinicalField, ClinicalRecord};
use crate::domain::error::{AppError, Result};

/// CSV parser producing clinical records
#[derive(Debug, Clone)]
pub struct CsvRecordReader {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvRecordReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvRecordReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse raw bytes, detecting BOM / legacy encodings
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<ClinicalRecord>> {
        let (content, encoding) = decode(bytes);
        if encoding != UTF_8 {
            warn!(encoding = encoding.name(), "CSV input is not UTF-8, decoded with fallback");
        }
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Vec<ClinicalRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::None)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let columns = resolve_columns(&headers)?;
        if columns.iter().all(Option::is_none) {
            return Err(AppError::ParseError(
                "CSV header has no clinical record columns".to_string(),
            ));
        }

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            records.push(parse_row(&columns, &row));
        }

        debug!(rows = records.len(), "Parsed clinical records from CSV");
        Ok(records)
    }
}

/// Map each header cell to its column, `None` for columns we do not know.
/// A column may appear only once, whether by its name or a legacy alias.
fn resolve_columns(headers: &StringRecord) -> Result<Vec<Option<ClinicalField>>> {
    let mut columns: Vec<Option<ClinicalField>> = Vec::with_capacity(headers.len());
    for name in headers.iter() {
        let field = ClinicalField::from_name(name);
        match field {
            Some(field) if columns.contains(&Some(field)) => {
                return Err(AppError::ParseError(format!(
                    "CSV header maps column '{}' more than once (at '{}')",
                    field, name
                )));
            }
            Some(_) => {}
            None => debug!(column = name, "Ignoring unknown CSV column"),
        }
        columns.push(field);
    }
    Ok(columns)
}

/// Empty cells stay absent
fn parse_row(columns: &[Option<ClinicalField>], row: &StringRecord) -> ClinicalRecord {
    let mut record = ClinicalRecord::new();
    for (column, value) in columns.iter().zip(row.iter()) {
        if let Some(field) = column {
            if !value.is_empty() {
                record.set(*field, Some(value.to_string()));
            }
        }
    }
    record
}

/// BOM first, then strict UTF-8, then Windows-1252
fn decode(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (content, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (content, encoding);
    }

    match std::str::from_utf8(bytes) {
        Ok(content) => (Cow::Borrowed(content), UTF_8),
        Err(_) => {
            let (content, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (content, WINDOWS_1252)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clinical::fixtures::{minimal_record, sample_clinical_record};
    use crate::infrastructure::csv::export_csv;

    #[test]
    fn test_round_trip_through_export() {
        let tricky = minimal_record().with(
            ClinicalField::PlanoTratamento,
            "Linha 1, com vírgula\nLinha 2 \"citada\"",
        );
        let records = vec![sample_clinical_record(), tricky];

        let bytes = export_csv(&records).unwrap();
        let parsed = CsvRecordReader::new().parse_bytes(&bytes).unwrap();

        assert_eq!(parsed, records);
    }

    #[test]
    fn test_header_only_gives_no_records() {
        let bytes = export_csv(&[]).unwrap();
        let parsed = CsvRecordReader::new().parse_bytes(&bytes).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_legacy_headers_and_unknown_columns() {
        let content = "Nome,Data_Admissao,Motivo_Internacao,Dialise\n\
                       Vera Ondina Marcos,2025-06-23,Febre,Sim\n";
        let parsed = CsvRecordReader::new().parse_content(content).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].get(ClinicalField::DataAdmissao), Some("2025-06-23"));
        assert_eq!(parsed[0].get(ClinicalField::EmDialise), Some("Sim"));
        assert_eq!(parsed[0].len(), 3);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice("Nome,Setor\nJosé,UTI\n".as_bytes());

        let parsed = CsvRecordReader::new().parse_bytes(&bytes).unwrap();
        assert_eq!(parsed[0].get(ClinicalField::Nome), Some("José"));
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "João" in Windows-1252: ã = 0xE3
        let bytes = b"Nome;Setor\nJo\xE3o;CTG 2\n";
        let parsed = CsvRecordReader::new()
            .with_delimiter(b';')
            .parse_bytes(bytes)
            .unwrap();
        assert_eq!(parsed[0].get(ClinicalField::Nome), Some("João"));
        assert_eq!(parsed[0].get(ClinicalField::Setor), Some("CTG 2"));
    }

    #[test]
    fn test_rejects_duplicate_header_column() {
        let err = CsvRecordReader::new()
            .parse_content("Nome,Setor,Nome\nMaria,UTI,Maria\n")
            .unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_rejects_header_with_canonical_and_legacy_name() {
        let err = CsvRecordReader::new()
            .parse_content("Nome,DataAdmissao,Data_Admissao\nMaria,2025-01-10,bad\n")
            .unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_rejects_foreign_header() {
        let err = CsvRecordReader::new()
            .parse_content("name,age,city\nAlice,30,NYC")
            .unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }
}
