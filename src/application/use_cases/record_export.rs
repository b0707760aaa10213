// ============================================================
// RECORD EXPORT USE CASE
// ============================================================
// Orchestrate extraction, validation, table view and CSV download

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::record_validator::RecordValidator;
use crate::domain::clinical::{ClinicalRecord, RecordTable, ValidationResult};
use crate::domain::config::{AppConfig, CSV_CONTENT_TYPE};
use crate::domain::error::Result;
use crate::infrastructure::csv::CsvRecordWriter;
use crate::infrastructure::extraction::{RecordExtractor, UploadedDocument};

/// CSV payload offered to the user for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvDownload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything the upload screen shows for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedUpload {
    pub record: ClinicalRecord,
    pub validation: ValidationResult,
    pub table: RecordTable,
    /// Absent when validation failed and invalid exports are disabled
    pub download: Option<CsvDownload>,
}

/// A record left out of a batch export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub index: usize,
    pub validation: ValidationResult,
}

/// Result of exporting several records at once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchExport {
    pub exported: usize,
    pub rejected: Vec<RejectedRecord>,
    pub download: CsvDownload,
}

/// Upload pipeline use case
pub struct RecordExportService<E: RecordExtractor> {
    extractor: E,
    validator: RecordValidator,
    writer: CsvRecordWriter,
    config: AppConfig,
}

impl<E: RecordExtractor> RecordExportService<E> {
    pub fn new(extractor: E, config: AppConfig) -> Result<Self> {
        config.check()?;
        let writer = CsvRecordWriter::from_config(&config.export)?;
        let validator = RecordValidator::new(config.validation.clone());

        Ok(Self {
            extractor,
            validator,
            writer,
            config,
        })
    }

    /// Create with default configuration
    pub fn with_defaults(extractor: E) -> Result<Self> {
        Self::new(extractor, AppConfig::default())
    }

    /// Extract, validate and tabulate one upload
    pub fn process(&self, document: &UploadedDocument) -> Result<ProcessedUpload> {
        let record = self.extractor.extract(document)?;
        let validation = self.validator.validate(&record);
        let table = RecordTable::from_records(std::slice::from_ref(&record));

        let download = if validation.is_valid || self.config.export.export_invalid {
            Some(self.download(self.writer.write_table(&table)?))
        } else {
            warn!(
                file_name = %document.file_name,
                errors = ?validation.errors,
                "Record failed validation, CSV download withheld"
            );
            None
        };

        info!(
            file_name = %document.file_name,
            valid = validation.is_valid,
            "Processed upload"
        );

        Ok(ProcessedUpload {
            record,
            validation,
            table,
            download,
        })
    }

    /// Validate every record and export only those that pass
    pub fn export_batch(&self, records: &[ClinicalRecord]) -> Result<BatchExport> {
        let mut accepted = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let validation = self.validator.validate(record);
            if validation.is_valid {
                accepted.push(record.clone());
            } else {
                rejected.push(RejectedRecord { index, validation });
            }
        }

        let bytes = self.writer.write_records(&accepted)?;

        info!(
            exported = accepted.len(),
            rejected = rejected.len(),
            "Exported record batch"
        );

        Ok(BatchExport {
            exported: accepted.len(),
            rejected,
            download: self.download(bytes),
        })
    }

    fn download(&self, bytes: Vec<u8>) -> CsvDownload {
        CsvDownload {
            file_name: self.config.export.file_name.clone(),
            content_type: CSV_CONTENT_TYPE.to_string(),
            bytes,
        }
    }
}
