//! Validation and CSV export for records extracted from clinical evolution notes.
//!
//! Data flow: raw field mapping → [`validate`] → [`export_csv`] → UTF-8 CSV bytes.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use crate::application::{
    validate, BatchExport, CsvDownload, ProcessedUpload, RecordExportService, RecordValidator,
};
pub use crate::domain::clinical::{ClinicalField, ClinicalRecord, RecordTable, ValidationResult};
pub use crate::domain::config::{AppConfig, ExportConfig, LineTerminator, ValidationLimits};
pub use crate::domain::error::{AppError, Result};
pub use crate::infrastructure::config::ConfigService;
pub use crate::infrastructure::csv::{export_csv, CsvRecordReader, CsvRecordWriter};
pub use crate::infrastructure::extraction::{FixtureExtractor, RecordExtractor, UploadedDocument};

/// Install the fmt subscriber; `RUST_LOG` overrides the default `info` filter.
/// Safe to call more than once.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
