pub mod use_cases;

pub use use_cases::record_export::{
    BatchExport, CsvDownload, ProcessedUpload, RecordExportService, RejectedRecord,
};
pub use use_cases::record_validator::{validate, RecordValidator};
