// ============================================================
// CSV WRITER
// ============================================================
// Serialize record tables to UTF-8 CSV bytes

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::domain::clinical::{ClinicalRecord, RecordTable};
use crate::domain::config::{ExportConfig, LineTerminator};
use crate::domain::error::{AppError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV writer for clinical record tables
#[derive(Debug, Clone)]
pub struct CsvRecordWriter {
    /// Delimiter byte (default: comma)
    delimiter: u8,

    /// Row terminator, also written after the header
    line_terminator: LineTerminator,

    /// Whether to prefix the output with a UTF-8 BOM
    include_bom: bool,
}

impl Default for CsvRecordWriter {
    fn default() -> Self {
        Self {
            delimiter: b',',
            line_terminator: LineTerminator::Lf,
            include_bom: false,
        }
    }
}

impl CsvRecordWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a writer from export settings
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        Ok(Self {
            delimiter: config.delimiter_byte()?,
            line_terminator: config.line_terminator,
            include_bom: config.include_bom,
        })
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_line_terminator(mut self, line_terminator: LineTerminator) -> Self {
        self.line_terminator = line_terminator;
        self
    }

    pub fn with_bom(mut self, include_bom: bool) -> Self {
        self.include_bom = include_bom;
        self
    }

    /// Header plus one row per record
    pub fn write_records(&self, records: &[ClinicalRecord]) -> Result<Vec<u8>> {
        self.write_table(&RecordTable::from_records(records))
    }

    /// Serialize a table; the header row is always written
    pub fn write_table(&self, table: &RecordTable) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        if self.include_bom {
            buffer.extend_from_slice(UTF8_BOM);
        }

        let terminator = match self.line_terminator {
            LineTerminator::Lf => Terminator::Any(b'\n'),
            LineTerminator::Crlf => Terminator::CRLF,
        };

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(terminator)
            .from_writer(buffer);

        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::IoError(format!("Failed to finish CSV output: {}", e)))?;

        debug!(
            rows = table.row_count(),
            bytes = bytes.len(),
            "Serialized clinical records to CSV"
        );

        Ok(bytes)
    }
}

/// Export records with the default settings: comma delimiter, LF rows, no BOM
pub fn export_csv(records: &[ClinicalRecord]) -> Result<Vec<u8>> {
    CsvRecordWriter::default().write_records(records)
}
