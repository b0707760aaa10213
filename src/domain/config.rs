// ============================================================
// VALIDATION & EXPORT CONFIGURATION
// ============================================================
// Tunables for record validation and CSV output

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

pub const DEFAULT_CSV_FILE_NAME: &str = "dados_extraidos_nephrolist.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Row terminator written after every CSV row, header included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

/// Bounds applied by the record validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ValidationLimits {
    /// Oldest accepted age in years (default: 150)
    #[validate(range(min = 1, max = 200))]
    pub max_age: u32,

    /// Weight above which a warning is raised, in kg (default: 300)
    #[validate(range(min = 1))]
    pub peso_warning_kg: u32,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_age: 150,
            peso_warning_kg: 300,
        }
    }
}

/// CSV output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ExportConfig {
    /// Field delimiter (default: comma)
    pub delimiter: char,

    pub line_terminator: LineTerminator,

    /// Prefix the output with a UTF-8 byte order mark
    pub include_bom: bool,

    /// Offer a download even when the record failed validation
    pub export_invalid: bool,

    /// Suggested file name for the download
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            line_terminator: LineTerminator::Lf,
            include_bom: false,
            export_invalid: false,
            file_name: DEFAULT_CSV_FILE_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    /// Delimiter as the single byte the CSV writer expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\r' | '\n') {
            return Err(AppError::ConfigError(format!(
                "delimiter must be an ASCII character other than a quote or line break, got {:?}",
                self.delimiter
            )));
        }
        Ok(self.delimiter as u8)
    }

    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid export config: {}", e)))?;
        self.delimiter_byte()?;
        Ok(())
    }
}

/// Top-level application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub validation: ValidationLimits,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn check(&self) -> Result<()> {
        self.validation
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid validation limits: {}", e)))?;
        self.export.check()
    }
}
