// ============================================================
// RECORD EXTRACTION
// ============================================================
// Seam between an uploaded evolution note and its clinical record.
// Real PDF field extraction does not exist yet; FixtureExtractor stands in.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::clinical::{ClinicalField, ClinicalRecord};
use crate::domain::error::{AppError, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// A file handed over by the upload layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reject anything that is not a non-empty `.pdf` with a PDF signature
    pub fn ensure_pdf(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(AppError::ValidationError("Uploaded file is empty".to_string()));
        }

        let has_pdf_extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if !has_pdf_extension || !self.bytes.starts_with(PDF_MAGIC) {
            warn!(file_name = %self.file_name, "Rejected non-PDF upload");
            return Err(AppError::ValidationError(
                "Uploaded file is not a PDF".to_string(),
            ));
        }

        Ok(())
    }
}

/// Turns an uploaded document into a clinical record
pub trait RecordExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<ClinicalRecord>;
}

/// Returns the same sample record for every valid PDF
#[derive(Debug, Clone, Default)]
pub struct FixtureExtractor;

impl FixtureExtractor {
    pub fn fixture_record() -> ClinicalRecord {
        ClinicalRecord::new()
            .with(ClinicalField::Nome, "Vera Ondina Marcos")
            .with(ClinicalField::Setor, "CTG 4")
            .with(ClinicalField::Leito, "19")
            .with(ClinicalField::Idade, "82")
            .with(ClinicalField::DataAdmissao, "2025-06-23")
            .with(ClinicalField::Diagnostico, "Infecção de cateter de hemodiálise")
            .with(ClinicalField::EmDialise, "Sim")
            .with(ClinicalField::Peso, "65")
            .with(
                ClinicalField::PlanoTratamento,
                "Suspender Anlodipino e Furosemida. HD + ATB guiado por vancocinemia.",
            )
            .with(ClinicalField::Preceptor, "Gabriel Silqueira")
            .with(ClinicalField::Residente, "Marcela Oliveira")
            .with(ClinicalField::Desfecho, "Alta")
            .with(ClinicalField::DataAlta, "2025-06-28")
    }
}

impl RecordExtractor for FixtureExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<ClinicalRecord> {
        document.ensure_pdf()?;
        info!(
            file_name = %document.file_name,
            size = document.bytes.len(),
            "Extracting clinical record from fixture"
        );
        Ok(Self::fixture_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_pdf() -> UploadedDocument {
        UploadedDocument::new("evolucao.pdf", b"%PDF-1.4\nMock PDF content".to_vec())
    }

    #[test]
    fn test_fixture_extractor_returns_record() {
        let record = FixtureExtractor.extract(&mock_pdf()).unwrap();
        assert_eq!(record.get(ClinicalField::Nome), Some("Vera Ondina Marcos"));
        assert_eq!(record.present_fields().len(), 13);
    }

    #[test]
    fn test_rejects_empty_file() {
        let document = UploadedDocument::new("evolucao.pdf", Vec::new());
        let err = FixtureExtractor.extract(&document).unwrap_err();
        assert_eq!(
            err,
            AppError::ValidationError("Uploaded file is empty".to_string())
        );
    }

    #[test]
    fn test_rejects_non_pdf_content() {
        let document =
            UploadedDocument::new("evolucao.pdf", b"This is not a PDF file".to_vec());
        assert_eq!(
            document.ensure_pdf().unwrap_err(),
            AppError::ValidationError("Uploaded file is not a PDF".to_string())
        );
    }

    #[test]
    fn test_rejects_other_extensions() {
        let document = UploadedDocument::new("notes.txt", b"%PDF-1.4\n".to_vec());
        assert_eq!(
            document.ensure_pdf().unwrap_err(),
            AppError::ValidationError("Uploaded file is not a PDF".to_string())
        );

        let upper = UploadedDocument::new("EVOLUCAO.PDF", b"%PDF-1.7\n".to_vec());
        assert!(upper.ensure_pdf().is_ok());
    }
}
