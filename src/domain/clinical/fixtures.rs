//! Shared test records.

use super::{ClinicalField, ClinicalRecord};
use crate::infrastructure::extraction::FixtureExtractor;

/// Complete record with every column filled
pub(crate) fn sample_clinical_record() -> ClinicalRecord {
    FixtureExtractor::fixture_record()
}

/// Record with some optional columns left out
pub(crate) fn sample_record_missing_optional() -> ClinicalRecord {
    ClinicalRecord::new()
        .with(ClinicalField::Nome, "João Silva")
        .with(ClinicalField::Setor, "CTG 2")
        .with(ClinicalField::Leito, "10")
        .with(ClinicalField::Idade, "65")
        .with(ClinicalField::DataAdmissao, "2025-06-20")
        .with(ClinicalField::Diagnostico, "IRA pós-renal")
        .with(ClinicalField::EmDialise, "Não")
        .with(ClinicalField::PlanoTratamento, "Hidratação e monitoramento")
        .with(ClinicalField::Preceptor, "Ana Santos")
        .with(ClinicalField::Desfecho, "Alta")
        .with(ClinicalField::DataAlta, "2025-06-25")
}

/// Minimal record: required columns only
pub(crate) fn minimal_record() -> ClinicalRecord {
    ClinicalRecord::new()
        .with(ClinicalField::Nome, "Maria Silva")
        .with(ClinicalField::Setor, "UTI")
        .with(ClinicalField::Idade, "65")
        .with(ClinicalField::DataAdmissao, "2025-01-10")
        .with(ClinicalField::Diagnostico, "IRA")
}
