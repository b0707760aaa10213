// ============================================================
// CLINICAL FIELDS
// ============================================================
// The fixed column set of an extracted evolution note

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One column of a clinical record, in header order.
///
/// Variant order is the declared field order: it drives the CSV header,
/// the table columns and the order of validation errors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ClinicalField {
    Nome,
    Setor,
    Leito,
    Idade,
    #[serde(alias = "Data_Admissao")]
    DataAdmissao,
    Diagnostico,
    #[serde(alias = "Dialise")]
    EmDialise,
    Peso,
    #[serde(alias = "Plano")]
    PlanoTratamento,
    Preceptor,
    Residente,
    Desfecho,
    #[serde(alias = "Data_Desfecho")]
    DataAlta,
}

/// Keys emitted by the legacy extraction stub, mapped to their current column
const LEGACY_ALIASES: [(&str, ClinicalField); 4] = [
    ("Data_Admissao", ClinicalField::DataAdmissao),
    ("Dialise", ClinicalField::EmDialise),
    ("Plano", ClinicalField::PlanoTratamento),
    ("Data_Desfecho", ClinicalField::DataAlta),
];

static FIELDS_BY_NAME: Lazy<HashMap<&'static str, ClinicalField>> = Lazy::new(|| {
    ClinicalField::ALL
        .iter()
        .map(|field| (field.name(), *field))
        .chain(LEGACY_ALIASES.iter().copied())
        .collect()
});

impl ClinicalField {
    pub const ALL: [ClinicalField; 13] = [
        ClinicalField::Nome,
        ClinicalField::Setor,
        ClinicalField::Leito,
        ClinicalField::Idade,
        ClinicalField::DataAdmissao,
        ClinicalField::Diagnostico,
        ClinicalField::EmDialise,
        ClinicalField::Peso,
        ClinicalField::PlanoTratamento,
        ClinicalField::Preceptor,
        ClinicalField::Residente,
        ClinicalField::Desfecho,
        ClinicalField::DataAlta,
    ];

    /// Canonical column name, as written in the CSV header
    pub fn name(&self) -> &'static str {
        match self {
            ClinicalField::Nome => "Nome",
            ClinicalField::Setor => "Setor",
            ClinicalField::Leito => "Leito",
            ClinicalField::Idade => "Idade",
            ClinicalField::DataAdmissao => "DataAdmissao",
            ClinicalField::Diagnostico => "Diagnostico",
            ClinicalField::EmDialise => "EmDialise",
            ClinicalField::Peso => "Peso",
            ClinicalField::PlanoTratamento => "PlanoTratamento",
            ClinicalField::Preceptor => "Preceptor",
            ClinicalField::Residente => "Residente",
            ClinicalField::Desfecho => "Desfecho",
            ClinicalField::DataAlta => "DataAlta",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ClinicalField::Nome
                | ClinicalField::Setor
                | ClinicalField::Idade
                | ClinicalField::DataAdmissao
                | ClinicalField::Diagnostico
        )
    }

    /// Resolve a column name, accepting legacy extraction keys
    pub fn from_name(name: &str) -> Option<Self> {
        FIELDS_BY_NAME.get(name.trim()).copied()
    }

    /// Header row in declared order
    pub fn header() -> Vec<&'static str> {
        Self::ALL.iter().map(|field| field.name()).collect()
    }

    pub fn required() -> impl Iterator<Item = ClinicalField> {
        Self::ALL.into_iter().filter(|field| field.is_required())
    }
}

impl fmt::Display for ClinicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
