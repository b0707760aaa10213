// ============================================================
// CLINICAL DOMAIN LAYER
// ============================================================
// Core types for extracted evolution-note records
// No I/O, no async

mod field;
mod record;
mod table;
mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use field::ClinicalField;
pub use record::ClinicalRecord;
pub use table::RecordTable;
pub use validation::ValidationResult;
