// ============================================================
// CLINICAL RECORD
// ============================================================
// One patient's extracted field set for a single upload

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::ClinicalField;
use crate::domain::error::{AppError, Result};

/// Field values keyed by column.
///
/// Absent, null and blank values all read back as "not present" through
/// [`ClinicalRecord::get`]; [`ClinicalRecord::raw`] exposes the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicalRecord {
    values: BTreeMap<ClinicalField, Option<String>>,
}

impl ClinicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, builder style
    pub fn with(mut self, field: ClinicalField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Mark a field as explicitly null
    pub fn with_null(mut self, field: ClinicalField) -> Self {
        self.set(field, None);
        self
    }

    pub fn set(&mut self, field: ClinicalField, value: Option<String>) {
        self.values.insert(field, value);
    }

    /// Build a record from loosely keyed pairs, skipping keys that are not
    /// part of the column set.
    ///
    /// A column supplied twice (e.g. `DataAdmissao` and its legacy key
    /// `Data_Admissao`) must carry the same value both times.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        let mut record = Self::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            let Some(field) = ClinicalField::from_name(key) else {
                debug!(key, "Ignoring unknown clinical field");
                continue;
            };

            let value: Option<String> = value.map(Into::into);
            if let Some(existing) = record.values.get(&field) {
                if *existing != value {
                    return Err(AppError::ParseError(format!(
                        "Conflicting values for field '{}' (key '{}')",
                        field, key
                    )));
                }
            }
            record.set(field, value);
        }
        Ok(record)
    }

    /// Parse a JSON object whose values are strings or null
    pub fn from_json(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| AppError::ParseError(format!("Invalid clinical record JSON: {}", e)))?;

        let mut pairs = Vec::with_capacity(object.len());
        for (key, value) in object {
            let value = match value {
                serde_json::Value::String(text) => Some(text),
                serde_json::Value::Null => None,
                other => {
                    return Err(AppError::ParseError(format!(
                        "Field '{}' must be a string or null, got {}",
                        key, other
                    )))
                }
            };
            pairs.push((key, value));
        }

        Self::from_pairs(pairs)
    }

    /// Trimmed value, `None` when absent, null or blank
    pub fn get(&self, field: ClinicalField) -> Option<&str> {
        self.values
            .get(&field)
            .and_then(|value| value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Stored value exactly as supplied
    pub fn raw(&self, field: ClinicalField) -> Option<&str> {
        self.values.get(&field).and_then(|value| value.as_deref())
    }

    pub fn is_present(&self, field: ClinicalField) -> bool {
        self.get(field).is_some()
    }

    /// Fields carrying a non-blank value, in declared order
    pub fn present_fields(&self) -> Vec<ClinicalField> {
        ClinicalField::ALL
            .into_iter()
            .filter(|field| self.is_present(*field))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
