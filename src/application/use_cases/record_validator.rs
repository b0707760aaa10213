//! Record Validator
//!
//! Checks an extracted clinical record before it is exported:
//! - Required columns present and non-blank
//! - Idade numeric and within range
//! - DataAdmissao / DataAlta as `YYYY-MM-DD`, discharge not before admission
//! - Peso a positive decimal
//! - EmDialise restricted to "Sim" / "Não" (compared as NFC text)
//!
//! Problems are reported in the result, never raised. Errors come out in
//! column declaration order so callers can assert on them verbatim.

use std::num::IntErrorKind;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::clinical::{ClinicalField, ClinicalRecord, ValidationResult};
use crate::domain::config::ValidationLimits;

const DATE_FORMAT: &str = "%Y-%m-%d";

const DIALYSIS_VALUES: [&str; 2] = ["Sim", "Não"];

const KNOWN_OUTCOMES: [&str; 4] = ["Alta", "Óbito", "Transferência", "Em tratamento"];

static ISO_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]+(?:[.,][0-9]*)?|[.,][0-9]+)$").unwrap());

/// Validator for extracted clinical records
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    limits: ValidationLimits,
}

impl RecordValidator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate a record; pure and deterministic
    pub fn validate(&self, record: &ClinicalRecord) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let mut admission: Option<NaiveDate> = None;

        for field in ClinicalField::ALL {
            let Some(value) = record.get(field) else {
                if field.is_required() {
                    result.add_error(format!("{} is required", field));
                }
                continue;
            };

            match field {
                ClinicalField::Idade => self.check_age(value, &mut result),
                ClinicalField::DataAdmissao => {
                    admission = check_date(field, value, &mut result);
                }
                ClinicalField::DataAlta => {
                    let discharge = check_date(field, value, &mut result);
                    if let (Some(admission), Some(discharge)) = (admission, discharge) {
                        if discharge < admission {
                            result.add_error("DataAlta cannot precede DataAdmissao");
                        }
                    }
                }
                ClinicalField::Peso => self.check_weight(value, &mut result),
                ClinicalField::EmDialise => {
                    if !DIALYSIS_VALUES.contains(&value) {
                        result.add_error("EmDialise must be Sim or Não");
                    }
                }
                ClinicalField::Leito => {
                    if !matches!(value.parse::<u32>(), Ok(bed) if bed > 0) {
                        result.add_warning("Leito should be a positive integer");
                    }
                }
                ClinicalField::Desfecho => {
                    if !KNOWN_OUTCOMES.contains(&value) {
                        result.add_warning(format!(
                            "Desfecho '{}' is not one of: {}",
                            value,
                            KNOWN_OUTCOMES.join(", ")
                        ));
                    }
                }
                _ => {}
            }
        }

        debug!(
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Validated clinical record"
        );

        result
    }

    fn check_age(&self, value: &str, result: &mut ValidationResult) {
        match value.parse::<i64>() {
            Ok(age) if age < 0 || age > i64::from(self.limits.max_age) => {
                result.add_error("Idade out of expected range");
            }
            Ok(_) => {}
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                result.add_error("Idade out of expected range");
            }
            Err(_) => result.add_error("Idade must be numeric"),
        }
    }

    fn check_weight(&self, value: &str, result: &mut ValidationResult) {
        let Some(weight) = parse_positive_decimal(value) else {
            result.add_error("Peso must be a positive number");
            return;
        };

        if weight >= BigDecimal::from(self.limits.peso_warning_kg) {
            result.add_warning(format!(
                "Peso above {} kg, check the extracted value",
                self.limits.peso_warning_kg
            ));
        }
    }
}

/// Validate with the default limits
pub fn validate(record: &ClinicalRecord) -> ValidationResult {
    RecordValidator::default().validate(record)
}

fn check_date(
    field: ClinicalField,
    value: &str,
    result: &mut ValidationResult,
) -> Option<NaiveDate> {
    let parsed = ISO_DATE_PATTERN
        .is_match(value)
        .then(|| NaiveDate::parse_from_str(value, DATE_FORMAT).ok())
        .flatten();

    if parsed.is_none() {
        result.add_error(format!("{} has invalid date format", field));
    }
    parsed
}

/// Accepts `.` or `,` as the decimal separator; zero is not positive
fn parse_positive_decimal(value: &str) -> Option<BigDecimal> {
    if !DECIMAL_PATTERN.is_match(value) {
        return None;
    }

    let normalized = value.replace(',', ".");
    let normalized = normalized.trim_end_matches('.');
    let normalized = if normalized.starts_with('.') {
        format!("0{}", normalized)
    } else {
        normalized.to_string()
    };

    BigDecimal::from_str(&normalized)
        .ok()
        .filter(|weight| *weight > BigDecimal::from(0))
}
