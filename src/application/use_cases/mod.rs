pub mod record_export;
pub mod record_validator;
