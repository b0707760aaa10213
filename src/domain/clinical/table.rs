// ============================================================
// RECORD TABLE
// ============================================================
// Tabular view of one or more records, fixed 13-column header

use serde::{Deserialize, Serialize};

use super::{ClinicalField, ClinicalRecord};

/// Rows of cells in header order; missing values are empty strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn from_records(records: &[ClinicalRecord]) -> Self {
        let headers = ClinicalField::header()
            .into_iter()
            .map(str::to_string)
            .collect();

        let rows = records.iter().map(Self::row_cells).collect();

        Self { headers, rows }
    }

    /// Cells keep the value as supplied; only absence and null become empty
    fn row_cells(record: &ClinicalRecord) -> Vec<String> {
        ClinicalField::ALL
            .iter()
            .map(|field| record.raw(*field).unwrap_or_default().to_string())
            .collect()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All cells of one column, top to bottom; short rows read as empty
    pub fn column(&self, field: ClinicalField) -> Vec<&str> {
        let idx = ClinicalField::ALL
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or_default();

        self.rows
            .iter()
            .map(|row| row.get(idx).map_or("", String::as_str))
            .collect()
    }
}
