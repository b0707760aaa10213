// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV serialization of record tables and re-import with encoding detection

mod csv_parser;
mod csv_writer;

pub use csv_parser::CsvRecordReader;
pub use csv_writer::{export_csv, CsvRecordWriter};
