//! Табличный экспорт результатов (CSV, UTF-8 с BOM).

pub mod csv;

pub use self::csv::{
    encode, encode_history, encode_history_on, encode_on, suggested_filename, today, CsvExport,
    ExportError, GROUPING_HEADER, HISTORY_HEADER, UTF8_BOM,
};
