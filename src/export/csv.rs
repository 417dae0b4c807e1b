//! CSV-кодирование результата разбиения и истории розыгрыша.
//!
//! Формат:
//!   - BOM UTF-8 в начале (Excel иначе не распознаёт кодировку);
//!   - заголовок из двух колонок без кавычек;
//!   - по строке на пару, каждое поле в двойных кавычках
//!     (кавычки внутри поля удваиваются);
//!   - записи завершаются `\n`.

use std::fmt::Write as _;
use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::ExportConfig;
use crate::domain::GroupingResult;
use crate::engine::WinnerHistory;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Заголовок экспорта разбиения: группа, имя.
pub const GROUPING_HEADER: [&str; 2] = ["組別", "姓名"];

/// Заголовок экспорта истории: порядковый номер выигрыша, имя.
pub const HISTORY_HEADER: [&str; 2] = ["序號", "姓名"];

/// Сбой самого CSV-писателя. Пустой результат ошибкой не является.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Ошибка записи CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Ошибка ввода-вывода при экспорте: {0}")]
    Io(#[from] io::Error),

    #[error("Некорректный формат даты в имени файла: {0:?}")]
    DateFormat(String),
}

/// Готовый к отдаче файл: байты плюс предлагаемое имя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CsvExport {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl CsvExport {
    /// Содержимое без BOM – удобно для проверок и логов.
    pub fn text(&self) -> String {
        let body = self.bytes.strip_prefix(UTF8_BOM).unwrap_or(self.bytes.as_slice());
        String::from_utf8_lossy(body).into_owned()
    }
}

/// Сегодняшняя локальная дата.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `<label>_<date>.csv`
///
/// Битый strftime-формат даёт `ExportError::DateFormat`: `format!` на нём
/// паникует, поэтому пишем через `write!`.
pub fn suggested_filename(
    label: &str,
    date: NaiveDate,
    date_format: &str,
) -> Result<String, ExportError> {
    let mut name = String::new();
    write!(name, "{label}_{}.csv", date.format(date_format))
        .map_err(|_| ExportError::DateFormat(date_format.to_string()))?;
    Ok(name)
}

/// Закодировать разбиение с сегодняшней датой в имени файла.
pub fn encode(result: &GroupingResult, config: &ExportConfig) -> Result<CsvExport, ExportError> {
    encode_on(result, config, today())
}

/// Закодировать разбиение: строка на каждую пару (группа, участник)
/// в порядке групп, затем участников.
pub fn encode_on(
    result: &GroupingResult,
    config: &ExportConfig,
    date: NaiveDate,
) -> Result<CsvExport, ExportError> {
    let rows = result
        .rows()
        .map(|(group, member)| [group.name.clone(), member.name.clone()]);
    let bytes = write_table(GROUPING_HEADER, rows)?;
    let filename = suggested_filename(&config.grouping_label, date, &config.date_format)?;

    info!(
        filename = %filename,
        groups = result.group_count(),
        rows = result.participant_count(),
        bytes = bytes.len(),
        "grouping exported"
    );
    Ok(CsvExport { bytes, filename })
}

/// Закодировать историю розыгрыша с сегодняшней датой.
pub fn encode_history(
    history: &WinnerHistory,
    config: &ExportConfig,
) -> Result<CsvExport, ExportError> {
    encode_history_on(history, config, today())
}

/// История: самые свежие первыми, с порядковым номером выигрыша.
pub fn encode_history_on(
    history: &WinnerHistory,
    config: &ExportConfig,
    date: NaiveDate,
) -> Result<CsvExport, ExportError> {
    let rows = history
        .entries()
        .map(|e| [e.ordinal.to_string(), e.participant.name.clone()]);
    let bytes = write_table(HISTORY_HEADER, rows)?;
    let filename = suggested_filename(&config.history_label, date, &config.date_format)?;

    info!(filename = %filename, rows = history.len(), "draw history exported");
    Ok(CsvExport { bytes, filename })
}

fn write_table<I>(header: [&str; 2], rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = [String; 2]>,
{
    let mut buf = Vec::new();
    buf.write_all(UTF8_BOM)?;
    writeln!(buf, "{}", header.join(","))?;

    {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buf);
        for row in rows {
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
    }

    Ok(buf)
}
