//! Нормализация сырого текста (файл / вставка) в список участников.

use crate::domain::Participant;
use crate::infra::IdGenerator;

/// Разделители имён: перевод строки или запятая.
fn is_separator(c: char) -> bool {
    c == '\n' || c == ','
}

/// Разбить текст на имена: режем по `\n` / `,`, обрезаем пробелы,
/// пустые куски выкидываем. Порядок сохраняется.
pub fn split_names(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(is_separator)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Один новый участник со свежим id на каждое имя из текста.
///
/// Ошибок нет: мусорный ввод просто даёт меньше имён,
/// пустой ввод – пустой список.
pub fn normalize_names(raw: &str, ids: &IdGenerator) -> Vec<Participant> {
    split_names(raw)
        .map(|name| Participant {
            id: ids.next_participant_id(),
            name: name.to_string(),
        })
        .collect()
}

/// То же для ленивой последовательности текстов (несколько файлов подряд).
pub fn normalize_all<I, S>(sources: I, ids: &IdGenerator) -> Vec<Participant>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .flat_map(|raw| normalize_names(raw.as_ref(), ids))
        .collect()
}
