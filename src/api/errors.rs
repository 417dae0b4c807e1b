use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{DrawError, GroupingError};
use crate::export::ExportError;

/// Ошибки внешнего API (то, что отдаём слою отображения).
///
/// Каждое условие – отдельный вариант, чтобы фронт мог выбрать
/// точечную реакцию (заблокировать кнопку, показать сообщение).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON команды).
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    /// Розыгрыш без возврата, а пул пуст.
    #[error("Все участники уже выиграли")]
    ExhaustedPool,

    /// Розыгрыш или разбиение по пустому ростеру.
    #[error("Ростер пуст")]
    EmptyRegistry,

    /// Размер группы вне допустимого диапазона.
    #[error("Недопустимый размер группы {requested}: ожидается {min}..={max}")]
    InvalidGroupSize {
        requested: usize,
        min: usize,
        max: usize,
    },

    /// Сбой CSV-писателя.
    #[error("Ошибка экспорта: {0}")]
    Export(String),
}

impl From<DrawError> for ApiError {
    fn from(err: DrawError) -> Self {
        match err {
            DrawError::ExhaustedPool => ApiError::ExhaustedPool,
            DrawError::EmptyRegistry => ApiError::EmptyRegistry,
        }
    }
}

impl From<GroupingError> for ApiError {
    fn from(err: GroupingError) -> Self {
        match err {
            GroupingError::EmptyRegistry => ApiError::EmptyRegistry,
            GroupingError::InvalidGroupSize {
                requested,
                min,
                max,
            } => ApiError::InvalidGroupSize {
                requested,
                min,
                max,
            },
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
