use thiserror::Error;

/// Ошибки розыгрыша.
///
/// Обе ошибки восстановимы: сбросить розыгрыш, сменить режим
/// или добавить участников и повторить.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("Все участники уже выиграли: пул розыгрыша пуст")]
    ExhaustedPool,

    #[error("Ростер пуст – не из кого тянуть")]
    EmptyRegistry,
}

/// Ошибки разбиения на группы.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GroupingError {
    #[error("Ростер пуст – нечего разбивать на группы")]
    EmptyRegistry,

    #[error("Недопустимый размер группы {requested}: ожидается {min}..={max}")]
    InvalidGroupSize {
        requested: usize,
        min: usize,
        max: usize,
    },
}
