//! Движок ростера: реестр участников, розыгрыш призов, случайное
//! разбиение на группы и CSV-экспорт результатов.
//!
//! Слои:
//! - `domain` – участники, группы, результат разбиения;
//! - `roster` – нормализация ввода и реестр;
//! - `engine` – розыгрыш и разбиение;
//! - `export` – CSV с BOM;
//! - `session` – один владеющий экземпляр всего этого на пользователя;
//! - `api` – команды / запросы / DTO для слоя отображения.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod export;
pub mod infra;
pub mod roster;
pub mod session;

pub use config::SessionConfig;
pub use domain::{Group, GroupingResult, Participant, ParticipantId};
pub use engine::{DrawError, GroupingError};
pub use session::Session;
