//! Доменная модель ростера: участники, группы, результат разбиения.

pub mod group;
pub mod participant;

pub use group::*;
pub use participant::*;
