//! Ростер: нормализация ввода, реестр участников, эталонный список.

pub mod normalizer;
pub mod registry;
pub mod sample;

pub use normalizer::{normalize_all, normalize_names, split_names};
pub use registry::Registry;
pub use sample::{sample_participants, SAMPLE_NAMES};
