use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::ParticipantId;

#[derive(Debug)]
enum IdStrategy {
    /// UUID v4 — коллизии пренебрежимо маловероятны в пределах сессии.
    Random,
    /// `<prefix>-<n>` на монотонном счётчике. Удобно для тестов.
    Sequential { prefix: String, counter: AtomicU64 },
}

/// Генератор id участников.
///
/// Id выдаётся в момент загрузки имени и больше никогда не повторяется
/// этим генератором.
#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
}

impl IdGenerator {
    /// Случайные id (UUID v4) — режим живой сессии.
    pub fn random() -> Self {
        Self {
            strategy: IdStrategy::Random,
        }
    }

    /// Последовательные id `prefix-1`, `prefix-2`, ...
    pub fn sequential(prefix: impl Into<String>) -> Self {
        Self {
            strategy: IdStrategy::Sequential {
                prefix: prefix.into(),
                counter: AtomicU64::new(1),
            },
        }
    }

    #[inline]
    pub fn next_participant_id(&self) -> ParticipantId {
        match &self.strategy {
            IdStrategy::Random => ParticipantId(Uuid::new_v4().simple().to_string()),
            IdStrategy::Sequential { prefix, counter } => {
                let n = counter.fetch_add(1, Ordering::Relaxed);
                ParticipantId(format!("{prefix}-{n}"))
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}
