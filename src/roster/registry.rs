use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Participant, ParticipantId};

/// Канонический упорядоченный ростер – единственный источник правды.
///
/// Порядок вставки важен для отображения, но не для семантики.
/// Повторяющиеся имена допустимы и обнаруживаются через
/// `detect_duplicate_names`.
///
/// Любая мутация инвалидирует состояние розыгрыша и результат
/// разбиения; это обеспечивает `Session`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registry {
    participants: Vec<Participant>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_participants(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Дописать пачку в конец. Дубликаты (по имени или случайно по id)
    /// принимаются как есть.
    pub fn add_batch(&mut self, batch: Vec<Participant>) -> &[Participant] {
        let added = batch.len();
        self.participants.extend(batch);
        info!(added, total = self.participants.len(), "participants added");
        &self.participants
    }

    /// Удалить участника по id. Если такого нет – no-op.
    /// Возвращает удалённого участника.
    pub fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        let idx = self.participants.iter().position(|p| &p.id == id)?;
        let removed = self.participants.remove(idx);
        info!(id = %removed.id, total = self.participants.len(), "participant removed");
        Some(removed)
    }

    /// Заменить весь ростер списком как есть.
    pub fn replace_all(&mut self, list: Vec<Participant>) -> &[Participant] {
        self.participants = list;
        info!(total = self.participants.len(), "registry replaced");
        &self.participants
    }

    /// То же, что `replace_all(vec![])`. Отмены нет.
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    /// Имена, встречающиеся 2+ раза. Считается по текущему состоянию, O(n).
    pub fn detect_duplicate_names(&self) -> HashSet<String> {
        let mut counts: HashMap<&str, usize> = HashMap::with_capacity(self.participants.len());
        for p in &self.participants {
            *counts.entry(p.name.as_str()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    pub fn has_duplicate_names(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.participants.len());
        self.participants.iter().any(|p| !seen.insert(p.name.as_str()))
    }

    /// Оставить первое вхождение каждого имени, остальные выкинуть.
    /// Возвращает число удалённых.
    pub fn remove_duplicate_names(&mut self) -> usize {
        let before = self.participants.len();
        let mut seen: HashSet<String> = HashSet::with_capacity(before);
        self.participants.retain(|p| seen.insert(p.name.clone()));

        let removed = before - self.participants.len();
        info!(removed, total = self.participants.len(), "duplicate names removed");
        removed
    }

    /// Все id попарно различны.
    pub fn ids_are_unique(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.participants.len());
        self.participants.iter().all(|p| seen.insert(&p.id))
    }
}
