use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::domain::{Participant, ParticipantId};

/// Запись истории для отображения: порядковый номер выигрыша (1 – самый первый).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinnerEntry<'a> {
    pub ordinal: usize,
    pub participant: &'a Participant,
}

/// История победителей, самые свежие – первыми.
///
/// В режиме с возвратом один и тот же id может встречаться несколько раз.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerHistory {
    winners: VecDeque<Participant>,
}

impl WinnerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, winner: Participant) {
        self.winners.push_front(winner);
    }

    pub fn clear(&mut self) {
        self.winners.clear();
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    /// Последний победитель.
    pub fn latest(&self) -> Option<&Participant> {
        self.winners.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.winners.iter()
    }

    /// Записи с порядковыми номерами: для i-й позиции номер = len - i.
    pub fn entries(&self) -> impl Iterator<Item = WinnerEntry<'_>> {
        let total = self.winners.len();
        self.winners
            .iter()
            .enumerate()
            .map(move |(idx, participant)| WinnerEntry {
                ordinal: total - idx,
                participant,
            })
    }

    pub fn ids(&self) -> HashSet<&ParticipantId> {
        self.winners.iter().map(|p| &p.id).collect()
    }
}
