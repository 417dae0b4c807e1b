use serde::{Deserialize, Serialize};

use crate::domain::participant::Participant;

/// Одна группа результата разбиения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// `group-<k>`, k начинается с 1.
    pub id: String,
    /// Порядковая подпись для отображения: `第 <k> 組`.
    pub name: String,
    pub members: Vec<Participant>,
}

impl Group {
    pub fn new(ordinal: usize, members: Vec<Participant>) -> Self {
        Self {
            id: format!("group-{ordinal}"),
            name: format!("第 {ordinal} 組"),
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Результат разбиения ростера на группы.
///
/// Инвариант: группы точно покрывают снимок ростера, по которому
/// были построены — каждый участник ровно в одной группе.
/// Живёт до следующей генерации, долговременной идентичности нет.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupingResult {
    pub groups: Vec<Group>,
    /// Размер группы, с которым строилось разбиение (0 у пустого результата).
    pub group_size: usize,
}

impl GroupingResult {
    /// Пустой результат — валиден для экспорта (только заголовок).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Всего участников по всем группам.
    pub fn participant_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Пары (группа, участник) в порядке групп, затем участников.
    pub fn rows(&self) -> impl Iterator<Item = (&Group, &Participant)> {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter().map(move |m| (g, m)))
    }
}
