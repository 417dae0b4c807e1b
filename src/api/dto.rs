use serde::{Deserialize, Serialize};

use crate::domain::{GroupingResult, Participant, ParticipantId};
use crate::engine::{DrawPhase, SpinStart, SpinTick};
use crate::export::CsvExport;

/// DTO участника в списке ростера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantViewDto {
    pub id: ParticipantId,
    pub name: String,
    /// Имя встречается в ростере больше одного раза (подсветка во фронте).
    pub is_duplicate: bool,
}

/// DTO ростера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterViewDto {
    pub participants: Vec<ParticipantViewDto>,
    pub total: usize,
    /// Повторяющиеся имена, отсортированы для стабильного вывода.
    pub duplicate_names: Vec<String>,
}

/// Одна строка истории розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerDto {
    /// Номер выигрыша, 1 – самый первый.
    pub ordinal: usize,
    pub id: ParticipantId,
    pub name: String,
}

/// DTO состояния розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawViewDto {
    pub allow_replacement: bool,
    pub phase: DrawPhase,
    /// `None` = без ограничений (режим с возвратом).
    pub remaining: Option<usize>,
    /// Самые свежие первыми.
    pub winners: Vec<WinnerDto>,
    pub last_winner: Option<Participant>,
    /// Текст на табло: `???`, кандидат или победитель.
    pub display: String,
    /// Можно ли нажать «тянуть».
    pub can_draw: bool,
}

/// DTO разбиения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupingViewDto {
    pub requested_group_size: usize,
    pub effective_group_size: usize,
    pub total_participants: usize,
    pub expected_groups: usize,
    pub result: Option<GroupingResult>,
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    Roster(RosterViewDto),
    Cleared { cleared: bool },
    DuplicatesRemoved { removed: usize },
    Removed { participant: Option<Participant> },
    Draw(DrawViewDto),
    /// Победитель (или `None`, если вызов был проигнорирован) и состояние после.
    Drawn {
        winner: Option<Participant>,
        state: DrawViewDto,
    },
    SpinStarted(SpinStart),
    SpinAdvanced(SpinTick),
    SpinCancelled { was_spinning: bool },
    GroupSize { effective: usize },
    Groups(GroupingResult),
    Export(CsvExport),
}
