use serde::{Deserialize, Serialize};

use crate::engine::{expected_group_count, DrawEngine, RandomSource};
use crate::roster::Registry;
use crate::session::Session;

use super::dto::{
    DrawViewDto, GroupingViewDto, ParticipantViewDto, RosterViewDto, WinnerDto,
};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    GetRoster,
    GetDrawState,
    GetGrouping,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Roster(RosterViewDto),
    Draw(DrawViewDto),
    Grouping(GroupingViewDto),
}

pub fn run_query<R: RandomSource>(session: &Session<R>, query: &Query) -> QueryResponse {
    match query {
        Query::GetRoster => QueryResponse::Roster(build_roster_view(session.registry())),
        Query::GetDrawState => QueryResponse::Draw(build_draw_view(session.draw_engine())),
        Query::GetGrouping => QueryResponse::Grouping(build_grouping_view(session)),
    }
}

/// DTO ростера с пометкой повторяющихся имён.
pub fn build_roster_view(registry: &Registry) -> RosterViewDto {
    let duplicates = registry.detect_duplicate_names();

    let participants = registry
        .participants()
        .iter()
        .map(|p| ParticipantViewDto {
            id: p.id.clone(),
            name: p.name.clone(),
            is_duplicate: duplicates.contains(&p.name),
        })
        .collect();

    let mut duplicate_names: Vec<String> = duplicates.into_iter().collect();
    duplicate_names.sort();

    RosterViewDto {
        participants,
        total: registry.len(),
        duplicate_names,
    }
}

pub fn build_draw_view(engine: &DrawEngine) -> DrawViewDto {
    let winners = engine
        .history()
        .entries()
        .map(|e| WinnerDto {
            ordinal: e.ordinal,
            id: e.participant.id.clone(),
            name: e.participant.name.clone(),
        })
        .collect();

    DrawViewDto {
        allow_replacement: engine.allow_replacement(),
        phase: engine.phase(),
        remaining: engine.remaining_count(),
        winners,
        last_winner: engine.last_winner().cloned(),
        display: engine.display_text().to_string(),
        can_draw: engine.can_draw(),
    }
}

pub fn build_grouping_view<R: RandomSource>(session: &Session<R>) -> GroupingViewDto {
    let total = session.participants().len();
    let effective = session.effective_group_size();
    GroupingViewDto {
        requested_group_size: session.requested_group_size(),
        effective_group_size: effective,
        total_participants: total,
        expected_groups: expected_group_count(total, effective),
        result: session.grouping().cloned(),
    }
}
