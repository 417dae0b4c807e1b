use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ParticipantId;
use crate::engine::RandomSource;
use crate::session::Session;

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::{build_draw_view, build_roster_view};

/// Команды слоя отображения. Всё, что меняет состояние сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Вставленный текст или содержимое файла.
    AddNames { text: String },
    /// Несколько текстов подряд.
    AddSources { texts: Vec<String> },
    RemoveParticipant { id: ParticipantId },
    LoadSample,
    RemoveDuplicates,
    /// Очистка ростера; без `confirmed = true` ничего не делает.
    Clear { confirmed: bool },

    ConfigureDraw { allow_replacement: bool },
    ResetDraw,
    /// Розыгрыш без анимации.
    Draw,
    BeginSpin,
    AdvanceSpin { delta_ms: u64 },
    CompleteSpin,
    CancelSpin,

    SetGroupSize { group_size: usize },
    GenerateGroups,

    ExportGroups,
    ExportHistory,
}

impl Command {
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Применить команду к сессии.
pub fn execute<R: RandomSource>(
    session: &mut Session<R>,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    debug!(?command, "executing command");

    let response = match command {
        Command::AddNames { text } => {
            session.normalize_and_add(&text);
            CommandResponse::Roster(build_roster_view(session.registry()))
        }
        Command::AddSources { texts } => {
            session.normalize_and_add_all(texts);
            CommandResponse::Roster(build_roster_view(session.registry()))
        }
        Command::RemoveParticipant { id } => CommandResponse::Removed {
            participant: session.remove(&id),
        },
        Command::LoadSample => {
            session.load_sample();
            CommandResponse::Roster(build_roster_view(session.registry()))
        }
        Command::RemoveDuplicates => CommandResponse::DuplicatesRemoved {
            removed: session.remove_duplicate_names(),
        },
        Command::Clear { confirmed } => CommandResponse::Cleared {
            cleared: session.clear(|_| confirmed),
        },

        Command::ConfigureDraw { allow_replacement } => {
            session.configure_draw(allow_replacement);
            CommandResponse::Draw(build_draw_view(session.draw_engine()))
        }
        Command::ResetDraw => {
            session.reset_draw();
            CommandResponse::Draw(build_draw_view(session.draw_engine()))
        }
        Command::Draw => {
            let winner = session.draw()?;
            CommandResponse::Drawn {
                winner,
                state: build_draw_view(session.draw_engine()),
            }
        }
        Command::BeginSpin => CommandResponse::SpinStarted(session.begin_spin()?),
        Command::AdvanceSpin { delta_ms } => {
            CommandResponse::SpinAdvanced(session.advance_spin(Duration::from_millis(delta_ms)))
        }
        Command::CompleteSpin => {
            let winner = session.complete_spin()?;
            CommandResponse::Drawn {
                winner,
                state: build_draw_view(session.draw_engine()),
            }
        }
        Command::CancelSpin => CommandResponse::SpinCancelled {
            was_spinning: session.cancel_spin(),
        },

        Command::SetGroupSize { group_size } => CommandResponse::GroupSize {
            effective: session.set_group_size(group_size),
        },
        Command::GenerateGroups => CommandResponse::Groups(session.generate_groups()?.clone()),

        Command::ExportGroups => CommandResponse::Export(session.export_groups()?),
        Command::ExportHistory => CommandResponse::Export(session.export_history()?),
    };

    Ok(response)
}
