use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SpinConfig;
use crate::domain::{Participant, ParticipantId};
use crate::engine::errors::DrawError;
use crate::engine::history::WinnerHistory;
use crate::engine::spin::{SpinClock, SpinStart, SpinTick};
use crate::engine::RandomSource;

/// Что показывать, пока ничего не вытянуто.
pub const PLACEHOLDER_DISPLAY: &str = "???";

/// Фаза цикла розыгрыша: `Idle → Spinning → Idle`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawPhase {
    Idle,
    Spinning,
}

/// Состояние розыгрыша над снимком ростера.
///
/// Инварианты:
/// - без возврата: `pool == roster − history` по id, каждый id в истории не больше одного раза;
/// - с возвратом: пул не ведётся (`None`), каждый розыгрыш – по всему ростеру.
///
/// Снимок ростера подменяется через `sync_roster`, что полностью сбрасывает
/// состояние (пул = ростер, история пуста, прокрутка отменена).
#[derive(Clone, Debug)]
pub struct DrawEngine {
    roster: Vec<Participant>,
    pool: Option<Vec<Participant>>,
    history: WinnerHistory,
    allow_replacement: bool,
    spin_config: SpinConfig,
    spin: Option<SpinClock>,
    display: Option<String>,
}

impl DrawEngine {
    pub fn new(roster: Vec<Participant>, allow_replacement: bool, spin_config: SpinConfig) -> Self {
        let pool = if allow_replacement {
            None
        } else {
            Some(roster.clone())
        };
        Self {
            roster,
            pool,
            history: WinnerHistory::new(),
            allow_replacement,
            spin_config,
            spin: None,
            display: None,
        }
    }

    /// Ростер изменился – состояние розыгрыша выводится заново.
    pub fn sync_roster(&mut self, roster: &[Participant]) {
        self.roster = roster.to_vec();
        self.reset();
    }

    /// Сменить режим. История сохраняется, меняется только смысл пула.
    pub fn configure(&mut self, allow_replacement: bool) {
        if self.allow_replacement == allow_replacement {
            return;
        }
        self.allow_replacement = allow_replacement;
        self.pool = if allow_replacement {
            None
        } else {
            Some(self.roster_minus_history())
        };
        debug!(
            allow_replacement,
            remaining = ?self.remaining_count(),
            "draw policy changed"
        );
    }

    /// Пул = весь ростер, история пуста, прокрутка (если была) брошена.
    pub fn reset(&mut self) {
        if self.spin.take().is_some() {
            debug!("pending spin abandoned by reset");
        }
        self.history.clear();
        self.display = None;
        self.pool = if self.allow_replacement {
            None
        } else {
            Some(self.roster.clone())
        };
    }

    /// Безанимационный розыгрыш: победитель выбирается сразу.
    ///
    /// Пока идёт прокрутка – no-op (`Ok(None)`): второй розыгрыш в полёте
    /// не допускается.
    pub fn draw<R: RandomSource>(&mut self, rng: &mut R) -> Result<Option<Participant>, DrawError> {
        if self.is_spinning() {
            debug!("draw ignored: spin in progress");
            return Ok(None);
        }
        self.ensure_drawable()?;
        Ok(Some(self.select_winner(rng)))
    }

    /// Начать прокрутку. Предусловия те же, что у `draw`.
    pub fn begin_spin<R: RandomSource>(&mut self, rng: &mut R) -> Result<SpinStart, DrawError> {
        if self.is_spinning() {
            return Ok(SpinStart::AlreadySpinning);
        }
        self.ensure_drawable()?;

        let clock = SpinClock::new(&self.spin_config);
        let next_delay = clock.next_delay();
        self.spin = Some(clock);

        let candidate = self.suggest_candidate(rng);
        debug!(eligible = self.eligible().len(), "spin started");
        Ok(SpinStart::Started {
            candidate,
            next_delay,
        })
    }

    /// Протекло `delta` времени прокрутки.
    pub fn advance_spin<R: RandomSource>(&mut self, delta: Duration, rng: &mut R) -> SpinTick {
        let Some(clock) = self.spin.as_mut() else {
            return SpinTick::Idle;
        };
        if clock.elapse(delta) {
            return SpinTick::Elapsed;
        }
        let next_delay = clock.next_delay();
        let name = self.suggest_candidate(rng);
        SpinTick::Candidate { name, next_delay }
    }

    /// Завершить прокрутку и выбрать победителя – ровно один раз.
    ///
    /// Победитель выбирается заново и равномерно, независимо от показанных
    /// кандидатов. Если прокрутки нет – `Ok(None)`. Вызов допустим и до
    /// истечения таймера: анимация – UX-контракт, а не условие корректности.
    pub fn complete_spin<R: RandomSource>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<Participant>, DrawError> {
        if self.spin.take().is_none() {
            return Ok(None);
        }
        if let Err(err) = self.ensure_drawable() {
            self.display = self.history.latest().map(|p| p.name.clone());
            return Err(err);
        }
        Ok(Some(self.select_winner(rng)))
    }

    /// Бросить прокрутку без победителя и без изменения пула.
    /// Возвращает true, если прокрутка действительно шла.
    pub fn cancel_spin(&mut self) -> bool {
        if self.spin.take().is_none() {
            return false;
        }
        self.display = self.history.latest().map(|p| p.name.clone());
        debug!("spin cancelled");
        true
    }

    pub fn phase(&self) -> DrawPhase {
        if self.spin.is_some() {
            DrawPhase::Spinning
        } else {
            DrawPhase::Idle
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn allow_replacement(&self) -> bool {
        self.allow_replacement
    }

    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn history(&self) -> &WinnerHistory {
        &self.history
    }

    /// Оставшийся пул; `None` в режиме с возвратом.
    pub fn remaining_pool(&self) -> Option<&[Participant]> {
        self.pool.as_deref()
    }

    /// Сколько ещё можно вытянуть; `None` = без ограничений (с возвратом).
    pub fn remaining_count(&self) -> Option<usize> {
        self.pool.as_ref().map(Vec::len)
    }

    /// Можно ли сейчас начать розыгрыш (для блокировки кнопки).
    pub fn can_draw(&self) -> bool {
        !self.is_spinning() && self.ensure_drawable().is_ok()
    }

    /// Последний победитель. Пока идёт прокрутка – нет.
    pub fn last_winner(&self) -> Option<&Participant> {
        if self.is_spinning() {
            None
        } else {
            self.history.latest()
        }
    }

    /// Текст на табло: кандидат во время прокрутки, иначе последний победитель.
    pub fn display_text(&self) -> &str {
        self.display.as_deref().unwrap_or(PLACEHOLDER_DISPLAY)
    }

    fn eligible(&self) -> &[Participant] {
        match &self.pool {
            Some(pool) => pool,
            None => &self.roster,
        }
    }

    fn ensure_drawable(&self) -> Result<(), DrawError> {
        if self.roster.is_empty() {
            return Err(DrawError::EmptyRegistry);
        }
        if self.eligible().is_empty() {
            return Err(DrawError::ExhaustedPool);
        }
        Ok(())
    }

    /// Кандидат для табло – всегда из полного ростера.
    fn suggest_candidate<R: RandomSource>(&mut self, rng: &mut R) -> String {
        let name = rng
            .pick(&self.roster)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| PLACEHOLDER_DISPLAY.to_string());
        self.display = Some(name.clone());
        name
    }

    /// Вызывается только после `ensure_drawable`.
    fn select_winner<R: RandomSource>(&mut self, rng: &mut R) -> Participant {
        let winner = match self.pool.as_mut() {
            Some(pool) => {
                let idx = rng.pick_index(pool.len());
                pool.remove(idx)
            }
            None => {
                let idx = rng.pick_index(self.roster.len());
                self.roster[idx].clone()
            }
        };

        info!(
            id = %winner.id,
            name = %winner.name,
            draw_no = self.history.len() + 1,
            remaining = ?self.remaining_count(),
            "winner drawn"
        );

        self.display = Some(winner.name.clone());
        self.history.record(winner.clone());
        winner
    }

    fn roster_minus_history(&self) -> Vec<Participant> {
        let won: HashSet<&ParticipantId> = self.history.ids();
        self.roster
            .iter()
            .filter(|p| !won.contains(&p.id))
            .cloned()
            .collect()
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new(Vec::new(), false, SpinConfig::default())
    }
}
