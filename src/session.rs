//! Сессия: один владеющий экземпляр движка на пользователя.
//!
//! Поток данных:
//!   ввод → нормализация → `Registry` (единственный источник правды)
//!        → {`DrawEngine`, разбиение} работают по снимку ростера
//!        → результат разбиения / история розыгрыша → CSV.
//!
//! Любая мутация ростера здесь же сбрасывает состояние розыгрыша и
//! выбрасывает результат разбиения. Слой отображения сам состояние не
//! трогает – только через методы сессии, и после каждой операции
//! перечитывает снимки (`participants`, `draw`, `grouping`).

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::domain::{GroupingResult, Participant, ParticipantId};
use crate::engine::{
    clamp_group_size, expected_group_count, grouping, DrawEngine, DrawError, GroupingError,
    RandomSource, SpinStart, SpinTick,
};
use crate::export::{self, CsvExport, ExportError};
use crate::infra::{IdGenerator, SystemRng};
use crate::roster::{normalize_all, normalize_names, sample_participants, Registry};

pub struct Session<R: RandomSource = SystemRng> {
    config: SessionConfig,
    ids: IdGenerator,
    rng: R,
    registry: Registry,
    draw: DrawEngine,
    grouping: Option<GroupingResult>,
    /// Запрошенный размер группы; зажимается по размеру ростера при генерации.
    group_size: usize,
}

impl Session<SystemRng> {
    /// Живая сессия: случайные id, системный RNG, настройки по умолчанию.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_parts(config, IdGenerator::random(), SystemRng)
    }
}

impl Default for Session<SystemRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Session<R> {
    pub fn with_parts(config: SessionConfig, ids: IdGenerator, rng: R) -> Self {
        let draw = DrawEngine::new(
            Vec::new(),
            config.draw.allow_replacement,
            config.draw.spin.clone(),
        );
        let group_size = config.grouping.default_group_size;
        Self {
            config,
            ids,
            rng,
            registry: Registry::new(),
            draw,
            grouping: None,
            group_size,
        }
    }

    // ---------- ростер ----------

    /// Нормализовать сырой текст и дописать новых участников в конец.
    pub fn normalize_and_add(&mut self, raw: &str) -> &[Participant] {
        let batch = normalize_names(raw, &self.ids);
        self.add_batch(batch)
    }

    /// То же для нескольких текстов подряд (несколько файлов / вставок).
    pub fn normalize_and_add_all<I, S>(&mut self, sources: I) -> &[Participant]
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = normalize_all(sources, &self.ids);
        self.add_batch(batch)
    }

    pub fn add_batch(&mut self, batch: Vec<Participant>) -> &[Participant] {
        if !batch.is_empty() {
            self.registry.add_batch(batch);
            self.on_registry_changed();
        }
        self.registry.participants()
    }

    /// Удалить участника. Отсутствующий id – no-op, состояние не сбрасывается.
    pub fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        let removed = self.registry.remove(id)?;
        self.on_registry_changed();
        Some(removed)
    }

    pub fn replace_all(&mut self, list: Vec<Participant>) -> &[Participant] {
        self.registry.replace_all(list);
        self.on_registry_changed();
        self.registry.participants()
    }

    /// Заменить ростер эталонным списком.
    pub fn load_sample(&mut self) -> &[Participant] {
        let sample = sample_participants(&self.ids);
        self.replace_all(sample)
    }

    /// Очистить ростер. Деструктивно и без отмены, поэтому требует
    /// подтверждения: `confirm` получает текущее число участников.
    /// Возвращает true, если ростер очищен.
    pub fn clear<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(usize) -> bool,
    {
        if !confirm(self.registry.len()) {
            info!(total = self.registry.len(), "clear declined");
            return false;
        }
        self.registry.clear();
        self.on_registry_changed();
        true
    }

    pub fn duplicate_names(&self) -> HashSet<String> {
        self.registry.detect_duplicate_names()
    }

    /// Оставить первое вхождение каждого имени. Возвращает число удалённых.
    pub fn remove_duplicate_names(&mut self) -> usize {
        let removed = self.registry.remove_duplicate_names();
        if removed > 0 {
            self.on_registry_changed();
        }
        removed
    }

    fn on_registry_changed(&mut self) {
        self.draw.sync_roster(self.registry.participants());
        self.grouping = None;
    }

    // ---------- розыгрыш ----------

    pub fn configure_draw(&mut self, allow_replacement: bool) {
        self.draw.configure(allow_replacement);
    }

    pub fn reset_draw(&mut self) {
        self.draw.reset();
        info!(total = self.registry.len(), "draw state reset");
    }

    /// Безанимационный розыгрыш. `Ok(None)` – идёт прокрутка, вызов проигнорирован.
    pub fn draw(&mut self) -> Result<Option<Participant>, DrawError> {
        self.draw.draw(&mut self.rng).inspect_err(|err| {
            warn!(%err, "draw rejected");
        })
    }

    pub fn begin_spin(&mut self) -> Result<SpinStart, DrawError> {
        self.draw.begin_spin(&mut self.rng).inspect_err(|err| {
            warn!(%err, "spin rejected");
        })
    }

    pub fn advance_spin(&mut self, delta: Duration) -> SpinTick {
        self.draw.advance_spin(delta, &mut self.rng)
    }

    pub fn complete_spin(&mut self) -> Result<Option<Participant>, DrawError> {
        self.draw.complete_spin(&mut self.rng)
    }

    pub fn cancel_spin(&mut self) -> bool {
        self.draw.cancel_spin()
    }

    // ---------- разбиение ----------

    /// Запомнить размер группы. Возвращает эффективный размер для текущего ростера.
    pub fn set_group_size(&mut self, requested: usize) -> usize {
        self.group_size = requested;
        self.effective_group_size()
    }

    pub fn requested_group_size(&self) -> usize {
        self.group_size
    }

    /// Размер, зажатый в `[2, max(2, n)]`.
    pub fn effective_group_size(&self) -> usize {
        clamp_group_size(self.group_size, self.registry.len())
    }

    pub fn expected_group_count(&self) -> usize {
        expected_group_count(self.registry.len(), self.effective_group_size())
    }

    /// Новое случайное разбиение текущего ростера; прежний результат заменяется.
    pub fn generate_groups(&mut self) -> Result<&GroupingResult, GroupingError> {
        let size = self.effective_group_size();
        let result = grouping::generate(self.registry.participants(), size, &mut self.rng)
            .inspect_err(|err| warn!(%err, "grouping rejected"))?;
        let stored: &GroupingResult = self.grouping.insert(result);
        Ok(stored)
    }

    // ---------- экспорт ----------

    /// CSV текущего разбиения. Без разбиения – валидный файл только с заголовком.
    pub fn export_groups(&self) -> Result<CsvExport, ExportError> {
        self.export_groups_on(export::today())
    }

    pub fn export_groups_on(&self, date: NaiveDate) -> Result<CsvExport, ExportError> {
        let empty = GroupingResult::empty();
        let result = self.grouping.as_ref().unwrap_or(&empty);
        export::encode_on(result, &self.config.export, date)
    }

    pub fn export_history(&self) -> Result<CsvExport, ExportError> {
        self.export_history_on(export::today())
    }

    pub fn export_history_on(&self, date: NaiveDate) -> Result<CsvExport, ExportError> {
        export::encode_history_on(self.draw.history(), &self.config.export, date)
    }

    // ---------- чтение ----------

    pub fn participants(&self) -> &[Participant] {
        self.registry.participants()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn draw_engine(&self) -> &DrawEngine {
        &self.draw
    }

    pub fn grouping(&self) -> Option<&GroupingResult> {
        self.grouping.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
