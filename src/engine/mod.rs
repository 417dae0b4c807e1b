//! Движок выбора над ростером: розыгрыш призов и разбиение на группы.
//!
//! Высокоуровневые объекты:
//!   - `DrawEngine` – розыгрыш с возвратом / без возврата, история победителей,
//!     анимационный контракт «прокрутки» (`begin_spin` / `advance_spin` / `complete_spin`);
//!   - `grouping::generate` – случайное разбиение снимка ростера на группы.

pub mod draw;
pub mod errors;
pub mod grouping;
pub mod history;
pub mod spin;

pub use draw::{DrawEngine, DrawPhase};
pub use errors::{DrawError, GroupingError};
pub use grouping::{clamp_group_size, expected_group_count, generate, MIN_GROUP_SIZE};
pub use history::{WinnerEntry, WinnerHistory};
pub use spin::{SpinClock, SpinStart, SpinTick};

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    /// Равномерная перестановка: все перестановки равновероятны.
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерный индекс из `0..len`. Вызывающий гарантирует `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Равномерно выбрать элемент, `None` для пустого среза.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            let idx = self.pick_index(items.len());
            items.get(idx)
        }
    }
}
