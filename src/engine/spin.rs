//! Таймер «прокрутки» перед выбором победителя.
//!
//! Чисто презентационный контракт: пока идёт прокрутка, движок
//! подсказывает случайные имена-кандидаты с замедляющимся шагом.
//! На выбор победителя это никак не влияет.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SpinConfig;

/// Результат запуска прокрутки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpinStart {
    /// Прокрутка началась; первый кандидат и задержка до следующего кадра.
    Started { candidate: String, next_delay: Duration },
    /// Прокрутка уже идёт – повторный запуск игнорируется.
    AlreadySpinning,
}

/// Результат "протекания" времени прокрутки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpinTick {
    /// Время ещё есть: показать кандидата, следующий кадр через `next_delay`.
    Candidate { name: String, next_delay: Duration },
    /// Время вышло – можно вызывать `complete_spin`.
    Elapsed,
    /// Прокрутка не идёт.
    Idle,
}

/// Обратный отсчёт одной прокрутки.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpinClock {
    duration: Duration,
    elapsed: Duration,
    base_delay: Duration,
    slowdown: Duration,
}

impl SpinClock {
    pub fn new(config: &SpinConfig) -> Self {
        Self {
            duration: Duration::from_millis(config.duration_ms),
            elapsed: Duration::ZERO,
            base_delay: Duration::from_millis(config.base_delay_ms),
            slowdown: Duration::from_millis(config.slowdown_ms),
        }
    }

    /// Доля прошедшего времени, 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_elapsed(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Шаг замедляется линейно: `base + progress * slowdown`.
    pub fn next_delay(&self) -> Duration {
        self.base_delay + self.slowdown.mul_f64(self.progress())
    }

    /// Симулируем протекание `delta`. Возвращает true, если время вышло.
    pub fn elapse(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        self.is_elapsed()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
