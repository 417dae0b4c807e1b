//! Настройки сессии: режим розыгрыша, тайминги прокрутки, разбиение, экспорт.
//!
//! Все поля имеют значения по умолчанию, поэтому JSON может быть
//! частичным (`{"draw": {"allow_replacement": true}}`).

use std::fs;
use std::io;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::MIN_GROUP_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг: {0}")]
    Io(#[from] io::Error),

    #[error("Битый JSON конфига: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Некорректный конфиг: {0}")]
    Invalid(String),
}

/// Тайминги анимации прокрутки.
///
/// Шаг между кандидатами: `base_delay_ms + progress * slowdown_ms`,
/// где progress идёт от 0 до 1 за `duration_ms`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SpinConfig {
    pub duration_ms: u64,
    pub base_delay_ms: u64,
    pub slowdown_ms: u64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            base_delay_ms: 50,
            slowdown_ms: 300,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DrawConfig {
    /// Может ли один участник выиграть несколько раз.
    pub allow_replacement: bool,
    pub spin: SpinConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GroupingConfig {
    pub default_group_size: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            default_group_size: 4,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Префикс имени файла с результатом разбиения.
    pub grouping_label: String,
    /// Префикс имени файла с историей розыгрыша.
    pub history_label: String,
    /// Формат даты в имени файла (chrono strftime).
    pub date_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            grouping_label: "分組結果".to_string(),
            history_label: "中獎名單".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub draw: DrawConfig,
    pub grouping: GroupingConfig,
    pub export: ExportConfig,
}

impl SessionConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.draw.spin.duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "draw.spin.duration_ms должен быть > 0".into(),
            ));
        }
        if self.draw.spin.base_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "draw.spin.base_delay_ms должен быть > 0".into(),
            ));
        }
        if self.grouping.default_group_size < MIN_GROUP_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grouping.default_group_size должен быть >= {MIN_GROUP_SIZE}"
            )));
        }
        if self.export.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("export.date_format пуст".into()));
        }
        if StrftimeItems::new(&self.export.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "export.date_format {:?} не является strftime-форматом",
                self.export.date_format
            )));
        }
        Ok(())
    }
}
