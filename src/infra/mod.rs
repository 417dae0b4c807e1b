//! Инфраструктурный слой вокруг движка ростера:
//! - генерация id участников;
//! - RNG-реализации для движка;
//! - инициализация логов.

pub mod ids;
pub mod logging;
pub mod rng;

pub use ids::*;
pub use logging::{init_logging, LogConfig, LogFormat, LoggingError};
pub use rng::*;
