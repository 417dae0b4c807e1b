// src/bin/roster_dev_cli.rs
//
// Скриптовый прогон сессии от начала до конца: ввод, дубликаты,
// розыгрыш с прокруткой, разбиение, экспорт. Интерактивного
// интерфейса нет – только логи и файлы в текущей папке.
//
// Переменные окружения:
//   ROSTER_CONFIG  – путь к JSON-конфигу сессии (необязательно);
//   ROSTER_OUT_DIR – куда писать CSV (по умолчанию текущая папка);
//   ROSTER_LOG_FORMAT – pretty | compact | json (по умолчанию pretty);
//   ROSTER_LOG_FILE   – писать логи в файл вместо stderr;
//   RUST_LOG       – фильтр логов.

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use roster_engine::engine::{SpinStart, SpinTick};
use roster_engine::infra::{init_logging, LogConfig, LogFormat};
use roster_engine::{DrawError, Session, SessionConfig};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    let log_format = match env::var("ROSTER_LOG_FORMAT") {
        Ok(raw) => raw.parse::<LogFormat>()?,
        Err(_) => LogFormat::default(),
    };
    let log_file = env::var_os("ROSTER_LOG_FILE").map(PathBuf::from);
    init_logging(
        &LogConfig::from_verbosity(1)
            .with_format(log_format)
            .with_log_file(log_file),
    )?;

    let config = match env::var("ROSTER_CONFIG") {
        Ok(path) => SessionConfig::from_json_file(path)?,
        Err(_) => SessionConfig::default(),
    };
    let out_dir = env::var("ROSTER_OUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    let mut session = Session::with_config(config);

    println!("=== ROSTER DEV CLI ===\n");

    // Эталонный ростер + вставка с повтором.
    session.load_sample();
    session.normalize_and_add("周杰倫, 新同事\n\n  另一位  ");
    println!("Участников: {}", session.participants().len());
    println!("Повторяющиеся имена: {:?}", session.duplicate_names());

    let removed = session.remove_duplicate_names();
    println!("Удалено дубликатов: {removed}\n");

    // Три розыгрыша с прокруткой, как в UI.
    for round in 1..=3 {
        let mut delay = match session.begin_spin()? {
            SpinStart::Started {
                candidate,
                next_delay,
            } => {
                println!("  [{round}] крутим... {candidate}");
                next_delay
            }
            SpinStart::AlreadySpinning => {
                warn!("spin already running");
                continue;
            }
        };

        loop {
            match session.advance_spin(delay) {
                SpinTick::Candidate { name, next_delay } => {
                    println!("      ... {name}");
                    delay = next_delay;
                }
                SpinTick::Elapsed | SpinTick::Idle => break,
            }
        }

        if let Some(winner) = session.complete_spin()? {
            println!("  [{round}] победитель: {}\n", winner.name);
        }
    }

    // Остальных – без анимации, пока пул не опустеет.
    loop {
        match session.draw() {
            Ok(Some(winner)) => println!("  победитель: {}", winner.name),
            Ok(None) => break,
            Err(DrawError::ExhaustedPool) => {
                println!("\nВсе участники уже выиграли.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    let history = session.export_history()?;
    let history_path = out_dir.join(&history.filename);
    fs::write(&history_path, &history.bytes)?;
    info!(path = %history_path.display(), "history written");

    // Разбиение по 4 и экспорт.
    session.set_group_size(4);
    let groups = session.generate_groups()?;
    for group in &groups.groups {
        let names: Vec<&str> = group.members.iter().map(|m| m.name.as_str()).collect();
        println!("{} ({} чел.): {}", group.name, group.len(), names.join(", "));
    }

    let export = session.export_groups()?;
    let groups_path = out_dir.join(&export.filename);
    fs::write(&groups_path, &export.bytes)?;
    info!(path = %groups_path.display(), "groups written");

    // Сброс во время прокрутки: победителя нет, пул не трогаем.
    session.reset_draw();
    session.begin_spin()?;
    session.advance_spin(Duration::from_millis(100));
    session.reset_draw();
    println!(
        "\nПосле сброса: в пуле {:?}, в истории {}",
        session.draw_engine().remaining_count(),
        session.draw_engine().history().len()
    );

    Ok(())
}
