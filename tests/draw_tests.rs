// tests/draw_tests.rs

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use roster_engine::config::SpinConfig;
use roster_engine::domain::{Participant, ParticipantId};
use roster_engine::engine::{DrawEngine, DrawError, DrawPhase, SpinStart, SpinTick};
use roster_engine::infra::DeterministicRng;

/// Утилита: ростер из имён, id = "1", "2", ...
fn roster(names: &[&str]) -> Vec<Participant> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| Participant::new((i + 1).to_string().as_str(), *n))
        .collect()
}

fn spin_cfg() -> SpinConfig {
    SpinConfig {
        duration_ms: 1000,
        base_delay_ms: 50,
        slowdown_ms: 300,
    }
}

fn engine(names: &[&str], allow_replacement: bool) -> DrawEngine {
    DrawEngine::new(roster(names), allow_replacement, spin_cfg())
}

//
// TEST 1 — три участника без возврата: 3 успешных розыгрыша, 4-й — ExhaustedPool
//
#[test]
fn three_draws_then_exhausted() {
    let mut rng = DeterministicRng::from_seed(1);
    let mut eng = engine(&["A", "B", "C"], false);

    let mut seen = HashSet::new();
    for _ in 0..3 {
        let winner = eng.draw(&mut rng).expect("draw ok").expect("not spinning");
        assert!(seen.insert(winner.id), "winner must be distinct");
    }

    assert_eq!(eng.draw(&mut rng), Err(DrawError::ExhaustedPool));
    assert_eq!(eng.remaining_count(), Some(0));
    assert_eq!(eng.history().len(), 3);
}

//
// TEST 2 — n победителей без возврата образуют перестановку ростера
//
#[test]
fn exhaustion_yields_permutation_of_roster() {
    let mut rng = DeterministicRng::from_seed(99);
    let names: Vec<String> = (0..12).map(|i| format!("P{i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut eng = engine(&name_refs, false);

    let mut ids: Vec<ParticipantId> = Vec::new();
    while let Ok(Some(w)) = eng.draw(&mut rng) {
        ids.push(w.id);
    }

    assert_eq!(ids.len(), 12);
    let mut sorted: Vec<ParticipantId> = ids.clone();
    sorted.sort();
    let mut expected: Vec<ParticipantId> = eng.roster().iter().map(|p| p.id.clone()).collect();
    expected.sort();
    assert_eq!(sorted, expected);
}

//
// TEST 3 — история: самые свежие первыми, с порядковыми номерами
//
#[test]
fn history_is_most_recent_first() {
    let mut rng = DeterministicRng::from_seed(5);
    let mut eng = engine(&["A", "B", "C"], false);

    let first = eng.draw(&mut rng).unwrap().unwrap();
    let second = eng.draw(&mut rng).unwrap().unwrap();

    let hist: Vec<&Participant> = eng.history().iter().collect();
    assert_eq!(hist, vec![&second, &first]);

    let ordinals: Vec<usize> = eng.history().entries().map(|e| e.ordinal).collect();
    assert_eq!(ordinals, vec![2, 1]);
    assert_eq!(eng.last_winner(), Some(&second));
    assert_eq!(eng.display_text(), second.name);
}

//
// TEST 4 — пул без возврата = ростер − история
//
#[test]
fn pool_is_roster_minus_history() {
    let mut rng = DeterministicRng::from_seed(8);
    let mut eng = engine(&["A", "B", "C", "D", "E"], false);

    eng.draw(&mut rng).unwrap();
    eng.draw(&mut rng).unwrap();

    let won: HashSet<&ParticipantId> = eng.history().ids();
    let pool: HashSet<&ParticipantId> = eng
        .remaining_pool()
        .expect("tracked without replacement")
        .iter()
        .map(|p| &p.id)
        .collect();

    assert_eq!(pool.len(), 3);
    assert!(pool.is_disjoint(&won));
    assert_eq!(pool.len() + won.len(), eng.roster().len());
}

//
// TEST 5 — с возвратом розыгрыш не кончается и повторы возможны
//
#[test]
fn replacement_mode_never_exhausts() {
    let mut rng = DeterministicRng::from_seed(3);
    let mut eng = engine(&["A", "B"], true);

    for _ in 0..50 {
        assert!(eng.draw(&mut rng).unwrap().is_some());
    }

    assert_eq!(eng.remaining_pool(), None);
    assert_eq!(eng.remaining_count(), None);
    assert_eq!(eng.history().len(), 50);

    let distinct: HashSet<&ParticipantId> = eng.history().ids();
    assert!(distinct.len() < eng.history().len(), "repeats expected");
}

//
// TEST 6 — пустой ростер: EmptyRegistry в обоих режимах
//
#[test]
fn empty_registry_error() {
    let mut rng = DeterministicRng::from_seed(3);

    let mut with = engine(&[], true);
    assert_eq!(with.draw(&mut rng), Err(DrawError::EmptyRegistry));

    let mut without = engine(&[], false);
    assert_eq!(without.draw(&mut rng), Err(DrawError::EmptyRegistry));
    assert_eq!(without.begin_spin(&mut rng), Err(DrawError::EmptyRegistry));
    assert!(!without.is_spinning());
}

//
// TEST 7 — смена режима: история сохраняется, пул пересчитывается
//
#[test]
fn configure_switches_pool_meaning() {
    let mut rng = DeterministicRng::from_seed(11);
    let mut eng = engine(&["A", "B", "C"], false);

    while eng.draw(&mut rng).is_ok() {}
    assert_eq!(eng.draw(&mut rng), Err(DrawError::ExhaustedPool));

    // С возвратом прошлые победители снова доступны.
    eng.configure(true);
    assert_eq!(eng.history().len(), 3);
    assert!(eng.draw(&mut rng).unwrap().is_some());
    assert_eq!(eng.history().len(), 4);

    // Обратно: пул = ростер − все, кто уже в истории.
    eng.configure(false);
    assert_eq!(eng.remaining_count(), Some(0));
    assert_eq!(eng.history().len(), 4);
}

#[test]
fn configure_back_restores_unwon_participants() {
    let mut rng = DeterministicRng::from_seed(12);
    let mut eng = engine(&["A", "B", "C", "D"], true);

    let w = eng.draw(&mut rng).unwrap().unwrap();
    eng.configure(false);

    let pool = eng.remaining_pool().unwrap();
    assert_eq!(pool.len(), 3);
    assert!(pool.iter().all(|p| p.id != w.id));
}

//
// TEST 8 — reset: пул = ростер, история пуста
//
#[test]
fn reset_restores_pool_and_clears_history() {
    let mut rng = DeterministicRng::from_seed(21);
    let mut eng = engine(&["A", "B", "C"], false);

    eng.draw(&mut rng).unwrap();
    eng.draw(&mut rng).unwrap();
    eng.reset();

    assert_eq!(eng.remaining_count(), Some(3));
    assert!(eng.history().is_empty());
    assert_eq!(eng.display_text(), "???");
    assert!(eng.last_winner().is_none());
}

//
// TEST 9 — прокрутка: Idle → Spinning → Idle, победитель один раз
//
#[test]
fn spin_cycle_selects_once() {
    let mut rng = DeterministicRng::from_seed(31);
    let mut eng = engine(&["A", "B", "C"], false);

    let (candidate, next_delay) = match eng.begin_spin(&mut rng).unwrap() {
        SpinStart::Started {
            candidate,
            next_delay,
        } => (candidate, next_delay),
        other => panic!("expected Started, got {other:?}"),
    };
    assert!(["A", "B", "C"].contains(&candidate.as_str()));
    assert_eq!(next_delay, Duration::from_millis(50));
    assert_eq!(eng.phase(), DrawPhase::Spinning);
    assert!(eng.last_winner().is_none());
    assert!(!eng.can_draw());

    // Крутим, пока не выйдет время; шаг только растёт.
    let mut delay = next_delay;
    let mut frames = 0;
    loop {
        match eng.advance_spin(delay, &mut rng) {
            SpinTick::Candidate { name, next_delay } => {
                assert_eq!(eng.display_text(), name);
                assert!(next_delay >= delay);
                delay = next_delay;
                frames += 1;
            }
            SpinTick::Elapsed => break,
            SpinTick::Idle => panic!("must be spinning"),
        }
    }
    assert!(frames > 0);

    // Пул не тронут до выбора.
    assert_eq!(eng.remaining_count(), Some(3));
    assert!(eng.history().is_empty());

    let winner = eng.complete_spin(&mut rng).unwrap().expect("winner");
    assert_eq!(eng.phase(), DrawPhase::Idle);
    assert_eq!(eng.remaining_count(), Some(2));
    assert_eq!(eng.history().latest(), Some(&winner));

    // Повторное завершение — ничего не делает.
    assert_eq!(eng.complete_spin(&mut rng), Ok(None));
    assert_eq!(eng.advance_spin(delay, &mut rng), SpinTick::Idle);
    assert_eq!(eng.history().len(), 1);
}

//
// TEST 10 — второй розыгрыш во время прокрутки игнорируется
//
#[test]
fn draw_while_spinning_is_noop() {
    let mut rng = DeterministicRng::from_seed(41);
    let mut eng = engine(&["A", "B", "C"], false);

    eng.begin_spin(&mut rng).unwrap();
    assert_eq!(eng.draw(&mut rng), Ok(None));
    assert_eq!(eng.begin_spin(&mut rng), Ok(SpinStart::AlreadySpinning));
    assert_eq!(eng.remaining_count(), Some(3));
    assert!(eng.history().is_empty());
}

//
// TEST 11 — reset / cancel во время прокрутки: без победителя и без изменения пула
//
#[test]
fn reset_while_spinning_abandons_selection() {
    let mut rng = DeterministicRng::from_seed(51);
    let mut eng = engine(&["A", "B", "C"], false);

    eng.draw(&mut rng).unwrap();
    eng.begin_spin(&mut rng).unwrap();
    eng.advance_spin(Duration::from_millis(200), &mut rng);
    eng.reset();

    assert!(!eng.is_spinning());
    assert_eq!(eng.complete_spin(&mut rng), Ok(None));
    assert!(eng.history().is_empty());
    assert_eq!(eng.remaining_count(), Some(3));
}

#[test]
fn cancel_spin_keeps_pool_and_history() {
    let mut rng = DeterministicRng::from_seed(52);
    let mut eng = engine(&["A", "B", "C"], false);

    let first = eng.draw(&mut rng).unwrap().unwrap();
    eng.begin_spin(&mut rng).unwrap();

    assert!(eng.cancel_spin());
    assert!(!eng.cancel_spin());
    assert_eq!(eng.remaining_count(), Some(2));
    assert_eq!(eng.history().len(), 1);
    assert_eq!(eng.display_text(), first.name);
    assert_eq!(eng.complete_spin(&mut rng), Ok(None));
}

#[test]
fn policy_change_mid_spin_leaves_nothing_eligible() {
    let mut rng = DeterministicRng::from_seed(53);
    let mut eng = engine(&["A"], true);

    let first = eng.draw(&mut rng).unwrap().unwrap();
    assert!(matches!(
        eng.begin_spin(&mut rng),
        Ok(SpinStart::Started { .. })
    ));

    // Без возврата единственный участник уже выиграл.
    eng.configure(false);
    assert_eq!(eng.remaining_count(), Some(0));

    assert_eq!(eng.complete_spin(&mut rng), Err(DrawError::ExhaustedPool));
    assert_eq!(eng.phase(), DrawPhase::Idle);
    assert_eq!(eng.history().len(), 1);
    assert_eq!(eng.remaining_count(), Some(0));
    assert_eq!(eng.display_text(), first.name);
}

//
// TEST 12 — синхронизация с новым ростером сбрасывает всё
//
#[test]
fn sync_roster_reinitialises_state() {
    let mut rng = DeterministicRng::from_seed(61);
    let mut eng = engine(&["A", "B"], false);

    eng.draw(&mut rng).unwrap();
    eng.begin_spin(&mut rng).unwrap();
    eng.sync_roster(&roster(&["X", "Y", "Z"]));

    assert!(!eng.is_spinning());
    assert!(eng.history().is_empty());
    assert_eq!(eng.remaining_count(), Some(3));
}

//
// TEST 13 — выбор равномерный
//
#[test]
fn replacement_draws_are_uniform() {
    let mut rng = DeterministicRng::from_seed(2024);
    let mut eng = engine(&["A", "B", "C"], true);

    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..30_000 {
        let w = eng.draw(&mut rng).unwrap().unwrap();
        *counts.entry(w.name).or_default() += 1;
    }

    assert_eq!(counts.len(), 3);
    for (name, count) in counts {
        assert!(
            (9_000..=11_000).contains(&count),
            "{name} drawn {count} times out of 30000"
        );
    }
}
