// tests/grouping_tests.rs

use std::collections::HashMap;

use roster_engine::domain::{Participant, ParticipantId};
use roster_engine::engine::{generate, GroupingError};
use roster_engine::infra::DeterministicRng;

/// Утилита: n участников с id "1".."n" и именами "P1".."Pn".
fn roster(n: usize) -> Vec<Participant> {
    (1..=n)
        .map(|i| Participant::new(i.to_string().as_str(), format!("P{i}")))
        .collect()
}

fn sorted_ids<'a>(it: impl Iterator<Item = &'a Participant>) -> Vec<ParticipantId> {
    let mut ids: Vec<ParticipantId> = it.map(|p| p.id.clone()).collect();
    ids.sort();
    ids
}

//
// TEST 1 — 4 участника по 2: ровно 2 группы, все id, подписи по порядку
//
#[test]
fn four_participants_in_pairs() {
    let reg = vec![
        Participant::new("1", "A"),
        Participant::new("2", "B"),
        Participant::new("3", "C"),
        Participant::new("4", "D"),
    ];
    let mut rng = DeterministicRng::from_seed(1);

    let result = generate(&reg, 2, &mut rng).expect("valid grouping");

    assert_eq!(result.group_count(), 2);
    assert!(result.groups.iter().all(|g| g.len() == 2));
    assert_eq!(result.groups[0].name, "第 1 組");
    assert_eq!(result.groups[1].name, "第 2 組");
    assert_eq!(result.groups[0].id, "group-1");
    assert_eq!(result.groups[1].id, "group-2");

    let all = sorted_ids(result.groups.iter().flat_map(|g| g.members.iter()));
    assert_eq!(all, sorted_ids(reg.iter()));
}

//
// TEST 2 — остаток уходит в последнюю группу
//
#[test]
fn last_group_takes_remainder() {
    let reg = roster(10);
    let mut rng = DeterministicRng::from_seed(2);

    let result = generate(&reg, 4, &mut rng).unwrap();

    let sizes: Vec<usize> = result.groups.iter().map(|g| g.len()).collect();
    assert_eq!(sizes, vec![4, 4, 2]);
    assert_eq!(result.participant_count(), 10);
    assert_eq!(result.group_size, 4);
}

//
// TEST 3 — один участник: одна группа из одного
//
#[test]
fn single_participant_single_group() {
    let reg = roster(1);
    let mut rng = DeterministicRng::from_seed(3);

    let result = generate(&reg, 2, &mut rng).unwrap();
    assert_eq!(result.group_count(), 1);
    assert_eq!(result.groups[0].members, reg);
}

//
// TEST 4 — размер = весь ростер: одна группа
//
#[test]
fn group_size_equal_to_roster() {
    let reg = roster(7);
    let mut rng = DeterministicRng::from_seed(4);

    let result = generate(&reg, 7, &mut rng).unwrap();
    assert_eq!(result.group_count(), 1);
    assert_eq!(result.groups[0].len(), 7);
}

//
// TEST 5 — ошибки контракта
//
#[test]
fn empty_roster_is_rejected() {
    let mut rng = DeterministicRng::from_seed(5);
    assert_eq!(generate(&[], 2, &mut rng), Err(GroupingError::EmptyRegistry));
}

#[test]
fn out_of_range_group_size_is_rejected() {
    let reg = roster(5);
    let mut rng = DeterministicRng::from_seed(6);

    assert_eq!(
        generate(&reg, 1, &mut rng),
        Err(GroupingError::InvalidGroupSize {
            requested: 1,
            min: 2,
            max: 5
        })
    );
    assert_eq!(
        generate(&reg, 6, &mut rng),
        Err(GroupingError::InvalidGroupSize {
            requested: 6,
            min: 2,
            max: 5
        })
    );
    assert!(matches!(
        generate(&reg, 0, &mut rng),
        Err(GroupingError::InvalidGroupSize { .. })
    ));
}

//
// TEST 6 — не идемпотентно: повторный вызов даёт новое разбиение
//
#[test]
fn regeneration_is_independent() {
    let reg = roster(20);
    let mut rng = DeterministicRng::from_seed(7);

    let first = generate(&reg, 4, &mut rng).unwrap();
    let second = generate(&reg, 4, &mut rng).unwrap();
    assert_ne!(first, second);
}

//
// TEST 7 — все перестановки равновероятны
//
#[test]
fn permutations_are_uniform() {
    let reg = roster(4);
    let mut rng = DeterministicRng::from_seed(2025);

    let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
    for _ in 0..24_000 {
        let result = generate(&reg, 4, &mut rng).unwrap();
        let order: Vec<String> = result.groups[0]
            .members
            .iter()
            .map(|p| p.id.as_str().to_string())
            .collect();
        *counts.entry(order).or_default() += 1;
    }

    // 4! = 24 перестановки, ожидаем ~1000 каждой.
    assert_eq!(counts.len(), 24);
    for (order, count) in counts {
        assert!(
            (800..=1200).contains(&count),
            "permutation {order:?} seen {count} times"
        );
    }
}
