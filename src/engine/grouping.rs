use tracing::info;

use crate::domain::{Group, GroupingResult, Participant};
use crate::engine::errors::GroupingError;
use crate::engine::RandomSource;

/// Меньше двух человек в группе не бывает.
pub const MIN_GROUP_SIZE: usize = 2;

/// Верхняя граница размера группы для ростера из `n` участников.
pub fn max_group_size(n: usize) -> usize {
    n.max(MIN_GROUP_SIZE)
}

/// Привести запрошенный размер к допустимому диапазону `[2, max(2, n)]`.
///
/// Это валидация на стороне вызывающего: `generate` сам ничего не
/// зажимает и на выход за диапазон отвечает ошибкой.
pub fn clamp_group_size(requested: usize, n: usize) -> usize {
    requested.clamp(MIN_GROUP_SIZE, max_group_size(n))
}

/// Сколько групп получится: `ceil(n / size)`.
pub fn expected_group_count(n: usize, group_size: usize) -> usize {
    if group_size == 0 {
        return 0;
    }
    n.div_ceil(group_size)
}

/// Случайно разбить снимок ростера на группы по `group_size`.
///
/// Алгоритм:
///   1. Равномерная перестановка снимка (все перестановки равновероятны).
///   2. Нарезка на последовательные куски по `group_size`,
///      последний кусок забирает остаток.
///   3. Группы нумеруются `1..k` в порядке кусков.
///
/// Не идемпотентно: каждый вызов даёт независимый новый результат.
pub fn generate<R: RandomSource>(
    snapshot: &[Participant],
    group_size: usize,
    rng: &mut R,
) -> Result<GroupingResult, GroupingError> {
    if snapshot.is_empty() {
        return Err(GroupingError::EmptyRegistry);
    }

    let max = max_group_size(snapshot.len());
    if !(MIN_GROUP_SIZE..=max).contains(&group_size) {
        return Err(GroupingError::InvalidGroupSize {
            requested: group_size,
            min: MIN_GROUP_SIZE,
            max,
        });
    }

    let mut shuffled = snapshot.to_vec();
    rng.shuffle(&mut shuffled);

    let groups: Vec<Group> = shuffled
        .chunks(group_size)
        .enumerate()
        .map(|(idx, chunk)| Group::new(idx + 1, chunk.to_vec()))
        .collect();

    info!(
        participants = snapshot.len(),
        group_size,
        groups = groups.len(),
        "groups generated"
    );

    Ok(GroupingResult { groups, group_size })
}
