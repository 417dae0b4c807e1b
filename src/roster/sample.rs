//! Эталонный ростер для демонстрации и тестов.

use crate::domain::Participant;
use crate::infra::IdGenerator;

/// 20 различных имён.
pub const SAMPLE_NAMES: [&str; 20] = [
    "陳大文", "林小美", "張志明", "王春嬌", "周杰倫",
    "蔡依林", "李安", "王建民", "郭台銘", "張忠謀",
    "林書豪", "徐若瑄", "舒淇", "桂綸鎂", "張震",
    "王心凌", "楊丞琳", "蕭敬騰", "林俊傑", "田馥甄",
];

/// Участники эталонного ростера со свежими id.
pub fn sample_participants(ids: &IdGenerator) -> Vec<Participant> {
    SAMPLE_NAMES
        .iter()
        .map(|name| Participant {
            id: ids.next_participant_id(),
            name: (*name).to_string(),
        })
        .collect()
}
