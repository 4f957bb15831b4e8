//! 建議排名
//!
//! 依總價值由高到低排序。刻意不設次要排序鍵：
//! 平手時維持輸入順序（穩定排序），相同快照重算結果必須可重現。

use crate::ProductionSuggestion;

/// 就地排名生產建議
pub fn rank(suggestions: &mut [ProductionSuggestion]) {
    suggestions.sort_by(|a, b| b.total_value.cmp(&a.total_value));
}
