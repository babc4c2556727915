// ==========================================
// 酒店维护导入 - 模糊匹配
// ==========================================
// 用户匹配: 全名 > 名/姓 > 前缀 > 包含 > 词重叠
// 参考匹配: value/label 完全一致 > 前缀 > 包含 > 词重叠
// 比较均为 trim + 不区分大小写；结果按得分降序（稳定）
// ==========================================

use crate::domain::{MatchType, ReferenceItem, ReferenceMatchSuggestion, UserInfo, UserMatchSuggestion};
use std::cmp::Ordering;

/// 建议的最低得分
pub const MIN_MATCH_SCORE: f64 = 0.70;

/// 列表成员判定（trim + 不区分大小写）
pub fn exists_in_list(value: &str, list: &[String]) -> bool {
    let needle = value.trim().to_lowercase();
    list.iter().any(|item| item.to_lowercase() == needle)
}

// 词重叠计数: 每个搜索词只要与任一候选词互相包含即计一次
fn matching_word_count(search_words: &[&str], candidate_words: &[&str]) -> usize {
    search_words
        .iter()
        .filter(|sw| {
            candidate_words
                .iter()
                .any(|cw| cw.contains(**sw) || sw.contains(*cw))
        })
        .count()
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// 用户单项打分
fn score_user(search: &str, user: &UserInfo) -> Option<(f64, MatchType)> {
    let full = user.display_name.to_lowercase();
    let first = user.first_name.to_lowercase();
    let last = user.last_name.to_lowercase();

    let scored = if full == search {
        (1.0, MatchType::Exact)
    } else if first == search || last == search {
        (0.9, MatchType::Partial)
    } else if full.starts_with(search) {
        (0.8, MatchType::Partial)
    } else if first.starts_with(search) {
        (0.75, MatchType::Partial)
    } else if last.starts_with(search) {
        (0.7, MatchType::Partial)
    } else if full.contains(search) {
        (0.6, MatchType::Fuzzy)
    } else {
        let search_words: Vec<&str> = search.split_whitespace().collect();
        let name_words: Vec<&str> = full.split_whitespace().collect();
        let matching = matching_word_count(&search_words, &name_words);
        if matching == 0 {
            return None;
        }
        (
            0.4 + (matching as f64 / search_words.len() as f64) * 0.1,
            MatchType::Fuzzy,
        )
    };

    Some(scored)
}

/// 查找可能对应 excel 姓名的用户
///
/// `filter_technician` 为 true 时仅考虑技术员
pub fn find_user_matches(
    excel_name: &str,
    users: &[UserInfo],
    filter_technician: bool,
) -> Vec<UserMatchSuggestion> {
    let search = excel_name.trim().to_lowercase();
    if search.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<UserMatchSuggestion> = users
        .iter()
        .filter(|u| !filter_technician || u.is_technician)
        .filter_map(|user| {
            let (match_score, match_type) = score_user(&search, user)?;
            (match_score >= MIN_MATCH_SCORE).then(|| UserMatchSuggestion {
                excel_name: excel_name.to_string(),
                user_id: user.id.clone(),
                user_name: user.display_name.clone(),
                match_score,
                match_type,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| by_score_desc(a.match_score, b.match_score));
    suggestions
}

// 参考项单项打分
fn score_reference(search: &str, item: &ReferenceItem) -> Option<(f64, MatchType)> {
    let value = item.value.to_lowercase();
    let label = item.label.to_lowercase();

    let scored = if value == search || label == search {
        (1.0, MatchType::Exact)
    } else if value.starts_with(search) || label.starts_with(search) {
        (0.85, MatchType::Partial)
    } else if value.contains(search) || label.contains(search) {
        (0.75, MatchType::Partial)
    } else {
        let search_words: Vec<&str> = search.split_whitespace().collect();
        let label_words: Vec<&str> = label.split_whitespace().collect();
        let value_words: Vec<&str> = value
            .split(|c: char| c == '_' || c.is_whitespace())
            .filter(|w| !w.is_empty())
            .collect();

        let matching = search_words
            .iter()
            .filter(|sw| {
                matching_word_count(&[**sw], &label_words) > 0
                    || matching_word_count(&[**sw], &value_words) > 0
            })
            .count();
        if matching == 0 {
            return None;
        }
        (
            0.5 + (matching as f64 / search_words.len() as f64) * 0.2,
            MatchType::Fuzzy,
        )
    };

    Some(scored)
}

/// 查找可能对应 excel 值的参考项（仅 active 项）
pub fn find_reference_matches(
    excel_value: &str,
    items: &[ReferenceItem],
) -> Vec<ReferenceMatchSuggestion> {
    let search = excel_value.trim().to_lowercase();
    if search.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<ReferenceMatchSuggestion> = items
        .iter()
        .filter(|item| item.is_active)
        .filter_map(|item| {
            let (match_score, match_type) = score_reference(&search, item)?;
            (match_score >= MIN_MATCH_SCORE).then(|| ReferenceMatchSuggestion {
                excel_value: excel_value.to_string(),
                reference_value: item.value.clone(),
                reference_label: item.label.clone(),
                match_score,
                match_type,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| by_score_desc(a.match_score, b.match_score));
    suggestions
}
