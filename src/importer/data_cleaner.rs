// ==========================================
// 酒店维护导入 - 数据清洗器实现
// ==========================================
// 职责: 状态规范化（法语同义词 → 规范状态）
//       空白判定 / 列表拆分 / 前导整数解析
// ==========================================

use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// 法语状态 → 规范状态
static STATUS_SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("nouveau", "draft"),
        ("brouillon", "draft"),
        ("en_attente", "pending"),
        ("attente", "pending"),
        ("assigne", "assigned"),
        ("assignee", "assigned"),
        ("en_cours", "in_progress"),
        ("encours", "in_progress"),
        ("en_pause", "on_hold"),
        ("pause", "on_hold"),
        ("termine", "completed"),
        ("terminee", "completed"),
        ("complete", "completed"),
        ("valide", "validated"),
        ("validee", "validated"),
        ("annule", "cancelled"),
        ("annulee", "cancelled"),
        ("reporte", "cancelled"),
        ("reportee", "cancelled"),
    ])
});

/// 去除组合重音符号（NFD 分解后过滤）
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// 状态规范化
///
/// 小写 + trim + 去重音 + 连续空白 → `_`，再查法语同义词表；
/// 未知值原样（规范化后）透传
pub fn normalize_status(raw: &str) -> String {
    let stripped = strip_diacritics(raw.to_lowercase().trim());
    let normalized = stripped.split_whitespace().collect::<Vec<_>>().join("_");

    match STATUS_SYNONYMS.get(normalized.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => normalized,
    }
}

/// 空白判定（空串或仅空白）
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// 空白视为缺省: 非空白返回原值
pub fn non_blank(value: &str) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// 逗号分隔列表: 拆分 + trim + 去空项
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// 前导整数解析
///
/// 跳过前导空白，可选符号，读取到第一个非数字为止；
/// 无数字时返回 None（例: "3e" → 3, "2.5" → 2, "RDC" → None）
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, rest) = match trimmed.chars().next() {
        Some('-') => (-1, &trimmed[1..]),
        Some('+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse::<i64>().ok().map(|n| sign * n)
}
