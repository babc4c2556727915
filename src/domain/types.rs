// ==========================================
// 酒店维护导入 - 领域类型定义
// ==========================================
// 职责: 匹配类型 / 缺失值类别枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// MatchType - 匹配类型
// ==========================================
// exact: 完全一致 (1.0)
// partial: 前缀 / 名或姓一致
// fuzzy: 包含 / 词重叠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
    Fuzzy,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::Partial => write!(f, "partial"),
            MatchType::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

// ==========================================
// MissingCategory - 缺失值类别
// ==========================================
// 与 MissingListValues 的十个集合一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCategory {
    Types,
    Categories,
    Priorities,
    Locations,
    Statuses,
    Rooms,
    Floors,
    Buildings,
    Technicians,
    Creators,
}

impl MissingCategory {
    /// 软警告类别（状态除外，状态为硬错误），按警告输出顺序排列
    pub const WARNING_ORDER: [MissingCategory; 9] = [
        MissingCategory::Types,
        MissingCategory::Categories,
        MissingCategory::Priorities,
        MissingCategory::Locations,
        MissingCategory::Rooms,
        MissingCategory::Floors,
        MissingCategory::Buildings,
        MissingCategory::Technicians,
        MissingCategory::Creators,
    ];

    /// 对应的规范化字段名
    pub fn field(&self) -> &'static str {
        match self {
            MissingCategory::Types => "type",
            MissingCategory::Categories => "categorie",
            MissingCategory::Priorities => "priorite",
            MissingCategory::Locations => "localisation",
            MissingCategory::Statuses => "statut",
            MissingCategory::Rooms => "numerochambre",
            MissingCategory::Floors => "etage",
            MissingCategory::Buildings => "batiment",
            MissingCategory::Technicians => "technicien",
            MissingCategory::Creators => "createur",
        }
    }

    /// i18n 消息键前缀 (warnings.<key>.message / warnings.<key>.suggestion)
    pub fn message_key(&self) -> &'static str {
        match self {
            MissingCategory::Types => "types",
            MissingCategory::Categories => "categories",
            MissingCategory::Priorities => "priorities",
            MissingCategory::Locations => "locations",
            MissingCategory::Statuses => "statuses",
            MissingCategory::Rooms => "rooms",
            MissingCategory::Floors => "floors",
            MissingCategory::Buildings => "buildings",
            MissingCategory::Technicians => "technicians",
            MissingCategory::Creators => "creators",
        }
    }
}

impl fmt::Display for MissingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message_key())
    }
}
