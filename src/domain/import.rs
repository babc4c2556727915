// ==========================================
// 酒店维护导入 - 导入结果模型
// ==========================================
// 职责: 错误 / 警告 / 缺失值 / 匹配建议 / 统计
// 行号约定: 1 起始, 0 表示文件级
// ==========================================

use crate::domain::types::{MatchType, MissingCategory};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

// ==========================================
// ImportError - 行级 / 文件级错误
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportError {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ImportError {
    /// 文件级错误（row = 0，无字段）
    pub fn file_level(message: impl Into<String>) -> Self {
        Self {
            row: 0,
            field: None,
            message: message.into(),
            value: None,
        }
    }

    pub fn field_error(
        row: usize,
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            row,
            field: Some(field.into()),
            message: message.into(),
            value,
        }
    }
}

// ==========================================
// ImportWarning - 软警告（不拒绝行）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWarning {
    pub row: usize,
    pub field: String,
    pub message: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

// ==========================================
// MissingListValues - 缺失值集合
// ==========================================
// 保留表格原始大小写，插入顺序稳定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingListValues {
    pub types: IndexSet<String>,
    pub categories: IndexSet<String>,
    pub priorities: IndexSet<String>,
    pub locations: IndexSet<String>,
    pub statuses: IndexSet<String>,
    pub rooms: IndexSet<String>,
    pub floors: IndexSet<String>,
    pub buildings: IndexSet<String>,
    pub technicians: IndexSet<String>,
    pub creators: IndexSet<String>,
}

impl MissingListValues {
    pub fn get(&self, category: MissingCategory) -> &IndexSet<String> {
        match category {
            MissingCategory::Types => &self.types,
            MissingCategory::Categories => &self.categories,
            MissingCategory::Priorities => &self.priorities,
            MissingCategory::Locations => &self.locations,
            MissingCategory::Statuses => &self.statuses,
            MissingCategory::Rooms => &self.rooms,
            MissingCategory::Floors => &self.floors,
            MissingCategory::Buildings => &self.buildings,
            MissingCategory::Technicians => &self.technicians,
            MissingCategory::Creators => &self.creators,
        }
    }

    pub fn get_mut(&mut self, category: MissingCategory) -> &mut IndexSet<String> {
        match category {
            MissingCategory::Types => &mut self.types,
            MissingCategory::Categories => &mut self.categories,
            MissingCategory::Priorities => &mut self.priorities,
            MissingCategory::Locations => &mut self.locations,
            MissingCategory::Statuses => &mut self.statuses,
            MissingCategory::Rooms => &mut self.rooms,
            MissingCategory::Floors => &mut self.floors,
            MissingCategory::Buildings => &mut self.buildings,
            MissingCategory::Technicians => &mut self.technicians,
            MissingCategory::Creators => &mut self.creators,
        }
    }

    /// 所有集合元素总数
    pub fn total(&self) -> usize {
        self.types.len()
            + self.categories.len()
            + self.priorities.len()
            + self.locations.len()
            + self.statuses.len()
            + self.rooms.len()
            + self.floors.len()
            + self.buildings.len()
            + self.technicians.len()
            + self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ==========================================
// 匹配建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMatchSuggestion {
    pub excel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub match_score: f64,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceMatchSuggestion {
    pub excel_value: String,
    pub reference_value: String,
    pub reference_label: String,
    pub match_score: f64,
    pub match_type: MatchType,
}

/// 每个 excel 值对应按得分降序排列的候选
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportMatchSuggestions {
    pub technicians: IndexMap<String, Vec<UserMatchSuggestion>>,
    pub creators: IndexMap<String, Vec<UserMatchSuggestion>>,
    pub buildings: IndexMap<String, Vec<ReferenceMatchSuggestion>>,
    pub locations: IndexMap<String, Vec<ReferenceMatchSuggestion>>,
    pub floors: IndexMap<String, Vec<ReferenceMatchSuggestion>>,
    pub types: IndexMap<String, Vec<ReferenceMatchSuggestion>>,
    pub categories: IndexMap<String, Vec<ReferenceMatchSuggestion>>,
    pub priorities: IndexMap<String, Vec<ReferenceMatchSuggestion>>,
}

impl ImportMatchSuggestions {
    pub fn is_empty(&self) -> bool {
        self.technicians.is_empty()
            && self.creators.is_empty()
            && self.buildings.is_empty()
            && self.locations.is_empty()
            && self.floors.is_empty()
            && self.types.is_empty()
            && self.categories.is_empty()
            && self.priorities.is_empty()
    }
}

// ==========================================
// ImportStats / ImportResult
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

/// 一次导入调用的汇总结果
///
/// 不变量: `success == errors.is_empty()`，`data.len() == stats.valid`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub errors: Vec<ImportError>,
    pub warnings: Vec<ImportWarning>,
    pub missing_values: MissingListValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_suggestions: Option<ImportMatchSuggestions>,
    pub stats: ImportStats,
}

impl<T> ImportResult<T> {
    /// 文件级失败: 单条 row 0 错误, stats {0, 0, 1}
    pub fn file_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            errors: vec![ImportError::file_level(message)],
            warnings: Vec::new(),
            missing_values: MissingListValues::default(),
            match_suggestions: None,
            stats: ImportStats {
                total: 0,
                valid: 0,
                invalid: 1,
            },
        }
    }
}

// ==========================================
// ImportOptions - 导入选项
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportOptions {
    pub skip_empty_rows: bool,
    pub max_rows: usize,
    pub start_row: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            skip_empty_rows: true,
            max_rows: 1000,
            start_row: 0,
        }
    }
}
