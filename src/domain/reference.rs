// ==========================================
// 酒店维护导入 - 参考数据模型
// ==========================================
// 职责: 调用方提供的只读快照（用户 / 参考列表 / 映射）
// 红线: 管道内不修改任何快照
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// UserInfo - 机构用户
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_technician: bool,
}

impl UserInfo {
    pub fn new(id: &str, first_name: &str, last_name: &str, is_technician: bool) -> Self {
        Self {
            id: id.to_string(),
            display_name: format!("{} {}", first_name, last_name),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            is_technician,
        }
    }
}

// ==========================================
// ReferenceItem - 参考列表项
// ==========================================
// value: 规范 ID; label: 显示文本; 仅 active 项参与匹配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub value: String,
    pub label: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ReferenceItem {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            is_active: true,
        }
    }

    pub fn inactive(value: &str, label: &str) -> Self {
        Self {
            is_active: false,
            ..Self::new(value, label)
        }
    }
}

// ==========================================
// ExistingLists - 已有列表快照
// ==========================================
// 必填: types/categories/priorities/locations/statuses
// 可选: rooms/floors/buildings 仅在提供时才检查
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExistingLists {
    pub types: Vec<String>,
    pub categories: Vec<String>,
    pub priorities: Vec<String>,
    pub locations: Vec<String>,
    pub statuses: Vec<String>,

    pub rooms: Option<Vec<String>>,
    pub floors: Option<Vec<String>>,
    pub buildings: Option<Vec<String>>,
    pub users: Option<Vec<UserInfo>>,
    pub creators: Option<Vec<String>>,
    pub technicians: Option<Vec<String>>,

    // ===== 参考列表（带 value/label，用于建议） =====
    pub buildings_list: Option<Vec<ReferenceItem>>,
    pub locations_list: Option<Vec<ReferenceItem>>,
    pub floors_list: Option<Vec<ReferenceItem>>,
    pub types_list: Option<Vec<ReferenceItem>>,
    pub categories_list: Option<Vec<ReferenceItem>>,
    pub priorities_list: Option<Vec<ReferenceItem>>,
}

// ==========================================
// ReferenceMappings - 用户确认后的参考映射
// ==========================================
// excel 原值 → 规范 ID；空映射等价于未提供
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceMappings {
    pub buildings: HashMap<String, String>,
    pub locations: HashMap<String, String>,
    pub floors: HashMap<String, String>,
    pub types: HashMap<String, String>,
    pub categories: HashMap<String, String>,
    pub priorities: HashMap<String, String>,
}

/// excel 姓名 → 用户 ID
pub type UserMappings = HashMap<String, String>;

impl ReferenceMappings {
    /// 映射优先，否则原值透传
    pub fn resolve<'a>(map: &'a HashMap<String, String>, raw: &'a str) -> &'a str {
        map.get(raw).map(String::as_str).unwrap_or(raw)
    }
}
