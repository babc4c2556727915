// ==========================================
// 酒店维护导入 - 维修工单 (intervention) 模型
// ==========================================
// InterventionImportRow: 校验后的 21 列表格行
// InterventionDraft: 转换器输出的部分领域记录
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// InterventionImportRow - 规范化后的表格行
// ==========================================
// 必填: titre / statut；其余缺省为空串
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterventionImportRow {
    // ===== 必填 =====
    pub titre: String,
    pub statut: String,

    pub description: String,

    // ===== 分类 =====
    #[serde(rename = "type")]
    pub type_: String,
    pub categorie: String,
    pub priorite: String,
    pub localisation: String,

    // ===== 详细位置 =====
    pub numerochambre: String,
    pub etage: String,
    pub batiment: String,

    // ===== 人员 =====
    pub technicien: String,
    pub createur: String,

    // ===== 日期与时长 =====
    pub datecreation: String,
    pub dateplanifiee: String,
    pub heureplanifiee: String,
    pub dureeestimee: String,

    // ===== 备注与元数据 =====
    pub notesinternes: String,
    pub notesresolution: String,
    pub datelimite: String,
    pub tags: String,
    pub referenceexterne: String,
}

// ==========================================
// Tag - 标签
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub label: String,
    pub color: String,
}

// ==========================================
// InterventionDraft - 待持久化的部分工单
// ==========================================
// 由 record_converter 生成，交给持久化协作方
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionDraft {
    pub title: String,
    pub description: String,
    pub status: String,

    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub category: Option<String>,
    pub priority: String,

    pub location: String,
    pub room_number: Option<String>,
    pub floor: Option<i64>,
    pub building: Option<String>,

    pub created_at: NaiveDateTime,
    pub scheduled_at: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDateTime>,
    pub estimated_duration: Option<i64>, // 分钟

    pub internal_notes: Option<String>,
    pub resolution_notes: Option<String>,

    pub tags: Option<Vec<Tag>>,
    pub external_reference: Option<String>,

    // ===== 归属 =====
    pub establishment_id: String,
    pub created_by: String,
    pub created_by_name: String,

    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
    pub assigned_at: Option<NaiveDateTime>,

    // ===== 标志位 =====
    pub is_urgent: bool,
    pub is_blocking: bool,
    pub requires_validation: bool,

    pub photos: Vec<String>,
    pub photos_count: u32,
    pub views_count: u32,
    pub is_deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_row_type_field_renamed() {
        let row = InterventionImportRow {
            titre: "Fuite".to_string(),
            type_: "plomberie".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "plomberie");
        assert_eq!(json["statut"], "");
    }
}
