// ==========================================
// 酒店维护导入 - 记录转换器
// ==========================================
// 职责: 校验后的行 + 用户确认的映射 → 部分领域记录
// 人员解析顺序: 用户映射 → 显示名精确匹配 → 原文兜底
// 映射指向未知用户时不兜底: 创建人保持当前用户, 技术员留空
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::{
    CreateRoomData, InterventionDraft, InterventionImportRow, ReferenceMappings, RoomImportRow,
    Tag, UserInfo, UserMappings,
};
use crate::importer::data_cleaner::{
    is_blank, non_blank, normalize_status, parse_leading_int, split_list,
};
use crate::importer::date_parser::{parse_date_midnight, parse_date_time};
use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// 默认标签颜色
pub const DEFAULT_TAG_COLOR: &str = "#3b82f6";

/// 缺省优先级
pub const DEFAULT_PRIORITY: &str = "normal";

// ==========================================
// ConversionContext - 转换上下文
// ==========================================
#[derive(Debug, Clone)]
pub struct ConversionContext<'a> {
    pub establishment_id: &'a str,
    pub current_user_id: &'a str,
    pub current_user_name: &'a str,
    pub users: &'a [UserInfo],
    pub user_mappings: Option<&'a UserMappings>,
    pub reference_mappings: Option<&'a ReferenceMappings>,
    pub now: NaiveDateTime,
    pub tag_color: String,
}

impl<'a> ConversionContext<'a> {
    pub fn new(
        establishment_id: &'a str,
        current_user_id: &'a str,
        current_user_name: &'a str,
    ) -> Self {
        Self {
            establishment_id,
            current_user_id,
            current_user_name,
            users: &[],
            user_mappings: None,
            reference_mappings: None,
            now: Local::now().naive_local(),
            tag_color: DEFAULT_TAG_COLOR.to_string(),
        }
    }

    pub fn with_users(mut self, users: &'a [UserInfo]) -> Self {
        self.users = users;
        self
    }

    pub fn with_user_mappings(mut self, mappings: &'a UserMappings) -> Self {
        self.user_mappings = Some(mappings);
        self
    }

    pub fn with_reference_mappings(mut self, mappings: &'a ReferenceMappings) -> Self {
        self.reference_mappings = Some(mappings);
        self
    }

    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn with_tag_color(mut self, color: impl Into<String>) -> Self {
        self.tag_color = color.into();
        self
    }

    /// 从配置读取标签颜色
    pub fn with_config(self, config: &impl ImportConfigReader) -> Self {
        self.with_tag_color(config.get_tag_color())
    }

    // 有映射 → 只认映射目标；无映射 → 显示名精确匹配（忽略大小写）
    fn resolve_user(&self, excel_name: &str) -> UserResolution<'a> {
        let mapped_id = self
            .user_mappings
            .and_then(|m| m.get(excel_name))
            .filter(|id| !id.is_empty());
        if let Some(id) = mapped_id {
            return match self.users.iter().find(|u| &u.id == id) {
                Some(user) => UserResolution::Resolved(user),
                None => UserResolution::MappedToUnknown,
            };
        }

        let needle = excel_name.to_lowercase();
        match self
            .users
            .iter()
            .find(|u| u.display_name.to_lowercase() == needle)
        {
            Some(user) => UserResolution::Resolved(user),
            None => UserResolution::Unmatched,
        }
    }

    // 确认映射优先，否则原值
    fn map_reference(&self, select: MappingSelector, raw: &str) -> String {
        self.reference_mappings
            .map(|m| ReferenceMappings::resolve(select(m), raw).to_string())
            .unwrap_or_else(|| raw.to_string())
    }
}

type MappingSelector = fn(&ReferenceMappings) -> &HashMap<String, String>;

/// Excel 人名的解析结果
#[derive(Debug, Clone, Copy, PartialEq)]
enum UserResolution<'a> {
    Resolved(&'a UserInfo),
    /// 映射存在但目标 id 不在用户列表中
    MappedToUnknown,
    Unmatched,
}

/// 解析后的人员身份
#[derive(Debug, Clone, PartialEq)]
struct Assignment {
    to: Option<String>,
    name: String,
    at: NaiveDateTime,
}

/// 工单转换
pub fn convert_to_interventions(
    rows: &[InterventionImportRow],
    ctx: &ConversionContext<'_>,
) -> Vec<InterventionDraft> {
    let drafts: Vec<InterventionDraft> =
        rows.iter().map(|row| convert_intervention(row, ctx)).collect();
    debug!(count = drafts.len(), establishment_id = ctx.establishment_id, "工单转换完成");
    drafts
}

fn convert_intervention(
    row: &InterventionImportRow,
    ctx: &ConversionContext<'_>,
) -> InterventionDraft {
    let created_on = parse_date_midnight(&row.datecreation);

    // ===== 创建人 =====
    let (created_by, created_by_name) = if is_blank(&row.createur) {
        (ctx.current_user_id.to_string(), ctx.current_user_name.to_string())
    } else {
        let excel_name = row.createur.trim();
        match ctx.resolve_user(excel_name) {
            UserResolution::Resolved(user) => (user.id.clone(), user.display_name.clone()),
            UserResolution::MappedToUnknown => {
                (ctx.current_user_id.to_string(), ctx.current_user_name.to_string())
            }
            UserResolution::Unmatched => (ctx.current_user_id.to_string(), excel_name.to_string()),
        }
    };

    // ===== 技术员 =====
    let assignment = if is_blank(&row.technicien) {
        None
    } else {
        let excel_name = row.technicien.trim();
        let at = created_on.unwrap_or(ctx.now);
        match ctx.resolve_user(excel_name) {
            UserResolution::Resolved(user) => Some(Assignment {
                to: Some(user.id.clone()),
                name: user.display_name.clone(),
                at,
            }),
            UserResolution::MappedToUnknown => None,
            UserResolution::Unmatched => Some(Assignment {
                to: None,
                name: excel_name.to_string(),
                at,
            }),
        }
    };

    // ===== 参考映射 =====
    // 建筑与位置只看原值是否为空, 空白原样保留
    let building = non_empty(&row.batiment).map(|b| ctx.map_reference(|m| &m.buildings, &b));
    let location = if row.localisation.is_empty() {
        String::new()
    } else {
        ctx.map_reference(|m| &m.locations, &row.localisation)
    };
    let type_ = non_blank(&row.type_).map(|v| ctx.map_reference(|m| &m.types, &v));
    let category = non_blank(&row.categorie).map(|v| ctx.map_reference(|m| &m.categories, &v));
    let priority = non_blank(&row.priorite)
        .map(|v| ctx.map_reference(|m| &m.priorities, &v))
        .unwrap_or_else(|| DEFAULT_PRIORITY.to_string());

    // ===== 数值字段 =====
    let floor = non_blank(&row.etage)
        .map(|v| ctx.map_reference(|m| &m.floors, &v))
        .and_then(|v| parse_leading_int(&v));
    let estimated_duration = non_blank(&row.dureeestimee)
        .and_then(|v| parse_leading_int(&v))
        .filter(|minutes| *minutes > 0);

    // ===== 日期 =====
    let scheduled_at = if is_blank(&row.dateplanifiee) {
        None
    } else if !is_blank(&row.heureplanifiee) {
        parse_date_time(&row.dateplanifiee, &row.heureplanifiee)
    } else {
        parse_date_midnight(&row.dateplanifiee)
    };

    let tags: Vec<Tag> = split_list(&row.tags)
        .into_iter()
        .map(|label| Tag {
            id: format!("tag_{}", Uuid::new_v4().simple()),
            label,
            color: ctx.tag_color.clone(),
        })
        .collect();

    let raw_priority = row.priorite.to_lowercase();
    let status_source = if row.statut.is_empty() { "nouveau" } else { row.statut.as_str() };

    InterventionDraft {
        title: row.titre.clone(),
        description: row.description.clone(),
        status: normalize_status(status_source),

        type_,
        category,
        priority,

        location,
        room_number: non_empty(&row.numerochambre),
        floor,
        building,

        created_at: created_on.unwrap_or(ctx.now),
        scheduled_at,
        due_date: parse_date_midnight(&row.datelimite),
        estimated_duration,

        internal_notes: non_blank(&row.notesinternes),
        resolution_notes: non_blank(&row.notesresolution),

        tags: (!tags.is_empty()).then_some(tags),
        external_reference: non_blank(&row.referenceexterne),

        establishment_id: ctx.establishment_id.to_string(),
        created_by,
        created_by_name,

        assigned_to: assignment.as_ref().and_then(|a| a.to.clone()),
        assigned_to_name: assignment.as_ref().map(|a| a.name.clone()),
        assigned_at: assignment.as_ref().map(|a| a.at),

        is_urgent: raw_priority == "urgent" || raw_priority == "critical",
        is_blocking: false,
        requires_validation: false,

        photos: Vec::new(),
        photos_count: 0,
        views_count: 0,
        is_deleted: false,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// 房间转换
pub fn convert_to_rooms(rows: &[RoomImportRow]) -> Vec<CreateRoomData> {
    rows.iter()
        .map(|row| {
            let amenities = split_list(&row.equipements);
            CreateRoomData {
                number: row.numero.clone(),
                floor: parse_leading_int(&row.etage).unwrap_or(0),
                room_type: row.type_.clone(),
                capacity: row.capacite,
                description: non_blank(&row.description),
                building: non_blank(&row.batiment),
                amenities: (!amenities.is_empty()).then_some(amenities),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn users() -> Vec<UserInfo> {
        vec![
            UserInfo::new("u-michel", "Michel", "Dupont", true),
            UserInfo::new("u-marie", "Marie", "Durand", false),
        ]
    }

    fn base_row() -> InterventionImportRow {
        InterventionImportRow {
            titre: "Fuite d'eau".to_string(),
            statut: "En cours".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let users = users();
        let ctx = ConversionContext::new("est-1", "current", "Moi").with_users(&users).with_now(now());
        let row = InterventionImportRow {
            technicien: "Michel Dupont".to_string(),
            ..base_row()
        };

        let drafts = convert_to_interventions(&[row], &ctx);
        let draft = &drafts[0];
        assert_eq!(draft.status, "in_progress");
        assert_eq!(draft.created_by, "current");
        assert_eq!(draft.created_by_name, "Moi");
        assert_eq!(draft.assigned_to.as_deref(), Some("u-michel"));
        assert_eq!(draft.assigned_to_name.as_deref(), Some("Michel Dupont"));
        assert_eq!(draft.assigned_at, Some(now()));
        assert_eq!(draft.priority, "normal");
        assert_eq!(draft.location, "");
        assert!(draft.tags.is_none());
        assert!(!draft.is_deleted);
    }

    #[test]
    fn test_unresolved_names_keep_literal_text() {
        let users = users();
        let ctx = ConversionContext::new("est-1", "current", "Moi").with_users(&users).with_now(now());
        let row = InterventionImportRow {
            technicien: " Paul Inconnu ".to_string(),
            createur: "Jeanne Externe".to_string(),
            datecreation: "15/03/2025".to_string(),
            ..base_row()
        };

        let draft = &convert_to_interventions(&[row], &ctx)[0];
        assert_eq!(draft.created_by, "current");
        assert_eq!(draft.created_by_name, "Jeanne Externe");
        assert_eq!(draft.assigned_to, None);
        assert_eq!(draft.assigned_to_name.as_deref(), Some("Paul Inconnu"));
        let march = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(draft.assigned_at, Some(march));
        assert_eq!(draft.created_at, march);
    }

    #[test]
    fn test_blank_technician_leaves_assignment_unset() {
        let ctx = ConversionContext::new("est-1", "current", "Moi").with_now(now());
        let draft = &convert_to_interventions(&[base_row()], &ctx)[0];
        assert!(draft.assigned_to.is_none());
        assert!(draft.assigned_to_name.is_none());
        assert!(draft.assigned_at.is_none());
        assert_eq!(draft.created_at, now());
    }

    #[test]
    fn test_user_mapping_wins_over_literal() {
        let users = users();
        let mut mappings = UserMappings::new();
        mappings.insert("M. Durand".to_string(), "u-marie".to_string());
        let ctx = ConversionContext::new("est-1", "current", "Moi")
            .with_users(&users)
            .with_user_mappings(&mappings)
            .with_now(now());
        let row = InterventionImportRow {
            createur: "M. Durand".to_string(),
            technicien: "M. Durand".to_string(),
            ..base_row()
        };

        let draft = &convert_to_interventions(&[row], &ctx)[0];
        assert_eq!(draft.created_by, "u-marie");
        assert_eq!(draft.created_by_name, "Marie Durand");
        assert_eq!(draft.assigned_to.as_deref(), Some("u-marie"));
    }

    #[test]
    fn test_mapping_to_unknown_user_id() {
        let users = users();
        let mut mappings = UserMappings::new();
        mappings.insert("Jeanne".to_string(), "ghost-id".to_string());
        let ctx = ConversionContext::new("est-1", "current", "Moi")
            .with_users(&users)
            .with_user_mappings(&mappings)
            .with_now(now());
        let row = InterventionImportRow {
            createur: "Jeanne".to_string(),
            technicien: "Jeanne".to_string(),
            datecreation: "15/03/2025".to_string(),
            ..base_row()
        };

        let draft = &convert_to_interventions(&[row], &ctx)[0];
        assert_eq!(draft.created_by, "current");
        assert_eq!(draft.created_by_name, "Moi");
        assert!(draft.assigned_to.is_none());
        assert!(draft.assigned_to_name.is_none());
        assert!(draft.assigned_at.is_none());
    }

    #[test]
    fn test_empty_mapping_id_falls_back_to_name_match() {
        let users = users();
        let mut mappings = UserMappings::new();
        mappings.insert("Marie Durand".to_string(), String::new());
        let ctx = ConversionContext::new("est-1", "current", "Moi")
            .with_users(&users)
            .with_user_mappings(&mappings)
            .with_now(now());
        let row = InterventionImportRow {
            technicien: "Marie Durand".to_string(),
            ..base_row()
        };

        let draft = &convert_to_interventions(&[row], &ctx)[0];
        assert_eq!(draft.assigned_to.as_deref(), Some("u-marie"));
    }

    #[test]
    fn test_whitespace_cells_keep_raw_value() {
        let ctx = ConversionContext::new("est-1", "current", "Moi").with_now(now());
        let row = InterventionImportRow {
            numerochambre: "  ".to_string(),
            localisation: " ".to_string(),
            batiment: " ".to_string(),
            priorite: " urgent".to_string(),
            ..base_row()
        };

        let draft = &convert_to_interventions(&[row], &ctx)[0];
        assert_eq!(draft.room_number.as_deref(), Some("  "));
        assert_eq!(draft.location, " ");
        assert_eq!(draft.building.as_deref(), Some(" "));
        assert!(!draft.is_urgent);
        assert_eq!(draft.priority, " urgent");
    }

    #[test]
    fn test_tag_color_from_config() {
        let config = crate::config::ConfigManager::new();
        config.set("tag_color", "#ff0000").unwrap();
        let ctx = ConversionContext::new("est-1", "current", "Moi")
            .with_config(&config)
            .with_now(now());
        let row = InterventionImportRow {
            tags: "eau".to_string(),
            ..base_row()
        };

        let draft = &convert_to_interventions(&[row], &ctx)[0];
        assert_eq!(draft.tags.as_ref().unwrap()[0].color, "#ff0000");
    }

    #[test]
    fn test_reference_mappings_and_derived_fields() {
        let mut refs = ReferenceMappings::default();
        refs.buildings = HashMap::from([("Bat A".to_string(), "building_a".to_string())]);
        refs.priorities = HashMap::from([("Haute".to_string(), "high".to_string())]);
        let ctx = ConversionContext::new("est-1", "current", "Moi")
            .with_reference_mappings(&refs)
            .with_now(now());
        let row = InterventionImportRow {
            batiment: "Bat A".to_string(),
            priorite: "Haute".to_string(),
            type_: "plomberie".to_string(),
            etage: "3e".to_string(),
            dureeestimee: "0".to_string(),
            tags: "urgent, eau,".to_string(),
            dateplanifiee: "22/04/2025".to_string(),
            heureplanifiee: "14:30".to_string(),
            notesinternes: "  ".to_string(),
            ..base_row()
        };

        let draft = &convert_to_interventions(&[row], &ctx)[0];
        assert_eq!(draft.building.as_deref(), Some("building_a"));
        assert_eq!(draft.priority, "high");
        assert_eq!(draft.type_.as_deref(), Some("plomberie"));
        assert_eq!(draft.category, None);
        assert_eq!(draft.floor, Some(3));
        assert_eq!(draft.estimated_duration, None);
        assert_eq!(draft.internal_notes, None);
        assert!(!draft.is_urgent);

        let tags = draft.tags.as_ref().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].label, "urgent");
        assert!(tags[0].id.starts_with("tag_"));
        assert_ne!(tags[0].id, tags[1].id);
        assert_eq!(tags[0].color, DEFAULT_TAG_COLOR);

        let scheduled = draft.scheduled_at.unwrap();
        assert_eq!(scheduled.format("%d/%m/%Y %H:%M").to_string(), "22/04/2025 14:30");
    }

    #[test]
    fn test_urgent_flag_uses_raw_priority() {
        let ctx = ConversionContext::new("est-1", "current", "Moi").with_now(now());
        let row = InterventionImportRow {
            priorite: "Critical".to_string(),
            ..base_row()
        };
        let draft = &convert_to_interventions(&[row], &ctx)[0];
        assert!(draft.is_urgent);
        assert_eq!(draft.priority, "Critical");
    }

    #[test]
    fn test_convert_to_rooms() {
        let rows = vec![RoomImportRow {
            numero: "101".to_string(),
            nom: "Suite".to_string(),
            batiment: "".to_string(),
            etage: "RDC".to_string(),
            type_: "suite".to_string(),
            capacite: 3,
            prix: Some(120.0),
            surface: None,
            description: "".to_string(),
            equipements: "wifi, tv".to_string(),
        }];
        let rooms = convert_to_rooms(&rows);
        assert_eq!(rooms[0].floor, 0);
        assert_eq!(rooms[0].building, None);
        assert_eq!(rooms[0].description, None);
        assert_eq!(rooms[0].amenities.as_deref(), Some(&["wifi".to_string(), "tv".to_string()][..]));
        assert_eq!(rooms[0].capacity, 3);
    }
}
