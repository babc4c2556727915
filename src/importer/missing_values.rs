// ==========================================
// 酒店维护导入 - 缺失值检测
// ==========================================
// Pass 1: 逐行逐字段，精确成员判定（状态先规范化）
// Pass 2: 对去重后的值做模糊匹配，生成建议
// 输入快照只读
// ==========================================

use crate::domain::{
    ExistingLists, ImportMatchSuggestions, InterventionImportRow, MissingCategory,
    MissingListValues, ReferenceItem, ReferenceMatchSuggestion, UserInfo,
};
use crate::importer::data_cleaner::{is_blank, normalize_status};
use crate::importer::matcher::{exists_in_list, find_reference_matches, find_user_matches};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// 检测结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingValueReport {
    pub missing: MissingListValues,
    pub suggestions: ImportMatchSuggestions,
}

// 显示名等值（trim + 不区分大小写）
fn found_in_users(name: &str, users: Option<&Vec<UserInfo>>) -> bool {
    let needle = name.trim().to_lowercase();
    users
        .map(|list| list.iter().any(|u| u.display_name.to_lowercase() == needle))
        .unwrap_or(false)
}

fn found_in_optional(value: &str, list: Option<&Vec<String>>) -> bool {
    list.map(|l| exists_in_list(value, l)).unwrap_or(false)
}

// 非空且不在列表中 → 记录原值
fn check_required_list(missing: &mut IndexSet<String>, value: &str, list: &[String]) {
    if !is_blank(value) && !exists_in_list(value, list) {
        missing.insert(value.to_string());
    }
}

// 仅当列表提供时才检查
fn check_optional_list(missing: &mut IndexSet<String>, value: &str, list: Option<&Vec<String>>) {
    if let Some(list) = list {
        check_required_list(missing, value, list);
    }
}

fn check_person(
    missing: &mut IndexSet<String>,
    value: &str,
    users: Option<&Vec<UserInfo>>,
    flat_list: Option<&Vec<String>>,
) {
    if is_blank(value) {
        return;
    }
    if !found_in_users(value, users) && !found_in_optional(value, flat_list) {
        missing.insert(value.to_string());
    }
}

/// 检测缺失值并生成匹配建议
pub fn detect_missing_values(
    rows: &[InterventionImportRow],
    existing: &ExistingLists,
) -> MissingValueReport {
    let mut missing = MissingListValues::default();

    // ===== Pass 1: 精确成员判定 =====
    for row in rows {
        check_required_list(&mut missing.types, &row.type_, &existing.types);
        check_required_list(&mut missing.categories, &row.categorie, &existing.categories);
        check_required_list(&mut missing.priorities, &row.priorite, &existing.priorities);
        check_required_list(&mut missing.locations, &row.localisation, &existing.locations);

        if !is_blank(&row.statut) && !exists_in_list(&normalize_status(&row.statut), &existing.statuses)
        {
            missing.statuses.insert(row.statut.clone());
        }

        check_optional_list(&mut missing.rooms, &row.numerochambre, existing.rooms.as_ref());
        check_optional_list(&mut missing.floors, &row.etage, existing.floors.as_ref());
        check_optional_list(&mut missing.buildings, &row.batiment, existing.buildings.as_ref());

        check_person(
            &mut missing.technicians,
            &row.technicien,
            existing.users.as_ref(),
            existing.technicians.as_ref(),
        );
        check_person(
            &mut missing.creators,
            &row.createur,
            existing.users.as_ref(),
            existing.creators.as_ref(),
        );
    }

    // ===== Pass 2: 建议生成 =====
    let mut suggestions = ImportMatchSuggestions::default();

    if let Some(users) = existing.users.as_ref().filter(|u| !u.is_empty()) {
        let technicians = distinct_trimmed(rows, |r| &r.technicien);
        for name in technicians {
            let matches = find_user_matches(&name, users, true);
            if !matches.is_empty() && !matches.iter().any(|m| m.match_score == 1.0) {
                missing.get_mut(MissingCategory::Technicians).insert(name.clone());
                suggestions.technicians.insert(name, matches);
            }
        }

        let creators = distinct_trimmed(rows, |r| &r.createur);
        for name in creators {
            let matches = find_user_matches(&name, users, false);
            if !matches.is_empty() && !matches.iter().any(|m| m.match_score == 1.0) {
                missing.get_mut(MissingCategory::Creators).insert(name.clone());
                suggestions.creators.insert(name, matches);
            }
        }
    }

    reference_suggestions(
        &distinct_trimmed(rows, |r| &r.batiment),
        existing.buildings_list.as_deref(),
        &mut suggestions.buildings,
    );
    reference_suggestions(
        &distinct_trimmed(rows, |r| &r.localisation),
        existing.locations_list.as_deref(),
        &mut suggestions.locations,
    );
    reference_suggestions(
        &distinct_trimmed(rows, |r| &r.etage),
        existing.floors_list.as_deref(),
        &mut suggestions.floors,
    );
    reference_suggestions(
        &distinct_trimmed(rows, |r| &r.type_),
        existing.types_list.as_deref(),
        &mut suggestions.types,
    );
    reference_suggestions(
        &distinct_trimmed(rows, |r| &r.categorie),
        existing.categories_list.as_deref(),
        &mut suggestions.categories,
    );
    reference_suggestions(
        &distinct_trimmed(rows, |r| &r.priorite),
        existing.priorities_list.as_deref(),
        &mut suggestions.priorities,
    );

    debug!(
        rows = rows.len(),
        missing_total = missing.total(),
        missing_statuses = missing.statuses.len(),
        technician_suggestions = suggestions.technicians.len(),
        creator_suggestions = suggestions.creators.len(),
        "缺失值检测完成"
    );

    MissingValueReport {
        missing,
        suggestions,
    }
}

// 去重后的非空 trim 值（首次出现顺序）
fn distinct_trimmed<F>(rows: &[InterventionImportRow], get: F) -> IndexSet<String>
where
    F: Fn(&InterventionImportRow) -> &String,
{
    rows.iter()
        .map(|r| get(r).trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

// 保留条件: 至少一个候选、无 1.0 候选、首选 value 与原值不同（不区分大小写）
fn reference_suggestions(
    values: &IndexSet<String>,
    items: Option<&[ReferenceItem]>,
    target: &mut IndexMap<String, Vec<ReferenceMatchSuggestion>>,
) {
    let Some(items) = items.filter(|i| !i.is_empty()) else {
        return;
    };

    for value in values {
        let matches = find_reference_matches(value, items);
        let Some(top) = matches.first() else {
            continue;
        };
        let has_exact = matches.iter().any(|m| m.match_score == 1.0);
        let already_correct = top.reference_value.to_lowercase() == value.to_lowercase();
        if !has_exact && !already_correct {
            target.insert(value.clone(), matches);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(f: impl FnOnce(&mut InterventionImportRow)) -> InterventionImportRow {
        let mut r = InterventionImportRow {
            titre: "t".to_string(),
            statut: "nouveau".to_string(),
            ..Default::default()
        };
        f(&mut r);
        r
    }

    fn lists() -> ExistingLists {
        ExistingLists {
            types: vec!["plomberie".to_string()],
            statuses: vec!["draft".to_string(), "in_progress".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_types_distinct() {
        let rows = vec![
            row(|r| r.type_ = "menuiserie".to_string()),
            row(|r| r.type_ = "peinture".to_string()),
            row(|r| r.type_ = "menuiserie".to_string()),
            row(|r| r.type_ = "Plomberie".to_string()),
        ];
        let report = detect_missing_values(&rows, &lists());
        assert_eq!(report.missing.types.len(), 2);
        assert!(report.missing.types.contains("menuiserie"));
        assert!(report.missing.types.contains("peinture"));
    }

    #[test]
    fn test_status_compared_after_normalization() {
        let rows = vec![
            row(|r| r.statut = "En cours".to_string()),
            row(|r| r.statut = "Bloqué".to_string()),
        ];
        let report = detect_missing_values(&rows, &lists());
        assert_eq!(report.missing.statuses.len(), 1);
        assert!(report.missing.statuses.contains("Bloqué"));
    }

    #[test]
    fn test_optional_lists_only_checked_when_supplied() {
        let rows = vec![row(|r| {
            r.numerochambre = "101".to_string();
            r.batiment = "B".to_string();
        })];
        let report = detect_missing_values(&rows, &lists());
        assert!(report.missing.rooms.is_empty());
        assert!(report.missing.buildings.is_empty());

        let mut with_rooms = lists();
        with_rooms.rooms = Some(vec!["102".to_string()]);
        let report = detect_missing_values(&rows, &with_rooms);
        assert!(report.missing.rooms.contains("101"));
    }

    #[test]
    fn test_blank_values_skipped() {
        let rows = vec![row(|r| r.type_ = "   ".to_string())];
        let report = detect_missing_values(&rows, &lists());
        assert!(report.missing.types.is_empty());
    }

    #[test]
    fn test_exact_user_match_not_missing_nor_suggested() {
        let mut existing = lists();
        existing.users = Some(vec![UserInfo::new("u1", "Michel", "Dupont", true)]);
        let rows = vec![row(|r| r.technicien = "michel dupont".to_string())];
        let report = detect_missing_values(&rows, &existing);
        assert!(report.missing.technicians.is_empty());
        assert!(report.suggestions.technicians.is_empty());
    }

    #[test]
    fn test_partial_user_match_suggested_and_missing() {
        let mut existing = lists();
        existing.users = Some(vec![UserInfo::new("u1", "Michel", "Dupont", true)]);
        let rows = vec![row(|r| {
            r.technicien = " Michel ".to_string();
            r.createur = "Dupont".to_string();
        })];
        let report = detect_missing_values(&rows, &existing);

        assert!(report.missing.technicians.contains(" Michel "));
        assert!(report.missing.technicians.contains("Michel"));
        let tech = &report.suggestions.technicians["Michel"];
        assert_eq!(tech[0].user_id, "u1");
        assert_eq!(tech[0].match_score, 0.9);

        assert!(report.suggestions.creators.contains_key("Dupont"));
    }

    #[test]
    fn test_flat_technician_list_satisfies_check() {
        let mut existing = lists();
        existing.technicians = Some(vec!["Sous-traitant".to_string()]);
        let rows = vec![row(|r| r.technicien = "sous-traitant".to_string())];
        let report = detect_missing_values(&rows, &existing);
        assert!(report.missing.technicians.is_empty());
    }

    #[test]
    fn test_reference_suggestions() {
        let mut existing = lists();
        existing.buildings_list = Some(vec![
            ReferenceItem::new("batiment_a", "Bâtiment A"),
            ReferenceItem::new("batiment_b", "Bâtiment B"),
        ]);
        let rows = vec![
            row(|r| r.batiment = "Bâtiment".to_string()),
            row(|r| r.batiment = "BATIMENT_A".to_string()),
            row(|r| r.batiment = "bâtiment b".to_string()),
        ];
        let report = detect_missing_values(&rows, &existing);
        assert_eq!(report.suggestions.buildings.len(), 1);
        assert_eq!(report.suggestions.buildings["Bâtiment"].len(), 2);
        assert!(report.missing.buildings.is_empty());
    }
}
