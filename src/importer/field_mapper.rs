// ==========================================
// 酒店维护导入 - 字段映射器实现
// ==========================================
// 职责: 表头规范化 + 表头别名 → 规范字段映射
// 字典: 规范字段 → 已知表头写法（构建时统一规范化）
// ==========================================

use crate::importer::importer_trait::{NormalizedRow, RawRow};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 表头规范化
///
/// 小写 → NFD 分解 → 去除组合重音 → 仅保留 [a-z0-9]
///
/// # 示例
/// ```
/// use hotel_maintenance_import::importer::field_mapper::normalize_key;
/// assert_eq!(normalize_key("Numéro Chambre*"), "numerochambre");
/// ```
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

// ==========================================
// KeyMapping - 规范化表头 → 规范字段
// ==========================================
#[derive(Debug, Clone)]
pub struct KeyMapping {
    entries: HashMap<String, &'static str>,
    fields: Vec<&'static str>,
}

impl KeyMapping {
    /// 从 (规范字段, 表头写法列表) 表构建
    pub fn from_table(table: &[(&'static str, &[&'static str])]) -> Self {
        let mut entries = HashMap::new();
        let mut fields = Vec::with_capacity(table.len());
        for (field, spellings) in table {
            fields.push(*field);
            entries.insert(normalize_key(field), *field);
            for spelling in *spellings {
                entries.insert(normalize_key(spelling), *field);
            }
        }
        Self { entries, fields }
    }

    /// 查找已规范化的表头
    pub fn lookup(&self, normalized_key: &str) -> Option<&'static str> {
        self.entries.get(normalized_key).copied()
    }

    /// 所有规范字段（声明顺序）
    pub fn canonical_fields(&self) -> &[&'static str] {
        &self.fields
    }
}

/// 规范化一行
///
/// 未知表头静默丢弃；后出现的列覆盖先前映射到同一字段的列；
/// `None` 输入返回空行
pub fn normalize_object(row: Option<&RawRow>, mapping: &KeyMapping) -> NormalizedRow {
    let mut normalized = NormalizedRow::new();
    let Some(row) = row else {
        return normalized;
    };

    for (key, value) in row {
        if let Some(field) = mapping.lookup(&normalize_key(key)) {
            normalized.insert(field.to_string(), value.clone());
        }
    }

    normalized
}

// ==========================================
// 维修工单表头字典（21 列）
// ==========================================
pub const INTERVENTION_HEADERS: &[(&str, &[&str])] = &[
    ("titre", &["title", "Titre*"]),
    ("description", &["desc", "Description*"]),
    ("statut", &["status", "état", "Statut*"]),
    ("type", &["Type d'intervention", "intervention type"]),
    ("categorie", &["catégorie", "category"]),
    ("priorite", &["priorité", "priority"]),
    ("localisation", &["location", "emplacement", "lieu"]),
    ("numerochambre", &["numero_chambre", "N° chambre", "chambre", "room", "room number"]),
    ("etage", &["étage", "floor", "niveau"]),
    ("batiment", &["bâtiment", "building"]),
    ("technicien", &["technician", "assigné à", "Technicien (Prénom Nom)"]),
    ("createur", &["créateur", "creator", "créé par", "Créateur (Prénom Nom)"]),
    (
        "datecreation",
        &["date_creation", "creation date", "date créa", "Date création (JJ/MM/AAAA)"],
    ),
    (
        "dateplanifiee",
        &["date_planifiee", "scheduled date", "date prévue", "Date planifiée (JJ/MM/AAAA)"],
    ),
    (
        "heureplanifiee",
        &["heure_planifiee", "scheduled time", "heure", "Heure planifiée (HH:MM)"],
    ),
    (
        "dureeestimee",
        &["duree_estimee", "estimated duration", "durée", "Durée estimée (minutes)"],
    ),
    ("notesinternes", &["notes_internes", "internal notes", "notes"]),
    ("notesresolution", &["notes_resolution", "resolution notes", "notes de résolution"]),
    (
        "datelimite",
        &["date_limite", "due date", "deadline", "Date limite (JJ/MM/AAAA)"],
    ),
    ("tags", &["étiquettes", "Tags (séparés par virgules)"]),
    (
        "referenceexterne",
        &["reference_externe", "external reference", "référence", "ref"],
    ),
];

// ==========================================
// 房间表头字典（10 列）
// ==========================================
pub const ROOM_HEADERS: &[(&str, &[&str])] = &[
    ("numero", &["numéro", "number", "numero chambre", "room number"]),
    ("nom", &["name"]),
    ("batiment", &["bâtiment", "building"]),
    ("etage", &["étage", "floor", "niveau"]),
    ("type", &["type chambre", "room type"]),
    ("capacite", &["capacité", "capacity", "personnes"]),
    ("prix", &["price", "tarif"]),
    ("surface", &["area", "taille"]),
    ("description", &["desc"]),
    ("equipements", &["équipements", "equipment", "amenities"]),
];

pub static INTERVENTION_KEY_MAPPING: Lazy<KeyMapping> =
    Lazy::new(|| KeyMapping::from_table(INTERVENTION_HEADERS));

pub static ROOM_KEY_MAPPING: Lazy<KeyMapping> = Lazy::new(|| KeyMapping::from_table(ROOM_HEADERS));
