// ==========================================
// 酒店维护导入 - 行校验器
// ==========================================
// 职责: 规范化行 → 强类型行（必填 / 长度 / 数值约束）
// 规则: 每个违反的约束产生一条 FieldIssue；按字段声明顺序输出
// 长度按字符计
// ==========================================

use crate::domain::{InterventionImportRow, RoomImportRow};
use crate::i18n::{t, t_with_args};
use crate::importer::importer_trait::NormalizedRow;

/// 单条字段违规
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl FieldIssue {
    fn new(row: &NormalizedRow, field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
            value: row.get(field).cloned(),
        }
    }
}

pub type ValidationOutcome<T> = Result<T, Vec<FieldIssue>>;

// 工单可选文本字段的长度上限 (字段, 上限, 消息键)
const INTERVENTION_MAX_LENGTHS: &[(&str, usize, &str)] = &[
    ("description", 5000, "validation.description_too_long"),
    ("localisation", 200, "validation.localisation_too_long"),
    ("numerochambre", 20, "validation.numerochambre_too_long"),
    ("batiment", 50, "validation.batiment_too_long"),
    ("technicien", 100, "validation.technicien_too_long"),
    ("createur", 100, "validation.createur_too_long"),
    ("notesinternes", 2000, "validation.notesinternes_too_long"),
    ("notesresolution", 2000, "validation.notesresolution_too_long"),
    ("referenceexterne", 100, "validation.referenceexterne_too_long"),
];

const TITLE_MAX_LENGTH: usize = 200;
const DEFAULT_ROOM_CAPACITY: u32 = 2;

fn field<'a>(row: &'a NormalizedRow, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

fn too_long_message(key: &str, max: usize) -> String {
    let max = max.to_string();
    t_with_args(key, &[("max", max.as_str())])
}

// ==========================================
// 工单行校验
// ==========================================
pub fn validate_intervention_row(row: &NormalizedRow) -> ValidationOutcome<InterventionImportRow> {
    let mut issues = Vec::new();

    // ===== 必填字段 =====
    let titre = field(row, "titre");
    if titre.is_empty() {
        issues.push(FieldIssue::new(row, "titre", t("validation.titre_required")));
    } else if titre.chars().count() > TITLE_MAX_LENGTH {
        issues.push(FieldIssue::new(
            row,
            "titre",
            too_long_message("validation.titre_too_long", TITLE_MAX_LENGTH),
        ));
    }

    if field(row, "statut").is_empty() {
        issues.push(FieldIssue::new(row, "statut", t("validation.statut_required")));
    }

    // ===== 长度上限 =====
    for (name, max, key) in INTERVENTION_MAX_LENGTHS {
        if field(row, name).chars().count() > *max {
            issues.push(FieldIssue::new(row, name, too_long_message(key, *max)));
        }
    }

    if !issues.is_empty() {
        return Err(issues);
    }

    let get = |name: &str| field(row, name).to_string();
    Ok(InterventionImportRow {
        titre: get("titre"),
        statut: get("statut"),
        description: get("description"),
        type_: get("type"),
        categorie: get("categorie"),
        priorite: get("priorite"),
        localisation: get("localisation"),
        numerochambre: get("numerochambre"),
        etage: get("etage"),
        batiment: get("batiment"),
        technicien: get("technicien"),
        createur: get("createur"),
        datecreation: get("datecreation"),
        dateplanifiee: get("dateplanifiee"),
        heureplanifiee: get("heureplanifiee"),
        dureeestimee: get("dureeestimee"),
        notesinternes: get("notesinternes"),
        notesresolution: get("notesresolution"),
        datelimite: get("datelimite"),
        tags: get("tags"),
        referenceexterne: get("referenceexterne"),
    })
}

// ==========================================
// 房间行校验
// ==========================================
pub fn validate_room_row(row: &NormalizedRow) -> ValidationOutcome<RoomImportRow> {
    let mut issues = Vec::new();

    if field(row, "numero").is_empty() {
        issues.push(FieldIssue::new(row, "numero", t("validation.numero_required")));
    }
    if field(row, "nom").is_empty() {
        issues.push(FieldIssue::new(row, "nom", t("validation.nom_required")));
    }

    let capacite = parse_capacity(row, &mut issues);
    let prix = parse_positive(row, "prix", &mut issues);
    let surface = parse_positive(row, "surface", &mut issues);

    if !issues.is_empty() {
        return Err(issues);
    }

    let or_default = |name: &str, default: &str| {
        let value = field(row, name);
        if value.is_empty() {
            default.to_string()
        } else {
            value.to_string()
        }
    };

    Ok(RoomImportRow {
        numero: field(row, "numero").to_string(),
        nom: field(row, "nom").to_string(),
        batiment: field(row, "batiment").to_string(),
        etage: or_default("etage", "0"),
        type_: or_default("type", "double"),
        capacite,
        prix,
        surface,
        description: field(row, "description").to_string(),
        equipements: field(row, "equipements").to_string(),
    })
}

// 空 → 2；否则须为正整数
fn parse_capacity(row: &NormalizedRow, issues: &mut Vec<FieldIssue>) -> u32 {
    let raw = field(row, "capacite").trim();
    if raw.is_empty() {
        return DEFAULT_ROOM_CAPACITY;
    }

    let Some(number) = parse_number(raw) else {
        issues.push(FieldIssue::new(row, "capacite", t("validation.capacite_not_number")));
        return DEFAULT_ROOM_CAPACITY;
    };

    let mut valid = true;
    if number.fract() != 0.0 || number > f64::from(u32::MAX) {
        issues.push(FieldIssue::new(row, "capacite", t("validation.capacite_not_integer")));
        valid = false;
    }
    if number <= 0.0 {
        issues.push(FieldIssue::new(row, "capacite", t("validation.capacite_not_positive")));
        valid = false;
    }

    if valid {
        number as u32
    } else {
        DEFAULT_ROOM_CAPACITY
    }
}

// 空 → None；否则须为正数
fn parse_positive(row: &NormalizedRow, name: &str, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    let raw = field(row, name).trim();
    if raw.is_empty() {
        return None;
    }

    match parse_number(raw) {
        None => {
            issues.push(FieldIssue::new(
                row,
                name,
                t(&format!("validation.{}_not_number", name)),
            ));
            None
        }
        Some(n) if n <= 0.0 => {
            issues.push(FieldIssue::new(
                row,
                name,
                t(&format!("validation.{}_not_positive", name)),
            ));
            None
        }
        Some(n) => Some(n),
    }
}

// 仅接受有限数值 (拒绝 "inf" / "NaN")
fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}
