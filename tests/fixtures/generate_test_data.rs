// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成 5 个导入样例 CSV 文件（工单 / 房间）
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use chrono::{Duration, Local};
use csv::{Writer, WriterBuilder};
use std::error::Error;
use std::fs::{self, File};

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

// 工单表头（导入模板列名）
const INTERVENTION_HEADER: &[&str] = &[
    "Titre*",
    "Description",
    "Statut*",
    "Type d'intervention",
    "Catégorie",
    "Priorité",
    "Localisation",
    "N° chambre",
    "Étage",
    "Bâtiment",
    "Technicien (Prénom Nom)",
    "Créateur (Prénom Nom)",
    "Date création (JJ/MM/AAAA)",
    "Date planifiée (JJ/MM/AAAA)",
    "Heure planifiée (HH:MM)",
    "Durée estimée (minutes)",
    "Notes internes",
    "Notes de résolution",
    "Date limite (JJ/MM/AAAA)",
    "Tags (séparés par virgules)",
    "Référence externe",
];

// 房间表头
const ROOM_HEADER: &[&str] = &[
    "Numéro",
    "Nom",
    "Bâtiment",
    "Étage",
    "Type chambre",
    "Capacité",
    "Prix",
    "Surface",
    "Description",
    "Équipements",
];

const STATUSES: &[&str] = &["Nouveau", "En attente", "Assigné", "En cours", "Terminé", "Validé"];
const TYPES: &[&str] = &["plomberie", "electricite", "climatisation", "menuiserie"];
const PRIORITIES: &[&str] = &["basse", "normal", "haute", "urgent"];
const TECHNICIANS: &[&str] = &["Michel Dupont", "Paul Martin", ""];

// 工单记录
#[derive(Clone)]
struct InterventionRecord {
    titre: String,
    description: String,
    statut: String,
    type_: String,
    categorie: String,
    priorite: String,
    localisation: String,
    numero_chambre: String,
    etage: String,
    batiment: String,
    technicien: String,
    createur: String,
    date_creation: String,
    date_planifiee: String,
    heure_planifiee: String,
    duree_estimee: String,
    notes_internes: String,
    notes_resolution: String,
    date_limite: String,
    tags: String,
    reference_externe: String,
}

impl InterventionRecord {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.titre.clone(),
            self.description.clone(),
            self.statut.clone(),
            self.type_.clone(),
            self.categorie.clone(),
            self.priorite.clone(),
            self.localisation.clone(),
            self.numero_chambre.clone(),
            self.etage.clone(),
            self.batiment.clone(),
            self.technicien.clone(),
            self.createur.clone(),
            self.date_creation.clone(),
            self.date_planifiee.clone(),
            self.heure_planifiee.clone(),
            self.duree_estimee.clone(),
            self.notes_internes.clone(),
            self.notes_resolution.clone(),
            self.date_limite.clone(),
            self.tags.clone(),
            self.reference_externe.clone(),
        ]
    }
}

// 生成正常工单记录
fn generate_normal_record(index: usize) -> InterventionRecord {
    let today = Local::now().date_naive();
    let created = today - Duration::days((index % 30) as i64);
    let scheduled = today + Duration::days((index % 14) as i64 + 1);
    let due = scheduled + Duration::days(7);
    let floor = 1 + (index % 5);

    InterventionRecord {
        titre: format!("Intervention {:04}", index + 1),
        description: format!("Contrôle de routine n°{}", index + 1),
        statut: STATUSES[index % STATUSES.len()].to_string(),
        type_: TYPES[index % TYPES.len()].to_string(),
        categorie: ["preventif", "curatif"][index % 2].to_string(),
        priorite: PRIORITIES[index % PRIORITIES.len()].to_string(),
        localisation: ["chambre", "hall", "cuisine"][index % 3].to_string(),
        numero_chambre: format!("{}{:02}", floor, (index % 20) + 1),
        etage: floor.to_string(),
        batiment: ["Bâtiment A", "Bâtiment B"][index % 2].to_string(),
        technicien: TECHNICIANS[index % TECHNICIANS.len()].to_string(),
        createur: ["Marie Durand", ""][index % 2].to_string(),
        date_creation: created.format("%d/%m/%Y").to_string(),
        date_planifiee: scheduled.format("%d/%m/%Y").to_string(),
        heure_planifiee: format!("{:02}:{:02}", 8 + (index % 10), (index % 4) * 15),
        duree_estimee: format!("{}", 30 + (index % 6) * 15),
        notes_internes: String::new(),
        notes_resolution: String::new(),
        date_limite: due.format("%d/%m/%Y").to_string(),
        tags: ["", "urgent", "eau, fuite"][index % 3].to_string(),
        reference_externe: format!("EXT-{:05}", index + 1),
    }
}

fn create_writer(file_name: &str) -> Result<Writer<File>, Box<dyn Error>> {
    let path = format!("{}/{}", OUTPUT_DIR, file_name);
    let file = File::create(path)?;
    Ok(WriterBuilder::new().delimiter(b';').from_writer(file))
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成导入样例数据...");
    fs::create_dir_all(OUTPUT_DIR)?;

    // 1. 正常工单 (50条)
    generate_valid_interventions()?;

    // 2. 必填缺失 / 超长字段
    generate_invalid_interventions()?;

    // 3. 未知参考值 / 未知状态
    generate_unknown_values()?;

    // 4. 房间数据（含数值错误）
    generate_rooms()?;

    // 5. 大数据集 (2000条, 超过默认 max_rows)
    generate_large_dataset()?;

    println!("✓ 所有样例数据生成完成！");
    Ok(())
}

fn generate_valid_interventions() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("01_interventions_valides.csv")?;
    wtr.write_record(INTERVENTION_HEADER)?;

    for i in 0..50 {
        wtr.write_record(&generate_normal_record(i).to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 01_interventions_valides.csv (50条)");
    Ok(())
}

fn generate_invalid_interventions() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("02_interventions_erreurs.csv")?;
    wtr.write_record(INTERVENTION_HEADER)?;

    // 正常记录
    for i in 0..5 {
        wtr.write_record(&generate_normal_record(i + 100).to_row())?;
    }

    // 标题缺失
    let mut record = generate_normal_record(200);
    record.titre = String::new();
    wtr.write_record(&record.to_row())?;

    // 状态缺失
    let mut record = generate_normal_record(201);
    record.statut = String::new();
    wtr.write_record(&record.to_row())?;

    // 标题超长 (201 字符)
    let mut record = generate_normal_record(202);
    record.titre = "T".repeat(201);
    wtr.write_record(&record.to_row())?;

    // 完全空行（默认被跳过）
    wtr.write_record(vec![""; INTERVENTION_HEADER.len()])?;

    wtr.flush()?;
    println!("✓ 生成 02_interventions_erreurs.csv (9条，包含3条错误与1条空行)");
    Ok(())
}

fn generate_unknown_values() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("03_valeurs_inconnues.csv")?;
    wtr.write_record(INTERVENTION_HEADER)?;

    let mut record = generate_normal_record(300);
    record.statut = "Bloqué".to_string();
    wtr.write_record(&record.to_row())?;

    let mut record = generate_normal_record(301);
    record.type_ = "peinture".to_string();
    record.batiment = "Bat A".to_string();
    wtr.write_record(&record.to_row())?;

    let mut record = generate_normal_record(302);
    record.technicien = "Michel Dupon".to_string();
    record.createur = "Jeanne Externe".to_string();
    wtr.write_record(&record.to_row())?;

    wtr.flush()?;
    println!("✓ 生成 03_valeurs_inconnues.csv (3条)");
    Ok(())
}

fn generate_rooms() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("04_chambres.csv")?;
    wtr.write_record(ROOM_HEADER)?;

    for i in 0..20 {
        let floor = 1 + i / 10;
        wtr.write_record(&[
            format!("{}{:02}", floor, (i % 10) + 1),
            format!("Chambre {}{:02}", floor, (i % 10) + 1),
            "Bâtiment A".to_string(),
            floor.to_string(),
            ["simple", "double", "suite"][i % 3].to_string(),
            format!("{}", 1 + i % 4),
            format!("{:.2}", 79.0 + (i % 5) as f64 * 20.0),
            format!("{}", 18 + i % 12),
            String::new(),
            ["wifi, tv", "wifi", ""][i % 3].to_string(),
        ])?;
    }

    // 数值错误: 容量为 0 / 容量为小数 / 价格为负
    for (numero, capacite, prix) in [("301", "0", "99"), ("302", "2.5", "99"), ("303", "2", "-10")] {
        wtr.write_record(&[numero, "Erreur", "", "3", "double", capacite, prix, "", "", ""])?;
    }

    wtr.flush()?;
    println!("✓ 生成 04_chambres.csv (23条，包含3条错误)");
    Ok(())
}

fn generate_large_dataset() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("05_grand_volume.csv")?;
    wtr.write_record(INTERVENTION_HEADER)?;

    for i in 0..2000 {
        wtr.write_record(&generate_normal_record(i + 10000).to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 05_grand_volume.csv (2000条)");
    Ok(())
}
