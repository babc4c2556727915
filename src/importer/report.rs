// ==========================================
// 酒店维护导入 - 错误报告
// ==========================================
// 报告格式:
//   RAPPORT D'ERREURS D'IMPORT
//   ==================================================
//   (空行)
//   Ligne N:
//     - Champ "field": message
//       Valeur reçue: "value"
//   (空行)
// 行分组保持首次出现顺序
// ==========================================

use crate::domain::ImportError;
use crate::i18n::t;
use crate::importer::error::{PipelineError, PipelineResult};
use crate::importer::importer_trait::ReportWriter;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// 默认报告文件名
pub const DEFAULT_REPORT_FILE_NAME: &str = "erreurs-import.txt";

const SEPARATOR_WIDTH: usize = 50;

/// 生成可读的错误报告
pub fn generate_error_report(errors: &[ImportError]) -> String {
    if errors.is_empty() {
        return t("report.no_errors");
    }

    let mut lines = vec![t("report.title"), "=".repeat(SEPARATOR_WIDTH), String::new()];

    let mut by_row: IndexMap<usize, Vec<&ImportError>> = IndexMap::new();
    for error in errors {
        by_row.entry(error.row).or_default().push(error);
    }

    let row_label = t("report.row");
    let field_label = t("report.field");
    let value_label = t("report.value");

    for (row, row_errors) in by_row {
        lines.push(format!("{} {}:", row_label, row));
        for error in row_errors {
            match &error.field {
                Some(field) => {
                    lines.push(format!("  - {} \"{}\": {}", field_label, field, error.message));
                    if let Some(value) = &error.value {
                        lines.push(format!("    {}: \"{}\"", value_label, value));
                    }
                }
                None => lines.push(format!("  - {}", error.message)),
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// 生成报告并交给宿主保存
///
/// `file_name` 为空时使用 [`DEFAULT_REPORT_FILE_NAME`]
pub fn download_error_report(
    errors: &[ImportError],
    file_name: Option<&str>,
    writer: &dyn ReportWriter,
) -> PipelineResult<PathBuf> {
    let report = generate_error_report(errors);
    let file_name = file_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_REPORT_FILE_NAME);
    writer.save(&report, file_name)
}

// ==========================================
// FileSystemReportWriter - 保存到目录
// ==========================================
pub struct FileSystemReportWriter {
    dir: PathBuf,
}

impl FileSystemReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 用户下载目录，不可用时退回当前目录
    pub fn downloads() -> Self {
        let dir = dirs::download_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportWriter for FileSystemReportWriter {
    fn save(&self, content: &str, file_name: &str) -> PipelineResult<PathBuf> {
        // 仅取文件名部分，避免写出目标目录
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| PipelineError::ReportWriteError(file_name.to_string()))?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| PipelineError::ReportWriteError(e.to_string()))?;
        let path = self.dir.join(name);
        std::fs::write(&path, content).map_err(|e| PipelineError::ReportWriteError(e.to_string()))?;

        info!(path = %path.display(), bytes = content.len(), "错误报告已保存");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_error(row: usize, field: &str, message: &str, value: Option<&str>) -> ImportError {
        ImportError::field_error(row, field, message, value.map(str::to_string))
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(generate_error_report(&[]), "Aucune erreur");
    }

    #[test]
    fn test_report_groups_rows_in_first_seen_order() {
        let errors = vec![
            field_error(8, "titre", "Le titre est requis", None),
            field_error(5, "statut", "Le statut est requis", Some("")),
            field_error(8, "batiment", "trop long", Some("XXXX")),
        ];
        let report = generate_error_report(&errors);

        let expected = [
            "RAPPORT D'ERREURS D'IMPORT",
            &"=".repeat(50),
            "",
            "Ligne 8:",
            "  - Champ \"titre\": Le titre est requis",
            "  - Champ \"batiment\": trop long",
            "    Valeur reçue: \"XXXX\"",
            "",
            "Ligne 5:",
            "  - Champ \"statut\": Le statut est requis",
            "    Valeur reçue: \"\"",
            "",
        ]
        .join("\n");
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_without_field() {
        let report = generate_error_report(&[ImportError::file_level("Fichier illisible")]);
        assert!(report.contains("Ligne 0:\n  - Fichier illisible"));
    }

    #[test]
    fn test_download_error_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileSystemReportWriter::new(dir.path());
        let errors = vec![field_error(2, "titre", "Le titre est requis", None)];

        let path = download_error_report(&errors, None, &writer).unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_REPORT_FILE_NAME);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("RAPPORT D'ERREURS D'IMPORT"));

        let custom = download_error_report(&errors, Some("../rapport.txt"), &writer).unwrap();
        assert_eq!(custom, dir.path().join("rapport.txt"));
    }
}
