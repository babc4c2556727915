// ==========================================
// 酒店维护导入 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析（仅第一个工作表）
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls) / ODS / CSV (.csv/.txt)
// 约定: 表头 trim；缺失单元格为 ""；重复表头追加 _1, _2
// ==========================================

use crate::importer::error::{PipelineError, PipelineResult};
use crate::importer::importer_trait::{FileParser, RawRow};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

// ==========================================
// ImportFile - 待导入文件
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ImportFile {
    pub fn from_bytes(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// 异步读取磁盘文件
    pub async fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PipelineError::FileNotFound(path.display().to_string()),
            _ => PipelineError::FileReadError(e.to_string()),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { file_name, content })
    }

    /// 小写扩展名
    pub fn extension(&self) -> String {
        extension_of(&self.file_name)
    }
}

fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// 表头去 BOM + trim；空表头丢弃（None），重复表头追加序号
fn build_headers(raw: impl Iterator<Item = String>) -> Vec<Option<String>> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.map(|h| {
        let header = h.trim_start_matches('\u{feff}').trim().to_string();
        if header.is_empty() {
            return None;
        }
        let count = seen.entry(header.clone()).or_insert(0);
        let unique = if *count == 0 {
            header.clone()
        } else {
            format!("{}_{}", header, count)
        };
        *count += 1;
        Some(unique)
    })
    .collect()
}

// 按表头组装一行，缺失列补 ""
fn build_row(headers: &[Option<String>], cells: impl Iterator<Item = String>) -> RawRow {
    let mut row: RawRow = headers
        .iter()
        .flatten()
        .map(|h| (h.clone(), String::new()))
        .collect();
    for (header, value) in headers.iter().zip(cells) {
        if let Some(header) = header {
            row.insert(header.clone(), value);
        }
    }
    row
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    // 分号多于逗号时按分号分隔（法语区 Excel 导出）
    fn sniff_delimiter(content: &[u8]) -> u8 {
        let first_line = content.split(|b| *b == b'\n').next().unwrap_or(&[]);
        let semicolons = first_line.iter().filter(|b| **b == b';').count();
        let commas = first_line.iter().filter(|b| **b == b',').count();
        if semicolons > commas {
            b';'
        } else {
            b','
        }
    }
}

impl FileParser for CsvParser {
    fn parse_bytes(&self, file_name: &str, content: &[u8]) -> PipelineResult<Vec<RawRow>> {
        let ext = extension_of(file_name);
        if ext != "csv" && ext != "txt" {
            return Err(PipelineError::UnsupportedFormat(ext));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .delimiter(Self::sniff_delimiter(content))
            .from_reader(content);

        // 读取表头
        let headers = build_headers(reader.headers()?.iter().map(str::to_string));

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(build_row(
                &headers,
                record.iter().map(|v| v.trim().to_string()),
            ));
        }

        debug!(file = file_name, rows = records.len(), "CSV 解析完成");
        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格 → 文本
    ///
    /// 日期单元格格式化为 JJ/MM/AAAA（带时间时追加 HH:MM），
    /// 纯时间单元格格式化为 HH:MM
    pub fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty | Data::Error(_) => String::new(),
            Data::String(s) => s.trim().to_string(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => f.to_string(),
            Data::Bool(true) => "TRUE".to_string(),
            Data::Bool(false) => "FALSE".to_string(),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                match dt.as_datetime() {
                    Some(value) if serial < 1.0 => value.format("%H:%M").to_string(),
                    Some(value) if serial.fract() == 0.0 => value.format("%d/%m/%Y").to_string(),
                    Some(value) => value.format("%d/%m/%Y %H:%M").to_string(),
                    None => serial.to_string(),
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_bytes(&self, file_name: &str, content: &[u8]) -> PipelineResult<Vec<RawRow>> {
        let ext = extension_of(file_name);
        if !matches!(ext.as_str(), "xlsx" | "xlsm" | "xlsb" | "xls" | "ods") {
            return Err(PipelineError::UnsupportedFormat(ext));
        }

        // 打开工作簿
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(PipelineError::EmptyWorkbook)?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            debug!(file = file_name, sheet = %sheet_name, "工作表为空");
            return Ok(Vec::new());
        };
        let headers = build_headers(header_row.iter().map(Self::cell_to_string));

        // 读取数据行
        let records: Vec<RawRow> = rows
            .map(|data_row| build_row(&headers, data_row.iter().map(Self::cell_to_string)))
            .collect();

        debug!(file = file_name, sheet = %sheet_name, rows = records.len(), "Excel 解析完成");
        Ok(records)
    }
}

// ==========================================
// Universal Parser 实现（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_bytes(&self, file_name: &str, content: &[u8]) -> PipelineResult<Vec<RawRow>> {
        match extension_of(file_name).as_str() {
            "csv" | "txt" => CsvParser.parse_bytes(file_name, content),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => ExcelParser.parse_bytes(file_name, content),
            other => Err(PipelineError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_parse_basic() {
        let content = "Titre,Statut,Technicien\nFuite, En cours ,Michel Dupont\n,,\n";
        let rows = CsvParser.parse_bytes("data.csv", content.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Titre"], "Fuite");
        assert_eq!(rows[0]["Statut"], "En cours");
        assert!(rows[1].values().all(|v| v.is_empty()));
    }

    #[test]
    fn test_csv_semicolon_and_short_rows() {
        let content = "Titre;Statut;Priorité\nPanne clim;Nouveau\n";
        let rows = CsvParser.parse_bytes("export.CSV", content.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Statut"], "Nouveau");
        assert_eq!(rows[0]["Priorité"], "");
    }

    #[test]
    fn test_duplicate_and_empty_headers() {
        let content = "Titre,,Titre\nA,x,B\n";
        let rows = CsvParser.parse_bytes("dup.csv", content.as_bytes()).unwrap();
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["Titre", "Titre_1"]);
        assert_eq!(rows[0]["Titre_1"], "B");
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let content = "\u{feff}Titre,Statut\nA,B\n";
        let rows = CsvParser.parse_bytes("bom.csv", content.as_bytes()).unwrap();
        assert!(rows[0].contains_key("Titre"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = UniversalFileParser.parse_bytes("notes.pdf", b"%PDF").unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(ext) if ext == "pdf"));

        let err = CsvParser.parse_bytes("book.xlsx", b"").unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_corrupt_excel_is_parse_error() {
        let err = UniversalFileParser
            .parse_bytes("broken.xlsx", b"not a zip archive")
            .unwrap_err();
        assert!(matches!(err, PipelineError::ExcelParseError(_)));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(ExcelParser::cell_to_string(&Data::Empty), "");
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(101.0)), "101");
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(89.5)), "89.5");
        assert_eq!(ExcelParser::cell_to_string(&Data::Int(3)), "3");
        assert_eq!(
            ExcelParser::cell_to_string(&Data::String("  Suite ".to_string())),
            "Suite"
        );
    }

    #[tokio::test]
    async fn test_import_file_from_missing_path() {
        let err = ImportFile::from_path("/nonexistent/dir/file.xlsx").await.unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }
}
