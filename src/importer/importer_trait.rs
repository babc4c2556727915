// ==========================================
// 酒店维护导入 - 导入管道 Trait
// ==========================================
// 职责: 定义导入器与外部协作方接口（不包含实现）
// 协作方: 表格读取 / 持久化 / 报告保存
// ==========================================

use crate::domain::{
    ExistingLists, ImportOptions, ImportResult, InterventionImportRow, RoomImportRow,
};
use crate::importer::error::PipelineResult;
use crate::importer::file_parser::ImportFile;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::PathBuf;

/// 原始表格行: 表头 → 单元格文本（列顺序保留）
pub type RawRow = IndexMap<String, String>;

/// 规范化后的行: 规范字段名 → 单元格文本
pub type NormalizedRow = IndexMap<String, String>;

// ==========================================
// SpreadsheetImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: SpreadsheetImporterImpl
#[async_trait]
pub trait SpreadsheetImporter: Send + Sync {
    /// 导入维修工单表格
    ///
    /// # 导入流程
    /// 1. 文件读取与解析
    /// 2. 空行过滤
    /// 3. 起始行偏移与行数上限
    /// 4. 键规范化 + 行校验
    /// 5. 缺失值检测（提供 existing_lists 时）
    /// 6. 汇总结果
    ///
    /// 文件级失败不会返回 Err，而是体现在结果的 row 0 错误中
    async fn import_interventions(
        &self,
        file: &ImportFile,
        options: &ImportOptions,
        existing_lists: Option<&ExistingLists>,
    ) -> ImportResult<InterventionImportRow>;

    /// 导入房间表格（步骤 1-4，无缺失值检测）
    async fn import_rooms(
        &self,
        file: &ImportFile,
        options: &ImportOptions,
    ) -> ImportResult<RoomImportRow>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格读取协作方（仅读取第一个工作表）
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始行
    ///
    /// # 参数
    /// - file_name: 原始文件名（用于判断格式）
    /// - content: 文件字节
    ///
    /// # 返回
    /// - 每行一个 RawRow，空白单元格为 ""，表头已 trim
    fn parse_bytes(&self, file_name: &str, content: &[u8]) -> PipelineResult<Vec<RawRow>>;
}

// ==========================================
// RecordSink Trait
// ==========================================
// 用途: 持久化协作方（不透明的 create(record) -> id）
// 实现者: 调用方宿主
#[async_trait]
pub trait RecordSink<T: Sync>: Send + Sync {
    /// 写入一条记录，返回新记录 ID
    async fn create(&self, record: &T) -> anyhow::Result<String>;
}

// ==========================================
// ReportWriter Trait
// ==========================================
// 用途: 宿主的"保存文本文件"原语
// 实现者: FileSystemReportWriter
pub trait ReportWriter: Send + Sync {
    /// 保存报告文本，返回最终路径
    fn save(&self, content: &str, file_name: &str) -> PipelineResult<PathBuf>;
}
