// ==========================================
// 酒店维护导入 - 导入管道错误类型
// ==========================================
// 工具: thiserror 派生宏
// 边界: PipelineError 仅在管道内部流转，
//       导入器出口统一转换为 row 0 的 ImportError
// ==========================================

use crate::i18n::t_with_args;
use thiserror::Error;

// 带单个占位符的本地化消息
fn localized(key: &str, name: &str, value: &str) -> String {
    t_with_args(key, &[(name, value)])
}

/// 导入管道错误类型
#[derive(Error, Debug)]
pub enum PipelineError {
    // ===== 文件相关错误 =====
    #[error("{}", localized("errors.file_not_found", "path", .0))]
    FileNotFound(String),

    #[error("{}", localized("errors.unsupported_format", "ext", .0))]
    UnsupportedFormat(String),

    #[error("{}", localized("errors.file_read", "detail", .0))]
    FileReadError(String),

    #[error("{}", localized("errors.excel_parse", "detail", .0))]
    ExcelParseError(String),

    #[error("{}", localized("errors.csv_parse", "detail", .0))]
    CsvParseError(String),

    #[error("{}", crate::i18n::t("errors.empty_workbook"))]
    EmptyWorkbook,

    // ===== 报告输出错误 =====
    #[error("{}", localized("errors.report_write", "detail", .0))]
    ReportWriteError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => PipelineError::FileNotFound(err.to_string()),
            _ => PipelineError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for PipelineError {
    fn from(err: calamine::Error) -> Self {
        PipelineError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::ConfigReadError {
            key: "<json>".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
