// ==========================================
// 酒店维护导入 - 核心库
// ==========================================
// 职责: 表格文件（Excel / CSV）→ 工单 / 房间记录
// 流程: 解析 → 表头归一 → 校验 → 参考比对 → 转换 → 批量写入
// 技术栈: Rust + calamine + csv + tokio
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "fr");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 导入结果与记录类型
pub mod domain;

// 导入层 - 解析、校验、比对、转换
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MatchType, MissingCategory};

// 领域实体
pub use domain::{
    CreateRoomData, ExistingLists, ImportError, ImportOptions, ImportResult, ImportWarning,
    InterventionDraft, InterventionImportRow, ReferenceMappings, RoomImportRow, UserInfo,
};

// 导入器
pub use importer::{
    convert_to_interventions, convert_to_rooms, download_error_report, generate_error_report,
    BatchOptions, BatchProcessor, ConversionContext, ImportFile, PipelineError, PipelineResult,
    SpreadsheetImporter, SpreadsheetImporterImpl,
};

// 配置
pub use config::{ConfigManager, ImportConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Import de maintenance hôtelière";
