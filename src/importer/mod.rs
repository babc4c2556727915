// ==========================================
// 酒店维护导入 - 导入层
// ==========================================
// 职责: 外部表格导入，生成工单 / 房间草稿
// 支持: Excel (.xlsx / .xls / .xlsm / .ods), CSV
// ==========================================

// 模块声明
pub mod batch_processor;
pub mod data_cleaner;
pub mod date_parser;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod matcher;
pub mod missing_values;
pub mod record_converter;
pub mod report;
pub mod schema_validator;
pub mod spreadsheet_importer;

// 重导出核心类型
pub use batch_processor::{
    BatchFailure, BatchOptions, BatchOutcome, BatchProcessor, BatchProgress, BatchStats,
    BatchSuccess,
};
pub use error::{PipelineError, PipelineResult};
pub use field_mapper::{normalize_key, normalize_object, INTERVENTION_KEY_MAPPING, ROOM_KEY_MAPPING};
pub use file_parser::{CsvParser, ExcelParser, ImportFile, UniversalFileParser};
pub use matcher::{exists_in_list, find_reference_matches, find_user_matches};
pub use missing_values::{detect_missing_values, MissingValueReport};
pub use record_converter::{convert_to_interventions, convert_to_rooms, ConversionContext};
pub use report::{download_error_report, generate_error_report, FileSystemReportWriter};
pub use spreadsheet_importer::SpreadsheetImporterImpl;

// 重导出 Trait 接口
pub use importer_trait::{FileParser, RecordSink, ReportWriter, SpreadsheetImporter};
