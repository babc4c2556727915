// ==========================================
// 酒店维护导入 - 领域模型层
// ==========================================
// 职责: 导入结果、参考快照、工单 / 房间记录
// 红线: 不含解析与匹配逻辑
// ==========================================

pub mod import;
pub mod intervention;
pub mod reference;
pub mod room;
pub mod types;

// 重导出核心类型
pub use import::{
    ImportError, ImportMatchSuggestions, ImportOptions, ImportResult, ImportStats, ImportWarning,
    MissingListValues, ReferenceMatchSuggestion, UserMatchSuggestion,
};
pub use intervention::{InterventionDraft, InterventionImportRow, Tag};
pub use reference::{ExistingLists, ReferenceItem, ReferenceMappings, UserInfo, UserMappings};
pub use room::{CreateRoomData, RoomImportRow};
pub use types::{MatchType, MissingCategory};
