// ==========================================
// 酒店维护导入 - 配置层
// ==========================================
// 职责: 导入配置管理，支持文件 + 环境变量覆写
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::ImportConfigReader;
