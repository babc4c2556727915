// ==========================================
// 酒店维护导入 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存 KV（来源: JSON 文件 → 环境变量 HOTEL_IMPORT_* 覆写）
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::domain::ImportOptions;
use crate::importer::error::{PipelineError, PipelineResult};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// 环境变量前缀（HOTEL_IMPORT_MAX_ROWS → max_rows）
pub const ENV_PREFIX: &str = "HOTEL_IMPORT_";

/// 指向 JSON 配置文件的环境变量
pub const CONFIG_PATH_ENV: &str = "HOTEL_IMPORT_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl ConfigManager {
    /// 创建空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 标准加载: HOTEL_IMPORT_CONFIG 指向的文件（若存在）+ 环境变量覆写
    pub fn load() -> PipelineResult<Self> {
        let manager = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim())?,
            _ => Self::new(),
        };
        manager.apply_overrides(std::env::vars());
        Ok(manager)
    }

    /// 从 JSON 文件加载（顶层对象，值可为字符串 / 数字 / 布尔）
    pub fn from_json_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::ConfigReadError {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str) -> PipelineResult<Self> {
        let parsed: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)?;
        let manager = Self::new();
        for (key, value) in parsed {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => continue,
                other => other.to_string(),
            };
            manager.set(&key, &text)?;
        }
        debug!(keys = manager.len(), "配置已加载");
        Ok(manager)
    }

    /// 应用环境变量覆写（仅处理带前缀的变量）
    pub fn apply_overrides<I>(&self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(suffix) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            if name == CONFIG_PATH_ENV {
                continue;
            }
            let key = suffix.to_lowercase();
            if let Err(e) = self.set(&key, &value) {
                warn!(key = %key, error = %e, "环境变量覆写失败");
            }
        }
    }

    /// 写入配置值
    pub fn set(&self, key: &str, value: &str) -> PipelineResult<()> {
        let mut values = self.values.write().map_err(|e| PipelineError::ConfigReadError {
            key: key.to_string(),
            message: format!("锁获取失败: {}", e),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在（或锁已中毒）
    pub fn get_config_value(&self, key: &str) -> Option<String> {
        self.values.read().ok().and_then(|v| v.get(key).cloned())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .unwrap_or_else(|| default.to_string())
    }

    // 解析失败时回退默认值
    fn parse_or_default<T: std::str::FromStr>(&self, key: &str, default: T) -> T {
        match self.get_config_value(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(key = %key, value = %raw, "配置值格式错误，使用默认值");
                default
            }),
            None => default,
        }
    }

    fn bool_or_default(&self, key: &str, default: bool) -> bool {
        match self.get_config_value(key).map(|v| v.trim().to_lowercase()) {
            Some(v) if matches!(v.as_str(), "true" | "1" | "yes" | "oui" | "on") => true,
            Some(v) if matches!(v.as_str(), "false" | "0" | "no" | "non" | "off") => false,
            Some(v) => {
                warn!(key = %key, value = %v, "布尔配置值无法识别，使用默认值");
                default
            }
            None => default,
        }
    }

    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取所有配置的快照（JSON，键有序）
    pub fn get_config_snapshot(&self) -> PipelineResult<String> {
        let values = self.values.read().map_err(|e| PipelineError::ConfigReadError {
            key: "<snapshot>".to_string(),
            message: format!("锁获取失败: {}", e),
        })?;
        let ordered: BTreeMap<&String, &String> = values.iter().collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    /// 从配置快照恢复（整体替换）
    pub fn restore_from_snapshot(&self, snapshot_json: &str) -> PipelineResult<usize> {
        let restored: HashMap<String, String> = serde_json::from_str(snapshot_json)?;
        let count = restored.len();
        let mut values = self.values.write().map_err(|e| PipelineError::ConfigReadError {
            key: "<snapshot>".to_string(),
            message: format!("锁获取失败: {}", e),
        })?;
        *values = restored;
        Ok(count)
    }

    /// 按配置生成导入选项
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions::from_config(self)
    }
}

impl ImportOptions {
    /// 从配置读取导入选项
    pub fn from_config(config: &impl ImportConfigReader) -> Self {
        Self {
            skip_empty_rows: config.get_skip_empty_rows(),
            max_rows: config.get_max_rows(),
            start_row: config.get_start_row(),
        }
    }
}

impl ImportConfigReader for ConfigManager {
    fn get_max_rows(&self) -> usize {
        self.parse_or_default(config_keys::MAX_ROWS, 1000)
    }

    fn get_start_row(&self) -> usize {
        self.parse_or_default(config_keys::START_ROW, 0)
    }

    fn get_skip_empty_rows(&self) -> bool {
        self.bool_or_default(config_keys::SKIP_EMPTY_ROWS, true)
    }

    fn get_batch_size(&self) -> usize {
        self.parse_or_default(config_keys::BATCH_SIZE, 10)
    }

    fn get_max_retries(&self) -> u32 {
        self.parse_or_default(config_keys::MAX_RETRIES, 3)
    }

    fn get_retry_delay_ms(&self) -> u64 {
        self.parse_or_default(config_keys::RETRY_DELAY_MS, 1000)
    }

    fn get_batch_delay_ms(&self) -> u64 {
        self.parse_or_default(config_keys::BATCH_DELAY_MS, 100)
    }

    fn get_tag_color(&self) -> String {
        self.get_config_or_default(config_keys::TAG_COLOR, "#3b82f6")
    }

    fn get_report_file_name(&self) -> String {
        self.get_config_or_default(config_keys::REPORT_FILE_NAME, "erreurs-import.txt")
    }

    fn get_report_dir(&self) -> Option<PathBuf> {
        self.get_config_value(config_keys::REPORT_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }

    fn get_locale(&self) -> String {
        self.get_config_or_default(config_keys::LOCALE, "fr")
    }

    fn get_log_format(&self) -> String {
        self.get_config_or_default(config_keys::LOG_FORMAT, "pretty")
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 导入选项
    pub const MAX_ROWS: &str = "max_rows";
    pub const START_ROW: &str = "start_row";
    pub const SKIP_EMPTY_ROWS: &str = "skip_empty_rows";

    // 批量写入
    pub const BATCH_SIZE: &str = "batch_size";
    pub const MAX_RETRIES: &str = "max_retries";
    pub const RETRY_DELAY_MS: &str = "retry_delay_ms";
    pub const BATCH_DELAY_MS: &str = "batch_delay_ms";

    // 转换与报告
    pub const TAG_COLOR: &str = "tag_color";
    pub const REPORT_FILE_NAME: &str = "report_file_name";
    pub const REPORT_DIR: &str = "report_dir";

    // 界面
    pub const LOCALE: &str = "locale";
    pub const LOG_FORMAT: &str = "log_format";
}
