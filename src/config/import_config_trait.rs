// ==========================================
// 酒店维护导入 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入管道所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// 约定: 缺失或无法解析的值一律回退默认值
// ==========================================

use std::path::PathBuf;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入管道所需的配置读取接口
// 实现者: ConfigManager（JSON 文件 + 环境变量覆写）
pub trait ImportConfigReader: Send + Sync {
    // ===== 导入选项 =====

    /// 单次导入最大行数
    ///
    /// # 默认值
    /// - 1000（0 表示不限）
    fn get_max_rows(&self) -> usize;

    /// 起始行偏移（空行过滤之后）
    ///
    /// # 默认值
    /// - 0
    fn get_start_row(&self) -> usize;

    /// 是否跳过全空行
    ///
    /// # 默认值
    /// - true
    fn get_skip_empty_rows(&self) -> bool;

    // ===== 批量写入 =====

    /// 每批记录数（默认 10）
    fn get_batch_size(&self) -> usize;

    /// 单项最大尝试次数（默认 3）
    fn get_max_retries(&self) -> u32;

    /// 重试基础等待毫秒数（默认 1000，第 n 次失败等待 n 倍）
    fn get_retry_delay_ms(&self) -> u64;

    /// 批间等待毫秒数（默认 100）
    fn get_batch_delay_ms(&self) -> u64;

    // ===== 转换与报告 =====

    /// 导入标签颜色（默认 #3b82f6）
    fn get_tag_color(&self) -> String;

    /// 错误报告文件名（默认 erreurs-import.txt）
    fn get_report_file_name(&self) -> String;

    /// 错误报告目录（未配置时由调用方决定，通常为下载目录）
    fn get_report_dir(&self) -> Option<PathBuf>;

    // ===== 界面 =====

    /// 消息语言（默认 fr）
    fn get_locale(&self) -> String;

    /// 日志格式: "pretty" 或 "json"（默认 pretty）
    fn get_log_format(&self) -> String;
}
