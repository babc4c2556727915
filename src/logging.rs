// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别与输出格式
// ==========================================

use crate::config::ImportConfigReader;
use tracing_subscriber::{fmt, EnvFilter};

// 默认过滤器（RUST_LOG 未设置时）
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化日志系统（人类可读格式）
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=hotel_maintenance_import=trace
///
/// # 示例
/// ```no_run
/// use hotel_maintenance_import::logging;
/// logging::init();
/// ```
pub fn init() {
    let _ = fmt()
        .with_env_filter(default_filter())
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .try_init();
}

/// 初始化日志系统（JSON 行格式，便于日志采集）
pub fn init_json() {
    let _ = fmt()
        .json()
        .with_env_filter(default_filter())
        .with_target(true)
        .with_current_span(true)
        .try_init();
}

/// 按配置选择日志格式（log_format = "json" 时输出 JSON）
pub fn init_from_config(config: &impl ImportConfigReader) {
    if config.get_log_format().eq_ignore_ascii_case("json") {
        init_json();
    } else {
        init();
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
