// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持法语（默认）和英语
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use std::sync::Once;

/// 默认语言（面向用户的导入消息为法语）
pub const DEFAULT_LOCALE: &str = "fr";

static DEFAULT_LOCALE_INIT: Once = Once::new();

// 首次访问时把全局语言设为默认语言
fn ensure_default_locale() {
    DEFAULT_LOCALE_INIT.call_once(|| rust_i18n::set_locale(DEFAULT_LOCALE));
}

/// 获取当前语言
pub fn current_locale() -> String {
    ensure_default_locale();
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"fr" 或 "en"）
pub fn set_locale(locale: &str) {
    ensure_default_locale();
    rust_i18n::set_locale(locale);
}

/// 可用语言列表
pub fn available_locales() -> Vec<String> {
    rust_i18n::available_locales!()
        .into_iter()
        .map(|l| l.to_string())
        .collect()
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use hotel_maintenance_import::i18n::t;
/// let msg = t("report.no_errors");
/// ```
pub fn t(key: &str) -> String {
    ensure_default_locale();
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数，占位符格式 %{name}）
///
/// # 示例
/// ```no_run
/// use hotel_maintenance_import::i18n::t_with_args;
/// let msg = t_with_args("errors.file_not_found", &[("path", "/tmp/test.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_placeholders(t(key), args)
}

fn fill_placeholders(template: String, args: &[(&str, &str)]) -> String {
    let mut result = template;
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
