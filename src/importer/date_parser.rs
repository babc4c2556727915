// ==========================================
// 酒店维护导入 - 日期 / 时间解析
// ==========================================
// 支持格式:
// - JJ/MM/AAAA (22/04/2025)
// - M/D/YY     (4/22/25)
// - MM/DD/YYYY (04/22/2025，仅当第二段 > 12)
// 歧义时（两段均 ≤ 12）按日在前处理
// ==========================================

use crate::importer::data_cleaner::parse_leading_int;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// 解析日期，无法识别或日历上不存在时返回 None
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let part1 = parse_leading_int(parts[0])?;
    let part2 = parse_leading_int(parts[1])?;
    let part3 = parse_leading_int(parts[2])?;

    let (day, month, year) = if parts[2].len() <= 2 {
        // M/D/YY
        let year = if part3 < 100 { 2000 + part3 } else { part3 };
        (part2, part1, year)
    } else if part1 > 12 {
        (part1, part2, part3)
    } else if part2 > 12 {
        (part2, part1, part3)
    } else {
        (part1, part2, part3)
    };

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year < 1900 {
        return None;
    }

    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// 解析日期 + 时间 (HH:MM)
///
/// 日期无效 → None；时间缺失或无效 → 当天 00:00
pub fn parse_date_time(date_value: &str, time_value: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date_value)?;
    let midnight = date.and_time(NaiveTime::MIN);

    let time = time_value.trim();
    if time.is_empty() {
        return Some(midnight);
    }

    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() != 2 {
        return Some(midnight);
    }

    let (Some(hours), Some(minutes)) = (parse_leading_int(parts[0]), parse_leading_int(parts[1]))
    else {
        return Some(midnight);
    };

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Some(midnight);
    }

    Some(
        NaiveTime::from_hms_opt(hours as u32, minutes as u32, 0)
            .map(|t| date.and_time(t))
            .unwrap_or(midnight),
    )
}

/// 解析为当天 00:00 的时间戳
pub fn parse_date_midnight(value: &str) -> Option<NaiveDateTime> {
    parse_date(value).map(|d| d.and_time(NaiveTime::MIN))
}
