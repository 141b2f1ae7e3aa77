// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::ExtractionError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// 支持的纯日期格式，按顺序尝试
///
/// 斜杠形式按日在前解析：`01/02/2024` 是 2024 年 2 月 1 日，不是 1 月 2 日。
/// 来源站点的全球版页面使用日/月/年顺序，因此不采用美式的月在前读法。
/// 两位年份优先于四位年份尝试。
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d.%m.%Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// 解析发布日期
///
/// 依次尝试 RFC 3339、无时区的日期时间和常见的纯日期格式。
/// 纯日期返回当天的 UTC 零点。
pub fn parse_publication_date(raw: &str) -> Result<DateTime<Utc>, ExtractionError> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let candidate = normalized.trim_end_matches('.');

    if candidate.is_empty() {
        return Err(ExtractionError::InvalidDate(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(candidate) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(candidate, format) {
            return Ok(dt.and_utc());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ExtractionError::InvalidDate(raw.to_string()))
}
