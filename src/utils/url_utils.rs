// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::ExtractionError;
use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 解析列表条目上的 href
///
/// 空链接、纯片段、`javascript:` 和 `mailto:` 链接都不是文章地址。
pub fn resolve_href(base_url: &Url, href: &str) -> Result<Url, ExtractionError> {
    let href = href.trim();
    let lowered = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
    {
        return Err(ExtractionError::InvalidLink(href.to_string()));
    }

    let resolved = resolve_url(base_url, href)
        .map_err(|e| ExtractionError::InvalidLink(format!("{}: {}", href, e)))?;

    match resolved.scheme() {
        "http" | "https" => Ok(resolved),
        other => Err(ExtractionError::InvalidLink(format!(
            "{}: unsupported scheme {}",
            href, other
        ))),
    }
}
