// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SourceSettings;
use crate::engines::page::CssSelector;
use crate::utils::errors::CrawlError;
use url::Url;

/// 来源描述
///
/// 一个站点的列表页地址和编译好的选择器。构造时校验全部配置，
/// 任何无效项都是致命错误。
#[derive(Debug, Clone)]
pub struct SourceProfile {
    pub name: String,
    pub host: String,
    pub listing_urls: Vec<Url>,
    /// 结果总数提示
    pub results_count: CssSelector,
    /// 列表条目（自身携带 href）
    pub item: CssSelector,
    pub item_date: CssSelector,
    pub item_title: CssSelector,
    pub item_abstract: CssSelector,
    /// 文章正文块
    pub content: CssSelector,
    /// 同意弹窗按钮，由浏览器抓取器使用
    pub consent_button: String,
}

impl SourceProfile {
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, CrawlError> {
        if settings.listing_urls.is_empty() {
            return Err(CrawlError::NoListingUrls);
        }

        let listing_urls = settings
            .listing_urls
            .iter()
            .map(|raw| {
                Url::parse(raw).map_err(|e| CrawlError::InvalidListingUrl {
                    url: raw.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: settings.name.clone(),
            host: settings.host.clone(),
            listing_urls,
            results_count: CssSelector::parse(&settings.results_count_selector)?,
            item: CssSelector::parse(&settings.item_selector)?,
            item_date: CssSelector::parse(&settings.item_date_selector)?,
            item_title: CssSelector::parse(&settings.item_title_selector)?,
            item_abstract: CssSelector::parse(&settings.item_abstract_selector)?,
            content: CssSelector::parse(&settings.content_selector)?,
            consent_button: settings.consent_button_selector.clone(),
        })
    }
}
