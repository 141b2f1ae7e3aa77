// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::document::Document;
use crate::domain::models::source_profile::SourceProfile;
use crate::engines::page::{element_attribute, element_text, find_within, PageDocument};
use crate::engines::traits::{EngineError, FetchRequest, PageFetcher, RenderedPage};
use crate::utils::date_parse::parse_publication_date;
use crate::utils::errors::ExtractionError;
use crate::utils::url_utils::resolve_href;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

static RESULT_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d[\d,.\s]*)").expect("result count pattern is valid"));

/// 列表页采集器
///
/// 访问一个出版物列表页，抽取有限数量的文档草稿（标题、链接、日期、可选摘要）。
/// 单个条目的抽取失败只丢弃该条目；页面抓取失败向上传播。
pub struct ListingHarvester<F: PageFetcher + ?Sized> {
    fetcher: Arc<F>,
    profile: Arc<SourceProfile>,
    settle: Duration,
}

impl<F: PageFetcher + ?Sized> ListingHarvester<F> {
    pub fn new(fetcher: Arc<F>, profile: Arc<SourceProfile>, settle: Duration) -> Self {
        Self {
            fetcher,
            profile,
            settle,
        }
    }

    /// 采集列表页
    ///
    /// `max_count` 按页生效，全局上限由采集闸门负责。
    #[instrument(skip(self, listing_url), fields(url = %listing_url))]
    pub async fn harvest(
        &self,
        listing_url: &Url,
        max_count: Option<usize>,
    ) -> Result<Vec<Document>, EngineError> {
        let request = FetchRequest::new(listing_url.as_str()).with_settle(self.settle);
        let page = self.fetcher.fetch(&request).await?;
        debug!(response_time_ms = page.response_time_ms, "Start collect publications");
        Ok(self.extract_stubs(&page, max_count))
    }

    /// 从已渲染的列表页抽取文档草稿
    pub fn extract_stubs(&self, page: &RenderedPage, max_count: Option<usize>) -> Vec<Document> {
        let document = page.document();

        if let Some(total) = self.result_count(&document) {
            debug!(total_results = total, "listing reports result count");
        }

        let items = document.find_all(&self.profile.item);
        debug!(items = items.len(), "listing items found");

        let mut stubs = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            if max_count.is_some_and(|max| index >= max) {
                debug!("Max count articles reached ({})", index);
                break;
            }

            match self.extract_stub(item, document.base_url()) {
                Ok(stub) => {
                    debug!(web_link = %stub.web_link, "find new article");
                    stubs.push(stub);
                }
                Err(e) => warn!(index, error = %e, "skipping listing item"),
            }
        }

        stubs
    }

    /// 结果总数提示
    ///
    /// 尽力而为：元素缺失或文本无法解析时返回 `None`，不影响后续逻辑。
    pub fn result_count(&self, document: &PageDocument) -> Option<u64> {
        let Some(element) = document.find_one(&self.profile.results_count) else {
            debug!(selector = %self.profile.results_count, "result count element not found");
            return None;
        };

        let text = element_text(element);
        let parsed = RESULT_COUNT.captures(&text).and_then(|captures| {
            captures[1]
                .chars()
                .filter(char::is_ascii_digit)
                .collect::<String>()
                .parse::<u64>()
                .ok()
        });

        if parsed.is_none() {
            warn!(text = %text, "could not parse result count");
        }
        parsed
    }

    fn extract_stub(&self, item: ElementRef<'_>, base_url: &Url) -> Result<Document, ExtractionError> {
        let href = element_attribute(item, "href")
            .ok_or_else(|| ExtractionError::MissingAttribute("href".to_string()))?;
        let web_link = resolve_href(base_url, href)?;

        let date_element = find_within(item, &self.profile.item_date)
            .ok_or_else(|| ExtractionError::MissingElement(self.profile.item_date.to_string()))?;
        let raw_date = element_attribute(date_element, "datetime")
            .map(str::to_string)
            .unwrap_or_else(|| element_text(date_element));
        let pub_date = parse_publication_date(&raw_date)?;

        let title = find_within(item, &self.profile.item_title)
            .map(element_text)
            .filter(|title| !title.is_empty())
            .ok_or_else(|| ExtractionError::MissingElement(self.profile.item_title.to_string()))?;

        let abstract_text = find_within(item, &self.profile.item_abstract)
            .map(element_text)
            .filter(|text| !text.is_empty());

        Ok(Document::stub(title, web_link.to_string(), abstract_text, pub_date))
    }
}
