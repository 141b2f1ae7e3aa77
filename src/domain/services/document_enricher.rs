// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::document::Document;
use crate::domain::models::source_profile::SourceProfile;
use crate::engines::page::element_block_text;
use crate::engines::traits::{EngineError, FetchRequest, PageFetcher, RenderedPage};
use crate::utils::errors::{EnrichmentError, ExtractionError};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// 文档补全器
///
/// 打开文档的网页地址，写入正文块的文本和加载时间。
pub struct DocumentEnricher<F: PageFetcher + ?Sized> {
    fetcher: Arc<F>,
    profile: Arc<SourceProfile>,
    settle: Duration,
}

impl<F: PageFetcher + ?Sized> DocumentEnricher<F> {
    pub fn new(fetcher: Arc<F>, profile: Arc<SourceProfile>, settle: Duration) -> Self {
        Self {
            fetcher,
            profile,
            settle,
        }
    }

    /// 补全文档
    ///
    /// 失败只记录日志，文档原样返回（没有正文和加载时间）。
    /// 只有抓取器本身不可用时返回错误。
    #[instrument(skip(self, document), fields(web_link = %document.web_link))]
    pub async fn enrich(&self, mut document: Document) -> Result<Document, EngineError> {
        debug!("Start parse publications");
        match self.fetch_text(&document.web_link).await {
            Ok(text) => {
                document.text = Some(text);
                document.load_date = Some(Utc::now());
            }
            Err(EnrichmentError::Fetch(e)) if e.is_fatal() => return Err(e),
            Err(e) => error!(error = %e, "failed to enrich document"),
        }
        Ok(document)
    }

    async fn fetch_text(&self, web_link: &str) -> Result<String, EnrichmentError> {
        let request = FetchRequest::new(web_link).with_settle(self.settle);
        let page = self.fetcher.fetch(&request).await?;
        debug!(response_time_ms = page.response_time_ms, "article page loaded");
        Ok(self.extract_text(&page)?)
    }

    /// 抽取正文块文本
    pub fn extract_text(&self, page: &RenderedPage) -> Result<String, ExtractionError> {
        let document = page.document();
        document
            .find_one(&self.profile.content)
            .map(element_block_text)
            .ok_or_else(|| ExtractionError::MissingElement(self.profile.content.to_string()))
    }
}
