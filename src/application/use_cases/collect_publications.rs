// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::Settings;
use crate::domain::models::document::Document;
use crate::domain::models::source_profile::SourceProfile;
use crate::domain::services::acquisition_gate::GateConfig;
use crate::domain::services::crawl_orchestrator::{CrawlOrchestrator, CrawlOutcome, CrawlTiming};
use crate::engines::traits::PageFetcher;
use crate::utils::errors::CrawlError;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 采集出版物用例
///
/// 平台调用的入口：对一个来源执行一次完整（或增量）的爬取。
pub struct CollectPublicationsUseCase<F: PageFetcher + ?Sized> {
    profile: Arc<SourceProfile>,
    orchestrator: CrawlOrchestrator<F>,
}

impl<F: PageFetcher + ?Sized> CollectPublicationsUseCase<F> {
    pub fn new(fetcher: Arc<F>, profile: SourceProfile, timing: CrawlTiming) -> Self {
        let profile = Arc::new(profile);
        Self {
            orchestrator: CrawlOrchestrator::new(fetcher, profile.clone(), timing),
            profile,
        }
    }

    /// 执行爬取
    ///
    /// 返回的结果总是带着已接受的文档，即使爬取因终止信号提前结束。
    /// 抓取器不可用时返回 `CrawlError::FetcherUnavailable`。
    pub async fn execute(&self, gate_config: &GateConfig) -> Result<CrawlOutcome, CrawlError> {
        info!("Set source: {}", self.profile.name);
        debug!("Parser enter to {}", self.profile.host);
        self.orchestrator
            .run(&self.profile.listing_urls, gate_config)
            .await
    }
}

/// 采集已配置来源的出版物
///
/// 来源和等待时间取自 `Settings::new()`（`config/` 文件和 `PUBHARVEST__` 环境变量）。
///
/// * `fetcher` - 整个爬取共享的页面抓取器，由调用方负责释放
/// * `max_count` - 最大文档数，`None` 表示不限制
/// * `last_known` - 上次爬取的最后一篇文档，用于增量爬取
pub async fn collect(
    fetcher: Arc<dyn PageFetcher>,
    max_count: Option<usize>,
    last_known: Option<Document>,
) -> Result<Vec<Document>, CrawlError> {
    let settings = Settings::new()?;
    collect_with_settings(fetcher, &settings, max_count, last_known).await
}

/// 按给定配置采集出版物
pub async fn collect_with_settings(
    fetcher: Arc<dyn PageFetcher>,
    settings: &Settings,
    max_count: Option<usize>,
    last_known: Option<Document>,
) -> Result<Vec<Document>, CrawlError> {
    let profile = SourceProfile::from_settings(&settings.source)?;
    let timing = CrawlTiming::from_settings(&settings.fetcher);
    let use_case = CollectPublicationsUseCase::new(fetcher, profile, timing);
    let outcome = use_case
        .execute(&GateConfig {
            max_count,
            last_known,
        })
        .await?;
    Ok(outcome.documents)
}

/// 读取上次爬取的最后一篇文档
///
/// 文件不存在表示没有高水位标记。
pub async fn load_last_document(path: &Path) -> Result<Option<Document>, CrawlError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no last document marker");
            return Ok(None);
        }
        Err(e) => {
            return Err(CrawlError::LastDocument(format!("{}: {}", path.display(), e)));
        }
    };

    let document: Document = serde_json::from_str(&raw)
        .map_err(|e| CrawlError::LastDocument(format!("{}: {}", path.display(), e)))?;
    info!(web_link = %document.web_link, "loaded last document marker");
    Ok(Some(document))
}
