// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{FetcherKind, FetcherSettings};
use crate::domain::models::document::Document;
use crate::domain::models::source_profile::SourceProfile;
use crate::domain::services::acquisition_gate::{
    Acquisition, AcquisitionGate, AcquisitionState, GateConfig,
};
use crate::domain::services::document_enricher::DocumentEnricher;
use crate::domain::services::listing_harvester::ListingHarvester;
use crate::engines::traits::PageFetcher;
use crate::utils::errors::CrawlError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

/// 页面等待时间
#[derive(Debug, Clone, Copy)]
pub struct CrawlTiming {
    /// 列表页加载后的额外等待
    pub listing_settle: Duration,
    /// 文章页加载后的额外等待
    pub detail_settle: Duration,
}

impl Default for CrawlTiming {
    fn default() -> Self {
        Self::from_settings(&FetcherSettings::default())
    }
}

impl CrawlTiming {
    /// HTTP抓取器不渲染页面，不需要等待
    pub fn from_settings(settings: &FetcherSettings) -> Self {
        if settings.engine == FetcherKind::Http {
            return Self::immediate();
        }
        Self {
            listing_settle: Duration::from_millis(settings.listing_settle_ms),
            detail_settle: Duration::from_millis(settings.detail_settle_ms),
        }
    }

    /// 不等待，用于不需要渲染的抓取器
    pub fn immediate() -> Self {
        Self {
            listing_settle: Duration::ZERO,
            detail_settle: Duration::ZERO,
        }
    }
}

/// 爬取的结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlTermination {
    /// 所有列表页都处理完，没有终止信号
    Exhausted,
    /// 追上了上次爬取的最后一篇文档
    AlreadySeen,
    /// 达到最大文档数
    CapacityReached,
}

/// 爬取结果
///
/// 无论以何种方式结束，都带着已接受的文档。
#[derive(Debug)]
pub struct CrawlOutcome {
    /// 按发现顺序排列的已接受文档
    pub documents: Vec<Document>,
    pub termination: CrawlTermination,
    /// 抓取失败而被跳过的列表页
    pub failed_listings: Vec<Url>,
}

/// 爬取编排器
///
/// 按固定顺序处理列表页：采集草稿，逐篇补全，交给采集闸门。
/// 单线程顺序执行，同一时间只有一篇文档在处理中。
pub struct CrawlOrchestrator<F: PageFetcher + ?Sized> {
    harvester: ListingHarvester<F>,
    enricher: DocumentEnricher<F>,
}

impl<F: PageFetcher + ?Sized> CrawlOrchestrator<F> {
    pub fn new(fetcher: Arc<F>, profile: Arc<SourceProfile>, timing: CrawlTiming) -> Self {
        Self {
            harvester: ListingHarvester::new(
                fetcher.clone(),
                profile.clone(),
                timing.listing_settle,
            ),
            enricher: DocumentEnricher::new(fetcher, profile, timing.detail_settle),
        }
    }

    /// 执行爬取
    ///
    /// 终止信号立即结束爬取，不再访问后续条目和列表页。
    /// 列表页抓取失败只跳过该页；抓取器不可用时立即返回错误。
    #[instrument(skip_all, fields(listings = listing_urls.len(), max_count = ?gate_config.max_count))]
    pub async fn run(
        &self,
        listing_urls: &[Url],
        gate_config: &GateConfig,
    ) -> Result<CrawlOutcome, CrawlError> {
        let gate = AcquisitionGate::new(gate_config);
        let mut state = AcquisitionState::new();
        let mut failed_listings = Vec::new();

        debug!("Parse process start");

        for listing_url in listing_urls {
            let stubs = match self.harvester.harvest(listing_url, gate.max_count()).await {
                Ok(stubs) => stubs,
                Err(e) if e.is_fatal() => {
                    error!(url = %listing_url, error = %e, "page fetcher unavailable");
                    return Err(CrawlError::FetcherUnavailable(e.to_string()));
                }
                Err(e) => {
                    error!(url = %listing_url, error = %e, "failed to load listing page");
                    failed_listings.push(listing_url.clone());
                    continue;
                }
            };

            for stub in stubs {
                let document = self.enricher.enrich(stub).await.map_err(|e| {
                    error!(error = %e, "page fetcher unavailable");
                    CrawlError::FetcherUnavailable(e.to_string())
                })?;
                match gate.acquire(document, &mut state) {
                    Acquisition::Accepted => {}
                    Acquisition::AlreadySeen => {
                        return Ok(Self::finish(
                            state,
                            CrawlTermination::AlreadySeen,
                            failed_listings,
                        ));
                    }
                    Acquisition::CapacityReached => {
                        return Ok(Self::finish(
                            state,
                            CrawlTermination::CapacityReached,
                            failed_listings,
                        ));
                    }
                }
            }
        }

        Ok(Self::finish(state, CrawlTermination::Exhausted, failed_listings))
    }

    fn finish(
        state: AcquisitionState,
        termination: CrawlTermination,
        failed_listings: Vec<Url>,
    ) -> CrawlOutcome {
        info!(
            accepted = state.len(),
            termination = ?termination,
            failed_listings = failed_listings.len(),
            "Parse process finished"
        );
        CrawlOutcome {
            documents: state.into_documents(),
            termination,
            failed_listings,
        }
    }
}
