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

use anyhow::Context;
use pubharvest::application::use_cases::collect_publications::{
    load_last_document, CollectPublicationsUseCase,
};
use pubharvest::config::settings::{FetcherKind, Settings};
use pubharvest::domain::models::source_profile::SourceProfile;
use pubharvest::domain::services::acquisition_gate::GateConfig;
use pubharvest::domain::services::crawl_orchestrator::CrawlTiming;
use pubharvest::engines::browser_engine::BrowserFetcher;
use pubharvest::engines::reqwest_engine::HttpFetcher;
use pubharvest::engines::traits::PageFetcher;
use pubharvest::utils::errors::CrawlError;
use pubharvest::utils::telemetry;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 主函数
///
/// 加载配置，获取一个页面抓取器，执行爬取，释放抓取器，输出JSON结果
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting pubharvest...");

    // 2. Load configuration
    let settings = Settings::new()?;
    let profile = SourceProfile::from_settings(&settings.source)?;
    info!("Configuration loaded");

    // 3. Last known document for incremental crawls
    let last_known = match settings.crawl.last_document_path.as_deref() {
        Some(path) => load_last_document(Path::new(path)).await?,
        None => None,
    };

    // 4. Acquire the page fetcher once for the whole crawl
    let fetcher: Arc<dyn PageFetcher> = match settings.fetcher.engine {
        FetcherKind::Browser => Arc::new(
            BrowserFetcher::launch(&settings.fetcher, &profile.consent_button)
                .await
                .map_err(|e| CrawlError::FetcherUnavailable(e.to_string()))?,
        ),
        FetcherKind::Http => Arc::new(
            HttpFetcher::new(&settings.fetcher)
                .map_err(|e| CrawlError::FetcherUnavailable(e.to_string()))?,
        ),
    };
    let timing = CrawlTiming::from_settings(&settings.fetcher);
    info!(fetcher = fetcher.name(), "Page fetcher ready");

    // 5. Crawl
    let use_case = CollectPublicationsUseCase::new(fetcher.clone(), profile, timing);
    let outcome = use_case
        .execute(&GateConfig {
            max_count: settings.crawl.max_count,
            last_known,
        })
        .await;

    // 6. Release the fetcher before writing results, even when the crawl failed
    if let Err(e) = fetcher.close().await {
        warn!(error = %e, "failed to release page fetcher");
    }
    let outcome = outcome?;

    info!(
        documents = outcome.documents.len(),
        termination = ?outcome.termination,
        "Crawl finished"
    );

    let json = serde_json::to_string_pretty(&outcome.documents)?;
    match settings.crawl.output_path.as_deref() {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write {}", path))?;
            info!("Documents written to {}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
