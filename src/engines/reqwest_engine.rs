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

use crate::config::settings::FetcherSettings;
use crate::engines::traits::{EngineError, FetchRequest, PageFetcher, RenderedPage};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// HTTP抓取器
///
/// 基于reqwest，适用于服务端渲染的来源；不执行脚本，不处理同意弹窗，
/// 响应体到达即视为就绪，因此忽略 `settle`。
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// 创建HTTP抓取器
    ///
    /// 整个爬取过程共享一个客户端（以及其中的 cookie）。
    pub fn new(settings: &FetcherSettings) -> Result<Self, EngineError> {
        let timeout = Duration::from_secs(settings.page_load_timeout_secs);
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<RenderedPage, EngineError> {
        let start = Instant::now();
        let response = self.client.get(&request.url).send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout(self.timeout)
            } else {
                EngineError::RequestFailed(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        let final_url: Url = response.url().clone();
        let content = response.text().await?;
        debug!(url = %final_url, status = status.as_u16(), "Entered on web page");

        Ok(RenderedPage {
            url: final_url,
            content,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
