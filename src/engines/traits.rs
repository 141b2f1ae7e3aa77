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

use crate::engines::page::PageDocument;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 浏览器操作失败
    #[error("Browser error: {0}")]
    Browser(String),
    /// 超时
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
    /// 非成功状态码
    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
    /// 抓取器未初始化或已关闭
    #[error("Fetcher not initialized: {0}")]
    NotInitialized(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 是否为致命错误
    ///
    /// 抓取器未初始化或已关闭时，后续任何页面都无法加载，爬取必须立即失败。
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::NotInitialized(_))
    }
}

impl From<chromiumoxide::error::CdpError> for EngineError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        EngineError::Browser(e.to_string())
    }
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// 目标URL
    pub url: String,
    /// 页面加载后的额外等待时间
    pub settle: Duration,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            settle: Duration::ZERO,
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

/// 渲染后的页面
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// 最终地址（跟随重定向之后）
    pub url: Url,
    /// 渲染后的HTML
    pub content: String,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

impl RenderedPage {
    /// 解析为可查询的文档
    pub fn document(&self) -> PageDocument {
        PageDocument::parse(&self.content, self.url.clone())
    }
}

/// 页面抓取器特质
///
/// 一个实现对应一个会话（例如一个浏览器实例），整个爬取过程中只获取一次，
/// 由调用方在爬取结束后通过 `close` 释放。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 加载页面，等待就绪并返回渲染后的内容
    async fn fetch(&self, request: &FetchRequest) -> Result<RenderedPage, EngineError>;

    /// 释放会话资源
    async fn close(&self) -> Result<(), EngineError> {
        Ok(())
    }

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
