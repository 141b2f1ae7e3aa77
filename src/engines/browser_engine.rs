// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::FetcherSettings;
use crate::engines::traits::{EngineError, FetchRequest, PageFetcher, RenderedPage};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

const CONSENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    remote: bool,
}

/// 浏览器抓取器
///
/// 基于chromiumoxide。构造时启动（或连接）一个浏览器并打开一个标签页，
/// 之后所有页面都在这个标签页中加载，直到 `close` 被调用。
pub struct BrowserFetcher {
    session: Mutex<Option<BrowserSession>>,
    page: Page,
    page_load_timeout: Duration,
    consent_timeout: Duration,
    navigation_settle: Duration,
    consent_selector: String,
}

impl BrowserFetcher {
    /// 启动浏览器会话
    ///
    /// 配置了 `remote_debugging_url` 时连接已有的 Chrome，否则启动无头浏览器。
    pub async fn launch(
        settings: &FetcherSettings,
        consent_selector: &str,
    ) -> Result<Self, EngineError> {
        let page_load_timeout = Duration::from_secs(settings.page_load_timeout_secs);

        let (browser, mut handler) = if let Some(ref url) = settings.remote_debugging_url {
            info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url.as_str()).await?
        } else {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(page_load_timeout)
                .window_size(settings.window_width, settings.window_height)
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(EngineError::Browser)?;
            Browser::launch(config).await?
        };

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        page.set_user_agent(settings.user_agent.as_str()).await?;

        debug!("Browser session ready");

        Ok(Self {
            session: Mutex::new(Some(BrowserSession {
                browser,
                handler_task,
                remote: settings.remote_debugging_url.is_some(),
            })),
            page,
            page_load_timeout,
            consent_timeout: Duration::from_secs(settings.consent_timeout_secs),
            navigation_settle: Duration::from_millis(settings.navigation_settle_ms),
            consent_selector: consent_selector.to_string(),
        })
    }

    /// 关闭同意弹窗
    ///
    /// 按钮不存在是正常情况；按钮存在但在等待时间内始终不可点击时放弃。
    async fn dismiss_consent(&self, url: &str) {
        let button = match self.page.find_element(self.consent_selector.as_str()).await {
            Ok(button) => button,
            Err(_) => {
                debug!(url, "modal agree not found");
                return;
            }
        };

        let deadline = Instant::now() + self.consent_timeout;
        loop {
            match button.click().await {
                Ok(_) => {
                    debug!(url, "Parser pass cookie modal");
                    return;
                }
                Err(e) if Instant::now() >= deadline => {
                    warn!(url, error = %e, "consent button never became clickable");
                    return;
                }
                Err(_) => tokio::time::sleep(CONSENT_POLL_INTERVAL).await,
            }
        }
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<RenderedPage, EngineError> {
        if self.session.lock().await.is_none() {
            return Err(EngineError::NotInitialized(
                "browser session already closed".to_string(),
            ));
        }

        let start = Instant::now();

        tokio::time::timeout(self.page_load_timeout, self.page.goto(request.url.as_str()))
            .await
            .map_err(|_| EngineError::Timeout(self.page_load_timeout))??;
        debug!(url = %request.url, "Entered on web page");

        tokio::time::sleep(self.navigation_settle).await;
        self.dismiss_consent(&request.url).await;
        tokio::time::sleep(request.settle).await;

        let current = self.page.url().await?.unwrap_or_else(|| request.url.clone());
        let url = Url::parse(&current).map_err(|e| EngineError::Other(format!("{}: {}", current, e)))?;
        let content = self.page.content().await?;

        Ok(RenderedPage {
            url,
            content,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn close(&self) -> Result<(), EngineError> {
        let Some(mut session) = self.session.lock().await.take() else {
            return Ok(());
        };

        if let Err(e) = self.page.clone().close().await {
            debug!(error = %e, "failed to close tab");
        }

        // A remote Chrome belongs to someone else, only the connection is dropped
        if !session.remote {
            session.browser.close().await?;
            session
                .browser
                .wait()
                .await
                .map_err(|e| EngineError::Browser(e.to_string()))?;
        }
        session.handler_task.abort();
        info!("Browser session closed");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}
