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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; pubharvest/0.1; +https://github.com/Kirky-X/pubharvest)";

pub const CONSUMER_MARKETS_LISTING: &str =
    "https://www.pwc.com/gx/en/industries/consumer-markets/publications.html";
pub const TMT_LISTING: &str = "https://www.pwc.com/gx/en/industries/tmt/publications.html";

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 爬取配置
    #[serde(default)]
    pub crawl: CrawlSettings,
    /// 来源配置
    pub source: SourceSettings,
    /// 页面抓取器配置
    pub fetcher: FetcherSettings,
}

/// 爬取配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlSettings {
    /// 最大文档数，缺省时不限制
    pub max_count: Option<usize>,
    /// 上次爬取最后一篇文档的JSON文件
    pub last_document_path: Option<String>,
    /// 结果输出文件，缺省时写到标准输出
    pub output_path: Option<String>,
}

/// 来源配置设置
///
/// 站点相关的一切：列表页地址和各字段的选择器。
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub name: String,
    pub host: String,
    /// 按顺序访问的列表页
    pub listing_urls: Vec<String>,
    pub results_count_selector: String,
    pub item_selector: String,
    pub item_date_selector: String,
    pub item_title_selector: String,
    pub item_abstract_selector: String,
    pub content_selector: String,
    pub consent_button_selector: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            name: "pwc".to_string(),
            host: "https://www.pwc.com".to_string(),
            listing_urls: vec![CONSUMER_MARKETS_LISTING.to_string(), TMT_LISTING.to_string()],
            results_count_selector: ".results".to_string(),
            item_selector: ".collection__item-link".to_string(),
            item_date_selector: "time".to_string(),
            item_title_selector: "h4".to_string(),
            item_abstract_selector: ".paragraph".to_string(),
            content_selector: ".container".to_string(),
            consent_button_selector: "#onetrust-accept-btn-handler".to_string(),
        }
    }
}

/// 抓取器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// 无头浏览器
    #[default]
    Browser,
    /// 纯HTTP
    Http,
}

/// 页面抓取器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherSettings {
    pub engine: FetcherKind,
    /// 页面加载超时（秒）
    pub page_load_timeout_secs: u64,
    /// 等待同意按钮可点击的时间（秒）
    pub consent_timeout_secs: u64,
    /// 每次导航后的固定等待（毫秒）
    pub navigation_settle_ms: u64,
    /// 列表页额外等待（毫秒）
    pub listing_settle_ms: u64,
    /// 文章页额外等待（毫秒）
    pub detail_settle_ms: u64,
    /// 远程Chrome调试地址
    pub remote_debugging_url: Option<String>,
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: String,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            engine: FetcherKind::Browser,
            page_load_timeout_secs: 40,
            consent_timeout_secs: 5,
            navigation_settle_ms: 2000,
            listing_settle_ms: 6000,
            detail_settle_ms: 2000,
            remote_debugging_url: None,
            window_width: 1920,
            window_height: 1080,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加：内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// 以 `PUBHARVEST__` 为前缀的环境变量。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let source = SourceSettings::default();
        let fetcher = FetcherSettings::default();

        let builder = Config::builder()
            // Source defaults
            .set_default("source.name", source.name)?
            .set_default("source.host", source.host)?
            .set_default("source.listing_urls", source.listing_urls)?
            .set_default("source.results_count_selector", source.results_count_selector)?
            .set_default("source.item_selector", source.item_selector)?
            .set_default("source.item_date_selector", source.item_date_selector)?
            .set_default("source.item_title_selector", source.item_title_selector)?
            .set_default("source.item_abstract_selector", source.item_abstract_selector)?
            .set_default("source.content_selector", source.content_selector)?
            .set_default("source.consent_button_selector", source.consent_button_selector)?
            // Fetcher defaults
            .set_default("fetcher.engine", "browser")?
            .set_default("fetcher.page_load_timeout_secs", fetcher.page_load_timeout_secs)?
            .set_default("fetcher.consent_timeout_secs", fetcher.consent_timeout_secs)?
            .set_default("fetcher.navigation_settle_ms", fetcher.navigation_settle_ms)?
            .set_default("fetcher.listing_settle_ms", fetcher.listing_settle_ms)?
            .set_default("fetcher.detail_settle_ms", fetcher.detail_settle_ms)?
            .set_default("fetcher.window_width", u64::from(fetcher.window_width))?
            .set_default("fetcher.window_height", u64::from(fetcher.window_height))?
            .set_default("fetcher.user_agent", fetcher.user_agent)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("PUBHARVEST")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("source.listing_urls")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
