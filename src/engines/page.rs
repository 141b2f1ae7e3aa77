// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use url::Url;

/// 预编译的CSS选择器
#[derive(Clone)]
pub struct CssSelector {
    source: String,
    selector: Selector,
}

impl CssSelector {
    pub fn parse(source: &str) -> Result<Self, ExtractionError> {
        let selector = Selector::parse(source).map_err(|e| ExtractionError::InvalidSelector {
            selector: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for CssSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CssSelector").field(&self.source).finish()
    }
}

impl fmt::Display for CssSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// 已解析的页面文档
///
/// 只在同步代码中使用，不跨越 await 点持有。
pub struct PageDocument {
    html: Html,
    base_url: Url,
}

impl PageDocument {
    pub fn parse(content: &str, base_url: Url) -> Self {
        Self {
            html: Html::parse_document(content),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn find_one(&self, selector: &CssSelector) -> Option<ElementRef<'_>> {
        self.html.select(&selector.selector).next()
    }

    pub fn find_all(&self, selector: &CssSelector) -> Vec<ElementRef<'_>> {
        self.html.select(&selector.selector).collect()
    }
}

/// 在元素内部查找第一个匹配的子元素
///
/// 与浏览器行为一致，元素本身也参与匹配。
pub fn find_within<'a>(element: ElementRef<'a>, selector: &CssSelector) -> Option<ElementRef<'a>> {
    if selector.selector.matches(&element) {
        return Some(element);
    }
    element.select(&selector.selector).next()
}

/// 读取元素属性
pub fn element_attribute<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// 元素的单行文本，空白折叠为单个空格
pub fn element_text(element: ElementRef<'_>) -> String {
    visible_fragments(element).join(" ")
}

/// 元素的多行文本，每个文本片段一行
pub fn element_block_text(element: ElementRef<'_>) -> String {
    visible_fragments(element).join("\n")
}

fn visible_fragments(element: ElementRef<'_>) -> Vec<String> {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent().and_then(ElementRef::wrap)?;
            if matches!(parent.value().name(), "script" | "style" | "noscript" | "template") {
                return None;
            }
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!collapsed.is_empty()).then_some(collapsed)
        })
        .collect()
}
