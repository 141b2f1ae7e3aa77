// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::document::Document;
use tracing::{debug, info};

/// 闸门配置
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
    /// 最大接受数量，缺省时不限制
    pub max_count: Option<usize>,
    /// 上次爬取的最后一篇文档（高水位标记）
    pub last_known: Option<Document>,
}

/// 一次提交的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// 已加入结果集
    Accepted,
    /// 遇到上次爬取的最后一篇文档，爬取已追上
    AlreadySeen,
    /// 结果集已满
    CapacityReached,
}

/// 采集状态
///
/// 已接受文档的累加器，由编排器显式传递。文档一旦进入就不能再修改。
#[derive(Debug, Default)]
pub struct AcquisitionState {
    accepted: Vec<Document>,
}

impl AcquisitionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted(&self) -> &[Document] {
        &self.accepted
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.accepted
    }
}

/// 采集闸门
///
/// 对每篇补全后的文档依次检查：
/// 1. 指纹与上次最后一篇文档相同 → `AlreadySeen`
/// 2. 已接受数量达到上限 → `CapacityReached`
/// 3. 否则接受
///
/// 重复检查排在容量检查之前，恢复点与容量上限重合时仍报告 `AlreadySeen`。
#[derive(Debug, Clone)]
pub struct AcquisitionGate {
    max_count: Option<usize>,
    last_known_fingerprint: Option<String>,
}

impl AcquisitionGate {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            max_count: config.max_count,
            last_known_fingerprint: config.last_known.as_ref().map(Document::fingerprint),
        }
    }

    pub fn max_count(&self) -> Option<usize> {
        self.max_count
    }

    pub fn acquire(&self, document: Document, state: &mut AcquisitionState) -> Acquisition {
        if let Some(ref marker) = self.last_known_fingerprint {
            if *marker == document.fingerprint() {
                info!(
                    web_link = %document.web_link,
                    fingerprint = %marker,
                    "Find already existing document"
                );
                return Acquisition::AlreadySeen;
            }
        }

        if let Some(max) = self.max_count {
            if state.accepted.len() >= max {
                debug!(max_count = max, "Max count articles reached");
                return Acquisition::CapacityReached;
            }
        }

        info!(
            title = %document.title,
            web_link = %document.web_link,
            pub_date = ?document.pub_date,
            "Find document"
        );
        state.accepted.push(document);
        Acquisition::Accepted
    }
}

#[cfg(test)]
#[path = "acquisition_gate_test.rs"]
mod tests;
