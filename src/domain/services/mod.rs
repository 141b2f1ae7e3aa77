// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 列表页采集、文档补全、采集闸门和爬取编排
pub mod acquisition_gate;
pub mod crawl_orchestrator;
pub mod document_enricher;
pub mod listing_harvester;
