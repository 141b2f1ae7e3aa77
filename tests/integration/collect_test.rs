// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{article, listing, FakeFetcher, ListingItem};
use pubharvest::application::use_cases::collect_publications::{collect, collect_with_settings};
use pubharvest::config::settings::{
    CrawlSettings, FetcherKind, FetcherSettings, Settings, SourceSettings,
    CONSUMER_MARKETS_LISTING, TMT_LISTING,
};
use pubharvest::engines::traits::PageFetcher;
use pubharvest::utils::errors::CrawlError;
use std::sync::Arc;

const VALLEY_FORGE: &str =
    "https://www.pwc.com/gx/en/ghost/valley-forge-fabrics-cloud-efficiency.html";
const RETAIL_OUTLOOK: &str = "https://www.pwc.com/gx/en/ghost/retail-outlook.html";
const NETWORK_PULSE: &str = "https://www.pwc.com/gx/en/ghost/network-pulse.html";

fn default_source() -> FakeFetcher {
    FakeFetcher::new()
        .with_page(
            CONSUMER_MARKETS_LISTING,
            listing(&[
                ListingItem {
                    abstract_text: Some("Cloud efficiency at scale."),
                    ..ListingItem::new(
                        "Valley Forge Fabrics",
                        "/gx/en/ghost/valley-forge-fabrics-cloud-efficiency.html",
                        "15 November 2023",
                    )
                },
                ListingItem::new(
                    "Retail outlook",
                    "/gx/en/ghost/retail-outlook.html",
                    "01 October 2023",
                ),
            ]),
        )
        .with_page(
            TMT_LISTING,
            listing(&[ListingItem::new(
                "Network pulse",
                "/gx/en/ghost/network-pulse.html",
                "20 September 2023",
            )]),
        )
        .with_page(VALLEY_FORGE, article("Valley Forge moved to the cloud."))
        .with_page(RETAIL_OUTLOOK, article("Retail is changing."))
        .with_page(NETWORK_PULSE, article("Networks are busy."))
}

#[tokio::test]
async fn test_collect_walks_default_listings_in_order() {
    let fetcher = Arc::new(default_source());

    let documents = collect(fetcher.clone(), None, None).await.unwrap();

    let links: Vec<_> = documents.iter().map(|d| d.web_link.as_str()).collect();
    assert_eq!(links, vec![VALLEY_FORGE, RETAIL_OUTLOOK, NETWORK_PULSE]);
    assert_eq!(
        documents[0].abstract_text.as_deref(),
        Some("Cloud efficiency at scale.")
    );
    assert_eq!(
        documents[0].text.as_deref(),
        Some("Valley Forge moved to the cloud.")
    );
    assert!(documents.iter().all(|d| d.is_enriched()));
}

#[tokio::test]
async fn test_collect_stops_at_last_known_document() {
    let fetcher = Arc::new(default_source());
    let everything = collect(fetcher.clone(), None, None).await.unwrap();
    let last_known = everything[1].clone();

    let fresh = Arc::new(default_source());
    let documents = collect(fresh.clone(), None, Some(last_known)).await.unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].web_link, VALLEY_FORGE);
    assert!(!fresh.visited(TMT_LISTING));
}

#[tokio::test]
async fn test_collect_with_max_count() {
    let fetcher = Arc::new(default_source());

    let documents = collect(fetcher, Some(2), None).await.unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[1].web_link, RETAIL_OUTLOOK);
}

#[tokio::test]
async fn test_collect_leaves_fetcher_open_for_caller() {
    let fetcher = Arc::new(default_source());
    let shared: Arc<dyn PageFetcher> = fetcher.clone();

    collect(shared.clone(), Some(1), None).await.unwrap();
    assert!(!fetcher.is_closed());

    shared.close().await.unwrap();
    assert!(fetcher.is_closed());
}

#[tokio::test]
async fn test_collect_with_unreachable_source_returns_empty() {
    let fetcher = Arc::new(FakeFetcher::new());

    let documents = collect(fetcher.clone(), None, None).await.unwrap();

    assert!(documents.is_empty());
    assert_eq!(
        fetcher.visits(),
        vec![CONSUMER_MARKETS_LISTING.to_string(), TMT_LISTING.to_string()]
    );
}

#[tokio::test]
async fn test_collect_with_closed_fetcher_is_an_error() {
    let fetcher = Arc::new(default_source().closed());

    let result = collect(fetcher.clone(), None, None).await;

    assert!(matches!(result, Err(CrawlError::FetcherUnavailable(_))));
    assert_eq!(fetcher.visits(), vec![CONSUMER_MARKETS_LISTING.to_string()]);
}

#[tokio::test]
async fn test_collect_with_settings_uses_configured_listings() {
    let settings = Settings {
        crawl: CrawlSettings::default(),
        source: SourceSettings {
            listing_urls: vec![TMT_LISTING.to_string()],
            ..SourceSettings::default()
        },
        fetcher: FetcherSettings {
            engine: FetcherKind::Http,
            ..FetcherSettings::default()
        },
    };
    let fetcher = Arc::new(default_source());

    let documents = collect_with_settings(fetcher.clone(), &settings, None, None)
        .await
        .unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].web_link, NETWORK_PULSE);
    assert!(!fetcher.visited(CONSUMER_MARKETS_LISTING));
}

#[tokio::test]
async fn test_collect_with_settings_rejects_empty_source() {
    let settings = Settings {
        crawl: CrawlSettings::default(),
        source: SourceSettings {
            listing_urls: vec![],
            ..SourceSettings::default()
        },
        fetcher: FetcherSettings::default(),
    };

    let result = collect_with_settings(Arc::new(FakeFetcher::new()), &settings, None, None).await;

    assert!(matches!(result, Err(CrawlError::NoListingUrls)));
}
