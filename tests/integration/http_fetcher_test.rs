// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{article, listing, ListingItem};
use pubharvest::config::settings::{FetcherSettings, SourceSettings};
use pubharvest::domain::models::source_profile::SourceProfile;
use pubharvest::domain::services::acquisition_gate::GateConfig;
use pubharvest::domain::services::crawl_orchestrator::{
    CrawlOrchestrator, CrawlTermination, CrawlTiming,
};
use pubharvest::engines::reqwest_engine::HttpFetcher;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

fn orchestrator(listing_urls: Vec<String>) -> (CrawlOrchestrator<HttpFetcher>, SourceProfile) {
    let settings = FetcherSettings {
        page_load_timeout_secs: 5,
        ..FetcherSettings::default()
    };
    let fetcher = Arc::new(HttpFetcher::new(&settings).unwrap());
    let profile = SourceProfile::from_settings(&SourceSettings {
        listing_urls,
        ..SourceSettings::default()
    })
    .unwrap();

    (
        CrawlOrchestrator::new(fetcher, Arc::new(profile.clone()), CrawlTiming::immediate()),
        profile,
    )
}

#[tokio::test]
async fn test_crawl_over_http() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/industries/tmt/publications.html",
        listing(&[
            ListingItem::new("Network pulse", "/ghost/network-pulse.html", "2023-09-20"),
            ListingItem::new("Edge compute", "../../ghost/edge-compute.html", "2023-09-18"),
        ]),
    )
    .await;
    mount_html(&server, "/ghost/network-pulse.html", article("Networks are busy.")).await;
    mount_html(&server, "/ghost/edge-compute.html", article("Edge is near.")).await;

    let (orchestrator, profile) = orchestrator(vec![format!(
        "{}/industries/tmt/publications.html",
        server.uri()
    )]);

    let outcome = orchestrator
        .run(&profile.listing_urls, &GateConfig::default())
        .await
        .unwrap();

    assert_eq!(outcome.termination, CrawlTermination::Exhausted);
    assert!(outcome.failed_listings.is_empty());
    assert_eq!(outcome.documents.len(), 2);
    assert_eq!(
        outcome.documents[1].web_link,
        format!("{}/ghost/edge-compute.html", server.uri())
    );
    assert_eq!(outcome.documents[0].text.as_deref(), Some("Networks are busy."));
    assert_eq!(outcome.documents[1].text.as_deref(), Some("Edge is near."));
}

#[tokio::test]
async fn test_http_error_pages_are_tolerated() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/industries/tmt/publications.html",
        listing(&[ListingItem::new(
            "Gone",
            "/ghost/gone.html",
            "2023-09-20",
        )]),
    )
    .await;
    // /ghost/gone.html and the first listing answer 404

    let missing_listing = format!("{}/industries/missing/publications.html", server.uri());
    let (orchestrator, profile) = orchestrator(vec![
        missing_listing.clone(),
        format!("{}/industries/tmt/publications.html", server.uri()),
    ]);

    let outcome = orchestrator
        .run(&profile.listing_urls, &GateConfig::default())
        .await
        .unwrap();

    assert_eq!(outcome.failed_listings.len(), 1);
    assert_eq!(outcome.failed_listings[0].as_str(), missing_listing);
    assert_eq!(outcome.documents.len(), 1);
    assert_eq!(outcome.documents[0].title, "Gone");
    assert!(outcome.documents[0].text.is_none());
    assert!(outcome.documents[0].load_date.is_none());
}
