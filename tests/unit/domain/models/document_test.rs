// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{TimeZone, Utc};
use pubharvest::domain::models::document::Document;
use serde_json::json;

fn valley_forge() -> Document {
    Document::stub(
        "Valley Forge Fabrics".to_string(),
        "https://www.pwc.com/gx/en/ghost/valley-forge-fabrics-cloud-efficiency.html".to_string(),
        Some("Cloud efficiency.".to_string()),
        Utc.with_ymd_and_hms(2023, 11, 15, 0, 0, 0).unwrap(),
    )
}

#[test]
fn test_document_serializes_abstract_field_name() {
    let value = serde_json::to_value(valley_forge()).unwrap();

    assert_eq!(value["abstract"], json!("Cloud efficiency."));
    assert!(value.get("abstract_text").is_none());
    assert_eq!(value["title"], json!("Valley Forge Fabrics"));
    assert!(value["text"].is_null());
    assert!(value["load_date"].is_null());
}

#[test]
fn test_last_document_marker_from_json() {
    // Given: 上次运行保存的文档
    let raw = r#"{
        "id": null,
        "title": "Valley Forge Fabrics",
        "abstract": null,
        "text": "Full text",
        "web_link": "https://www.pwc.com/gx/en/ghost/valley-forge-fabrics-cloud-efficiency.html",
        "local_link": null,
        "other_data": null,
        "pub_date": "2023-11-15T00:00:00Z",
        "load_date": "2024-03-01T08:00:00Z"
    }"#;

    // When: 反序列化
    let marker: Document = serde_json::from_str(raw).unwrap();

    // Then: 与新发现的草稿指纹一致
    assert_eq!(marker.fingerprint(), valley_forge().fingerprint());
    assert!(marker.is_enriched());
}

#[test]
fn test_fingerprint_ignores_dates_and_text() {
    let mut enriched = valley_forge();
    enriched.text = Some("Full text".to_string());
    enriched.load_date = Some(Utc::now());
    enriched.pub_date = None;

    assert_eq!(enriched.fingerprint(), valley_forge().fingerprint());

    let mut moved = valley_forge();
    moved.web_link.push_str("?page=2");
    assert_ne!(moved.fingerprint(), valley_forge().fingerprint());
}
