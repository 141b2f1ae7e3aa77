// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use pubharvest::utils::telemetry;

#[test]
fn test_telemetry_initialization() {
    telemetry::init_telemetry();
    // 重复初始化不会 panic
    telemetry::init_telemetry();

    tracing::debug!("This is a debug message");
    tracing::info!(
        web_link = "https://www.pwc.com/gx/en/ghost/one.html",
        title = "Valley Forge Fabrics",
        "Find document"
    );

    let error_result: Result<(), &str> = Err("listing timed out");
    if let Err(e) = error_result {
        tracing::error!(error = e, "failed to load listing page");
    }
}
