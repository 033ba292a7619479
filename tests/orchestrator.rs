mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use common::{Canned, StubApi, link_item, orchestrator, stats_body};
use serde_json::json;
use shorty_client::prelude::*;

#[tokio::test]
async fn test_creation_points_stats_at_new_code_and_reloads_listing() {
    let stub = StubApi::new();
    stub.on_shorten(Canned::json(
        200,
        json!({ "code": "ab12cd", "short_url": "https://host/ab12cd" }),
    ))
    .on_list(Canned::json(200, json!([link_item("ab12cd")])));
    let app = orchestrator(&stub.start().await, CompletionPolicy::LastCompleted);

    app.shorten().edit_form(|form| {
        form.url = "https://example.com/a".to_string();
        form.custom_code = String::new();
        form.want_qr = true;
    });
    let created = app.submit_shorten().await.unwrap();

    assert!(created.is_applied());
    assert_eq!(created.result().short_url, "https://host/ab12cd");
    let shorten = app.shorten().state();
    assert!(shorten.request.is_succeeded());
    assert_eq!(shorten.result().unwrap().code, "ab12cd");

    assert_eq!(app.active_code().as_deref(), Some("ab12cd"));
    assert!(app.links().state().find("ab12cd").is_some());

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[1].uri, "/api/urls");
    assert!(requests[0].json().get("custom_code").is_none());
}

#[tokio::test]
async fn test_not_found_stats_fail_with_status_in_message() {
    let stub = StubApi::new();
    stub.on_stats("crina2025", Canned::empty(404));
    let app = orchestrator(&stub.start().await, CompletionPolicy::LastCompleted);

    let err = app.inspect("crina2025").await.unwrap_err();
    assert!(err.is_not_found());

    let stats = app.stats().state();
    assert!(stats.request.is_failed());
    assert!(stats.error().unwrap().contains("404"));
    assert_eq!(stats.inspected_code, "crina2025");
}

#[tokio::test]
async fn test_blank_code_sends_nothing() {
    let stub = StubApi::new();
    let app = orchestrator(&stub.start().await, CompletionPolicy::LastCompleted);
    let before = app.stats().state();

    app.inspect("").await.unwrap();
    app.inspect("   ").await.unwrap();

    assert!(stub.requests().is_empty());
    assert_eq!(app.stats().state(), before);
}

#[tokio::test]
async fn test_repeated_listing_load_is_stable() {
    let stub = StubApi::new();
    let listing = json!([link_item("a1b2c3"), link_item("d4e5f6")]);
    stub.on_list(Canned::json(200, listing.clone()))
        .on_list(Canned::json(200, listing));
    let app = orchestrator(&stub.start().await, CompletionPolicy::LastCompleted);

    app.refresh_links().await.unwrap();
    let first = app.links().state();
    app.refresh_links().await.unwrap();
    let second = app.links().state();

    assert_eq!(first, second);
    assert_eq!(second.phase(), LinksPhase::Loaded);
}

#[tokio::test]
async fn test_failed_refresh_keeps_listing_readable() {
    let stub = StubApi::new();
    stub.on_list(Canned::json(200, json!([link_item("a1b2c3")])))
        .on_list(Canned::text(500, "database unavailable"));
    let app = orchestrator(&stub.start().await, CompletionPolicy::LastCompleted);

    app.start().await.unwrap();
    assert!(app.refresh_links().await.is_err());

    let links = app.links().state();
    assert_eq!(links.links().len(), 1);
    assert_eq!(links.error(), Some("database unavailable"));
    assert_eq!(links.phase(), LinksPhase::Failed);
}

#[tokio::test]
async fn test_row_selection_loads_that_rows_stats() {
    let stub = StubApi::new();
    stub.on_list(Canned::json(
        200,
        json!([link_item("a1b2c3"), link_item("d4e5f6")]),
    ))
    .on_stats("d4e5f6", Canned::json(200, stats_body("https://example.com/d4e5f6", 9)));
    let app = orchestrator(&stub.start().await, CompletionPolicy::LastCompleted);

    app.start().await.unwrap();
    app.select_row(1).await.unwrap();

    let stats = app.stats().state();
    assert_eq!(stats.stats().unwrap().code, "d4e5f6");
    assert_eq!(stats.stats().unwrap().clicks, 9);
    assert_eq!(
        stub.paths().last().map(String::as_str),
        Some("/api/urls/d4e5f6/stats")
    );
}

async fn race_stats(policy: CompletionPolicy) -> StatsState {
    let stub = StubApi::new();
    stub.on_stats(
        "a",
        Canned::json(200, stats_body("https://example.com/a", 1))
            .delayed(Duration::from_millis(300)),
    )
    .on_stats("b", Canned::json(200, stats_body("https://example.com/b", 2)));
    let app = Arc::new(orchestrator(&stub.start().await, policy));

    let slow = tokio::spawn({
        let app = app.clone();
        async move { app.select_link("a").await }
    });
    while stub.requests().is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    app.select_link("b").await.unwrap();
    assert_eq!(app.stats().state().stats().unwrap().code, "b");

    slow.await.unwrap().unwrap();
    app.stats().state()
}

#[tokio::test]
async fn test_slower_earlier_stats_request_wins_by_default() {
    let state = race_stats(CompletionPolicy::LastCompleted).await;

    assert_eq!(state.stats().unwrap().code, "a");
    assert_eq!(state.request_code.as_deref(), Some("a"));
    assert_eq!(state.inspected_code, "b");
}

#[tokio::test]
async fn test_issued_ordering_keeps_latest_stats_request() {
    let state = race_stats(CompletionPolicy::LatestIssued).await;

    assert_eq!(state.stats().unwrap().code, "b");
    assert_eq!(state.inspected_code, "b");
}

#[tokio::test]
async fn test_validation_failure_never_reaches_server() {
    let stub = StubApi::new();
    let app = orchestrator(&stub.start().await, CompletionPolicy::LastCompleted);

    app.shorten()
        .edit_form(|form| form.url = "ftp://example.com/file".to_string());
    let err = app.submit_shorten().await.unwrap_err();

    assert!(err.is_validation());
    assert!(stub.requests().is_empty());
    assert!(app.shorten().state().request.is_idle());
}

#[tokio::test]
async fn test_server_rejection_keeps_form_for_resubmit() {
    let stub = StubApi::new();
    stub.on_shorten(Canned::text(409, "custom code already in use"))
        .on_shorten(Canned::json(
            200,
            json!({ "code": "other123", "short_url": "https://host/other123" }),
        ))
        .on_list(Canned::json(200, json!([link_item("other123")])));
    let app = orchestrator(&stub.start().await, CompletionPolicy::LastCompleted);

    app.shorten().edit_form(|form| {
        form.url = "https://example.com/a".to_string();
        form.custom_code = "crina2025".to_string();
    });
    let err = app.submit_shorten().await.unwrap_err();
    assert_eq!(err.status(), Some(409));

    let state = app.shorten().state();
    assert_eq!(state.error(), Some("custom code already in use"));
    assert_eq!(state.form.custom_code, "crina2025");
    assert!(app.active_code().is_none());

    app.shorten().edit_form(|form| form.custom_code = "other123".to_string());
    app.submit_shorten().await.unwrap();
    assert_eq!(app.active_code().as_deref(), Some("other123"));
}
