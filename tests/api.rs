mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;
use job_monitor::api::create_router;
use job_monitor::models::{ContentHash, JobPosting, SiteState};
use job_monitor::storage::{JsonFileStorage, Storage};

async fn call(router: axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_status_and_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), &["https://example.com/jobs".to_string()]);
    let monitor = Arc::new(build_monitor(config, Arc::new(RecordingNotifier::default())).await);

    for uri in ["/health", "/api/health"] {
        let (status, body) = call(create_router(monitor.clone()), "GET", uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    }
}

#[tokio::test]
async fn jobs_returns_stored_postings_by_site() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://example.com/jobs".to_string();
    let config = test_config(dir.path(), &[url.clone()]);

    let mut prior = SiteState::default();
    prior.commit(
        &url,
        ContentHash("abc".to_string()),
        vec![JobPosting {
            title: "Remote Full Stack Engineer".to_string(),
            link: "https://example.com/jobs/1".to_string(),
            technologies: ["react".to_string()].into_iter().collect(),
            is_remote: true,
            scraped_at: chrono::Utc::now(),
        }],
    );
    JsonFileStorage::new(&config.storage).save(&prior).await.unwrap();

    let monitor = Arc::new(build_monitor(config, Arc::new(RecordingNotifier::default())).await);
    let (status, body) = call(create_router(monitor), "GET", "/jobs").await;

    assert_eq!(status, StatusCode::OK);
    let jobs = body[url.as_str()].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["title"], "Remote Full Stack Engineer");
    assert_eq!(jobs[0]["technologies"][0], "react");
    assert_eq!(jobs[0]["is_remote"], true);
}

#[tokio::test]
async fn refresh_updates_healthy_site_and_keeps_failed_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(ResponseTemplate::new(200).set_body_string(three_jobs_page()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let good = format!("{}/good", server.uri());
    let broken = format!("{}/broken", server.uri());
    let config = test_config(dir.path(), &[good.clone(), broken.clone()]);

    let mut prior = SiteState::default();
    prior.commit(
        &broken,
        ContentHash("feedface".to_string()),
        vec![JobPosting {
            title: "Remote Web Developer".to_string(),
            link: String::new(),
            technologies: Default::default(),
            is_remote: true,
            scraped_at: chrono::Utc::now(),
        }],
    );
    JsonFileStorage::new(&config.storage).save(&prior).await.unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = Arc::new(build_monitor(config.clone(), notifier).await);
    let (status, body) = call(create_router(monitor), "POST", "/jobs/refresh").await;

    assert_eq!(status, StatusCode::OK);
    let fresh = body[good.as_str()].as_array().unwrap();
    assert_eq!(fresh.len(), 3);
    assert_eq!(fresh[0]["title"], "Remote Full-Stack Engineer");
    assert_eq!(fresh[0]["link"], format!("{good}/careers/0"));

    let kept = body[broken.as_str()].as_array().unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0]["title"], "Remote Web Developer");

    let stored = JsonFileStorage::new(&config.storage).load().await;
    assert_eq!(stored.hashes[&broken], ContentHash("feedface".to_string()));
    assert!(stored.hashes.contains_key(&good));
}

#[tokio::test]
async fn refresh_reports_persistence_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(three_jobs_page()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    // a regular file where the state directory should be
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "").unwrap();
    let config = test_config(&blocker, &[server.uri()]);

    let monitor = Arc::new(build_monitor(config, Arc::new(RecordingNotifier::default())).await);
    let (status, body) = call(create_router(monitor.clone()), "POST", "/api/jobs/refresh").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("persist")));
    assert!(monitor.snapshot().await.hashes.is_empty());
}
