#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};

use job_monitor::config::{FingerprintConfig, MonitorConfig, StorageConfig};
use job_monitor::models::{SiteSpec, SiteState};
use job_monitor::monitor::Monitor;
use job_monitor::notify::{ChangeNotice, Notifier};
use job_monitor::scrapers::CareerPageScraper;
use job_monitor::storage::{JsonFileStorage, Storage};
use job_monitor::utils::http::create_client;

pub const SELECTOR: &str = "div.job-listing";

/// A listing page with one matching node per title.
pub fn listing_page(titles: &[&str]) -> String {
    let jobs: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                r#"<div class="job-listing"><h3>{title}</h3><a href="/careers/{i}">Apply</a><p>Remote team using React and Python.</p></div>"#
            )
        })
        .collect();
    let unrelated = r#"<div class="job-listing"><h3>Office Manager</h3></div>"#;
    format!("<html><body>{jobs}{unrelated}</body></html>")
}

pub fn three_jobs_page() -> String {
    listing_page(&[
        "Remote Full-Stack Engineer",
        "Senior Full Stack Developer",
        "Software Engineer, Platform",
    ])
}

pub fn storage_config(dir: &Path) -> StorageConfig {
    StorageConfig {
        hashes_path: dir.join("website_hashes.json"),
        postings_path: dir.join("filtered_job_postings.json"),
    }
}

/// Config with content-only fingerprints, so refetching an unchanged page
/// hashes the same.
pub fn test_config(dir: &Path, urls: &[String]) -> Arc<MonitorConfig> {
    Arc::new(MonitorConfig {
        fingerprint: FingerprintConfig {
            include_scraped_at: false,
        },
        ..default_test_config(dir, urls)
    })
}

/// Config that keeps the default fingerprint settings.
pub fn default_test_config(dir: &Path, urls: &[String]) -> MonitorConfig {
    MonitorConfig {
        sites: urls.iter().map(|url| SiteSpec::new(url.as_str(), SELECTOR)).collect(),
        request_timeout_seconds: 5,
        storage: storage_config(dir),
        ..Default::default()
    }
}

pub async fn build_monitor(config: Arc<MonitorConfig>, notifier: Arc<dyn Notifier>) -> Monitor {
    let client = create_client(&config).unwrap();
    let scraper = Arc::new(CareerPageScraper::new(client, config.clone()));
    let storage = Arc::new(JsonFileStorage::new(&config.storage));
    Monitor::new(config, scraper, storage, notifier).await
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<ChangeNotice>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<ChangeNotice> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notice: &ChangeNotice) -> Result<()> {
        self.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _notice: &ChangeNotice) -> Result<()> {
        bail!("smtp unavailable")
    }
}

/// Loads a fixed state and refuses every save.
pub struct ReadOnlyStorage {
    pub state: SiteState,
}

#[async_trait]
impl Storage for ReadOnlyStorage {
    async fn load(&self) -> SiteState {
        self.state.clone()
    }

    async fn save(&self, _state: &SiteState) -> Result<()> {
        bail!("disk full")
    }
}
