mod diff;

pub use diff::{detect_change, SiteChange};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::config::MonitorConfig;
use crate::fingerprint::Fingerprinter;
use crate::models::SiteState;
use crate::notify::{ChangeNotice, Notifier};
use crate::scrapers::JobScraper;
use crate::storage::Storage;

/// Counts from one fetch cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sites_checked: usize,
    /// Sites whose fetch failed or kept nothing; their stored state is untouched.
    pub sites_skipped: usize,
    pub first_seen: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub notifications_failed: usize,
}

impl CycleReport {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            sites_checked: 0,
            sites_skipped: 0,
            first_seen: 0,
            changed: 0,
            unchanged: 0,
            notifications_failed: 0,
        }
    }
}

/// Runs fetch cycles and owns the current site state.
///
/// Readers get an `Arc` snapshot; a cycle builds the next state on the side,
/// persists it, and only then swaps it in. Cycles never overlap.
pub struct Monitor {
    config: Arc<MonitorConfig>,
    scraper: Arc<dyn JobScraper>,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    fingerprinter: Fingerprinter,
    state: RwLock<Arc<SiteState>>,
    cycle_lock: Mutex<()>,
}

impl Monitor {
    /// Build a monitor starting from whatever the storage holds.
    pub async fn new(
        config: Arc<MonitorConfig>,
        scraper: Arc<dyn JobScraper>,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let state = storage.load().await;
        Self {
            fingerprinter: Fingerprinter::new(&config.fingerprint),
            config,
            scraper,
            storage,
            notifier,
            state: RwLock::new(Arc::new(state)),
            cycle_lock: Mutex::new(()),
        }
    }

    pub async fn snapshot(&self) -> Arc<SiteState> {
        self.state.read().await.clone()
    }

    /// Fetch every site, diff against stored hashes, persist, then notify on
    /// change. Per-site failures are logged and skipped; only a failure to
    /// persist is returned as an error.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let _cycle = self.cycle_lock.lock().await;

        let mut report = CycleReport::new(Utc::now());
        info!(
            sites = self.config.sites.len(),
            "--- Starting check cycle at {} ---",
            report.started_at.format("%Y-%m-%d %H:%M:%S")
        );

        let previous = self.snapshot().await;
        let mut next = SiteState::clone(&previous);

        let fetched: Vec<_> = stream::iter(self.config.sites.clone())
            .map(|site| {
                let scraper = self.scraper.clone();
                async move {
                    let postings = scraper.scrape(&site).await;
                    (site, postings)
                }
            })
            .buffered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let mut notices = Vec::new();
        for (site, postings) in fetched {
            report.sites_checked += 1;

            if postings.is_empty() {
                info!(url = %site.url, "No filtered jobs found or error, keeping previous state");
                report.sites_skipped += 1;
                continue;
            }

            let hash = match self.fingerprinter.hash(&postings) {
                Ok(hash) => hash,
                Err(e) => {
                    warn!(url = %site.url, error = %e, "Could not fingerprint postings");
                    report.sites_skipped += 1;
                    continue;
                }
            };

            let change = detect_change(&previous.status(&site.url), &hash);
            match &change {
                SiteChange::FirstSeen => {
                    info!(url = %site.url, %hash, "Initial fetch");
                    report.first_seen += 1;
                }
                SiteChange::Unchanged => report.unchanged += 1,
                SiteChange::Changed { previous: before } => {
                    info!(url = %site.url, previous = %before, %hash, "Changes detected");
                    report.changed += 1;
                }
            }

            if change.should_notify() {
                let preview = self.config.notify_preview_count;
                notices.push(ChangeNotice::new(&site.url, &postings, preview));
            }

            next.commit(&site.url, hash, postings);
        }

        self.storage
            .save(&next)
            .await
            .context("Failed to persist site state")?;
        *self.state.write().await = Arc::new(next);

        // Notices go out only after the new state is persisted.
        for notice in &notices {
            if let Err(e) = self.notifier.notify(notice).await {
                error!(url = %notice.site_url, error = %e, "Failed to send notification");
                report.notifications_failed += 1;
            }
        }

        report.finished_at = Utc::now();
        info!(
            checked = report.sites_checked,
            skipped = report.sites_skipped,
            first_seen = report.first_seen,
            changed = report.changed,
            unchanged = report.unchanged,
            "Check cycle completed"
        );

        Ok(report)
    }
}
