pub mod email;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::EmailConfig;
use crate::models::JobPosting;
pub use email::EmailNotifier;

/// A detected change on one site, ready to be sent.
#[derive(Debug, Clone)]
pub struct ChangeNotice {
    pub site_url: String,
    pub preview: Vec<JobPosting>,
    pub total: usize,
}

impl ChangeNotice {
    /// Keep the first `preview_count` postings for the message body.
    pub fn new(site_url: &str, postings: &[JobPosting], preview_count: usize) -> Self {
        Self {
            site_url: site_url.to_string(),
            preview: postings.iter().take(preview_count).cloned().collect(),
            total: postings.len(),
        }
    }

    pub fn subject(&self) -> String {
        format!("New Full Stack Jobs on {}", self.site_url)
    }

    pub fn body(&self) -> String {
        let preview =
            serde_json::to_string_pretty(&self.preview).unwrap_or_else(|_| "[]".to_string());
        let mut body = format!("New/updated remote Full Stack jobs:\n{preview}\n");
        if self.total > self.preview.len() {
            body.push_str(&format!(
                "...and {} more ({} total)\n",
                self.total - self.preview.len(),
                self.total
            ));
        }
        body
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: &ChangeNotice) -> Result<()>;
}

/// Used when sending is switched off; only logs.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, notice: &ChangeNotice) -> Result<()> {
        info!(site = %notice.site_url, total = notice.total, "Notifications disabled, not sending");
        Ok(())
    }
}

/// Email notifier when enabled, otherwise the disabled one.
pub fn from_config(config: &EmailConfig) -> Result<Arc<dyn Notifier>> {
    if config.enabled {
        Ok(Arc::new(EmailNotifier::new(config)?))
    } else {
        info!("Email notifications disabled");
        Ok(Arc::new(DisabledNotifier))
    }
}
