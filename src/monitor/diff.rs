use crate::models::{ContentHash, SiteStatus};

/// Outcome of comparing a fresh hash with what was stored for a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteChange {
    /// No stored hash yet; stored without notifying.
    FirstSeen,
    Unchanged,
    Changed { previous: ContentHash },
}

impl SiteChange {
    pub fn should_notify(&self) -> bool {
        matches!(self, SiteChange::Changed { .. })
    }
}

pub fn detect_change(status: &SiteStatus, current: &ContentHash) -> SiteChange {
    match status {
        SiteStatus::Unknown => SiteChange::FirstSeen,
        SiteStatus::Known(previous) if previous == current => SiteChange::Unchanged,
        SiteStatus::Known(previous) => SiteChange::Changed {
            previous: previous.clone(),
        },
    }
}
