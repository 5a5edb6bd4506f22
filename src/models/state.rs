use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ContentHash, JobPosting};

/// Per-site persisted results, keyed by site URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteState {
    pub hashes: BTreeMap<String, ContentHash>,
    pub postings: BTreeMap<String, Vec<JobPosting>>,
}

/// A site is `Unknown` until its first successful fetch, then `Known` forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteStatus {
    Unknown,
    Known(ContentHash),
}

impl SiteState {
    pub fn status(&self, url: &str) -> SiteStatus {
        match self.hashes.get(url) {
            Some(hash) => SiteStatus::Known(hash.clone()),
            None => SiteStatus::Unknown,
        }
    }

    pub fn postings_for(&self, url: &str) -> &[JobPosting] {
        self.postings.get(url).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace a site's hash and postings together.
    pub fn commit(&mut self, url: &str, hash: ContentHash, postings: Vec<JobPosting>) {
        self.hashes.insert(url.to_string(), hash);
        self.postings.insert(url.to_string(), postings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_moves_site_from_unknown_to_known() {
        let mut state = SiteState::default();
        let url = "https://example.com/jobs";
        assert_eq!(state.status(url), SiteStatus::Unknown);
        assert!(state.postings_for(url).is_empty());

        state.commit(url, ContentHash("abc".to_string()), Vec::new());
        assert_eq!(state.status(url), SiteStatus::Known(ContentHash("abc".to_string())));

        state.commit(url, ContentHash("def".to_string()), Vec::new());
        assert_eq!(state.status(url), SiteStatus::Known(ContentHash("def".to_string())));
    }
}
