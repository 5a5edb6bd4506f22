use async_trait::async_trait;
use thiserror::Error;

use crate::models::{JobPosting, SiteSpec};
use crate::utils::http::FetchError;

mod career_page;

pub use career_page::{extract_candidates, filter_candidates, Candidate, CareerPageScraper};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid selector {0:?}")]
    Selector(String),
}

/// Produces the kept postings for one site.
///
/// Implementations never fail: a site that cannot be fetched or parsed yields
/// an empty list and the failure is logged.
#[async_trait]
pub trait JobScraper: Send + Sync {
    async fn scrape(&self, site: &SiteSpec) -> Vec<JobPosting>;
}
