use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::models::{JobPosting, SiteSpec};
use crate::parsers::{classify, element_text, resolve_link};
use crate::scrapers::{JobScraper, ScrapeError};
use crate::utils::http::fetch_page;

static HEADING_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["h2", "h3", "h4"]
        .iter()
        .map(|s| Selector::parse(s).expect("Invalid heading selector"))
        .collect()
});

static DESCRIPTION_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["p", "div.description"]
        .iter()
        .map(|s| Selector::parse(s).expect("Invalid description selector"))
        .collect()
});

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Invalid link selector"));

/// Raw fields pulled out of one selected node, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Scrapes generic career pages: GET the page, select job nodes with the
/// site's selector, keep remote full-stack roles.
pub struct CareerPageScraper {
    client: Client,
    config: Arc<MonitorConfig>,
}

impl CareerPageScraper {
    pub fn new(client: Client, config: Arc<MonitorConfig>) -> Self {
        Self { client, config }
    }

    async fn try_scrape(&self, site: &SiteSpec) -> Result<Vec<JobPosting>, ScrapeError> {
        let html = fetch_page(&self.client, &site.url, self.config.max_attempts).await?;

        // Html is not Send, so all parsing happens in one synchronous step
        let candidates = extract_candidates(&html, site)?;
        let found = candidates.len();
        let postings = filter_candidates(candidates, &self.config);

        info!(url = %site.url, found, kept = postings.len(), "Scraped site");
        Ok(postings)
    }
}

#[async_trait]
impl JobScraper for CareerPageScraper {
    async fn scrape(&self, site: &SiteSpec) -> Vec<JobPosting> {
        match self.try_scrape(site).await {
            Ok(postings) => postings,
            Err(e) => {
                warn!(url = %site.url, error = %e, "Error fetching site");
                Vec::new()
            }
        }
    }
}

/// Select job nodes from a page and derive title, link and description for each.
pub fn extract_candidates(html: &str, site: &SiteSpec) -> Result<Vec<Candidate>, ScrapeError> {
    let document = Html::parse_document(html);
    let job_selector = Selector::parse(&site.selector)
        .map_err(|_| ScrapeError::Selector(site.selector.clone()))?;

    let candidates = document
        .select(&job_selector)
        .map(|node| Candidate {
            title: first_text(node, &HEADING_SELECTORS),
            link: node
                .select(&LINK_SELECTOR)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| resolve_link(&site.url, href))
                .unwrap_or_default(),
            description: first_text(node, &DESCRIPTION_SELECTORS),
        })
        .collect();

    Ok(candidates)
}

/// Keep remote full-stack candidates and turn them into postings, preserving
/// page order.
pub fn filter_candidates(candidates: Vec<Candidate>, config: &MonitorConfig) -> Vec<JobPosting> {
    let scraped_at = Utc::now();

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let class = classify(&candidate.title, &candidate.description, &config.keywords);
            if !class.is_match() {
                debug!(title = %candidate.title, ?class, "Skipping candidate");
                return None;
            }

            Some(JobPosting {
                title: candidate.title,
                link: candidate.link,
                technologies: class.technologies,
                is_remote: class.is_remote,
                scraped_at,
            })
        })
        .collect()
}

// Text of the first descendant matching any selector, in priority order,
// falling back to the node's own text.
fn first_text(node: ElementRef<'_>, selectors: &[Selector]) -> String {
    selectors
        .iter()
        .find_map(|selector| node.select(selector).next())
        .map(element_text)
        .unwrap_or_else(|| element_text(node))
}
