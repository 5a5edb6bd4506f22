//! Fetch one page and print every candidate node with its classification.
//!
//! Usage: inspect-site <url> [selector]

use anyhow::{bail, Result};
use job_monitor::config::MonitorConfig;
use job_monitor::models::SiteSpec;
use job_monitor::parsers::classify;
use job_monitor::scrapers::extract_candidates;
use job_monitor::utils::http::{create_client, fetch_page};

const DEFAULT_SELECTOR: &str = "div.job-listing, .job-card, .career-item";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        bail!("usage: inspect-site <url> [selector]");
    };
    let selector = args.next().unwrap_or_else(|| DEFAULT_SELECTOR.to_string());

    let config = MonitorConfig::default();
    let client = create_client(&config)?;
    let site = SiteSpec::new(url, selector);

    println!("Fetching {}...", site.url);
    let html = fetch_page(&client, &site.url, config.max_attempts).await?;
    let candidates = extract_candidates(&html, &site)?;
    println!("Selector '{}' matched {} elements", site.selector, candidates.len());

    for (i, candidate) in candidates.iter().enumerate() {
        let class = classify(&candidate.title, &candidate.description, &config.keywords);
        println!(
            "\n[{}] {} {}",
            i + 1,
            if class.is_match() { "KEEP" } else { "skip" },
            candidate.title
        );
        println!("    link: {}", candidate.link);
        println!(
            "    remote: {}  full-stack: {}  technologies: {:?}",
            class.is_remote, class.is_full_stack, class.technologies
        );
    }

    Ok(())
}
