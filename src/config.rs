use anyhow::{bail, Context, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::SiteSpec;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "JOB_MONITOR_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "job_monitor";
const ENV_PREFIX: &str = "JOB_MONITOR";

const CAREER_ITEM_SELECTOR: &str = "div.job-listing, .job-card, .career-item";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub sites: Vec<SiteSpec>,
    pub check_interval_seconds: u64,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
    pub max_attempts: u32,
    pub max_concurrent_fetches: usize,
    pub notify_preview_count: usize,
    pub keywords: KeywordConfig,
    pub email: EmailConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub fingerprint: FingerprintConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub remote: Vec<String>,
    pub full_stack: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub hashes_path: PathBuf,
    pub postings_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    /// Hash `scraped_at` along with the posting content. On by default, so a
    /// refetch of an unchanged page still counts as a change. Turn it off to
    /// compare posting content only.
    pub include_scraped_at: bool,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            include_scraped_at: true,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sites: default_sites(),
            check_interval_seconds: 30 * 60,
            request_timeout_seconds: 15,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
            max_attempts: 1,
            max_concurrent_fetches: 4,
            notify_preview_count: 3,
            keywords: KeywordConfig::default(),
            email: EmailConfig::default(),
            storage: StorageConfig::default(),
            server: ServerConfig::default(),
            fingerprint: FingerprintConfig::default(),
        }
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Self {
            remote: owned(&["remote", "work from home", "wfh", "telecommute"]),
            full_stack: owned(&["full stack", "full-stack", "software engineer", "web developer"]),
            technologies: owned(&[
                "react",
                "node.js",
                "next.js",
                "fastapi",
                "express",
                "typescript",
                "javascript",
                "python",
            ]),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            to: String::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            hashes_path: PathBuf::from("website_hashes.json"),
            postings_path: PathBuf::from("filtered_job_postings.json"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl MonitorConfig {
    /// Layer defaults, an optional config file and `JOB_MONITOR__*` environment
    /// variables, then validate the result.
    pub fn load() -> Result<Self> {
        let file =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        let config: MonitorConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sites.is_empty() {
            bail!("At least one site must be configured");
        }
        if self.check_interval_seconds == 0 {
            bail!("check_interval_seconds must be greater than zero");
        }
        if self.request_timeout_seconds == 0 {
            bail!("request_timeout_seconds must be greater than zero");
        }
        if self.max_concurrent_fetches == 0 {
            bail!("max_concurrent_fetches must be greater than zero");
        }
        if self.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }

        for site in &self.sites {
            if Selector::parse(&site.selector).is_err() {
                bail!("Invalid selector {:?} for {}", site.selector, site.url);
            }
        }

        if self.email.enabled && (self.email.from.is_empty() || self.email.to.is_empty()) {
            bail!("Email notifications are enabled but from/to addresses are missing");
        }

        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn default_sites() -> Vec<SiteSpec> {
    let mut sites = vec![
        SiteSpec::new(
            "https://www.linkedin.com/jobs/search/?keywords=full%20stack%20engineer&location=Remote",
            "li.jobs-search-results__list-item",
        ),
        SiteSpec::new("https://remote.co/remote-jobs/developer/", "div.job-listing"),
        SiteSpec::new(
            "https://weworkremotely.com/categories/remote-full-stack-programming-jobs",
            "li.feature",
        ),
        SiteSpec::new(
            "https://careers.google.com/jobs/results/?distance=50&employment_type=FULL_TIME&q=full%20stack%20engineer",
            "div.job-listing",
        ),
        SiteSpec::new(
            "https://www.amazon.jobs/en/search?base_query=full+stack+engineer",
            "div.job",
        ),
    ];

    sites.extend(
        CAREER_PAGES
            .iter()
            .map(|&url| SiteSpec::new(url, CAREER_ITEM_SELECTOR)),
    );
    sites
}

// Company career pages that share the generic item selector.
const CAREER_PAGES: &[&str] = &[
    "https://openai.com/careers/",
    "https://www.glean.com/careers",
    "https://www.harvey.ai/company#company-careers",
    "https://www.statsig.com/careers",
    "https://front.com/jobs",
    "https://www.chainguard.dev/careers",
    "https://www.citadelsecurities.com/careers/",
    "https://traderepublic.com/careers",
    "https://remote.com/en-in/careers",
    "https://www.rippling.com/careers",
    "https://www.klarna.com/careers/",
    "https://international.nubank.com.br/jobs/",
    "https://www.anrok.com/careers",
    "https://www.clipboardhealth.com/careers",
    "https://www.faire.com/careers",
    "https://www.machindustries.com/careers",
    "https://www.boringcompany.com/careers",
    "https://www.meter.com/careers",
    "https://ampsortation.com/careers",
    "https://watershed.com/careers",
    "https://joroexperiences.com/careers",
    "https://starkware.co/careers/",
    "https://www.airtime.com/jobs",
    "https://info.wonolo.com/careers/",
    "https://recroom.com/careers",
    "https://www.uipath.com/careers",
    "https://www.knowde.com/resources/careers",
    "https://careersatdoordash.com/career-areas/",
    "https://careers.airbnb.com/",
    "https://www.figma.com/careers/",
    "https://careers.robinhood.com/",
    "https://careers.snowflake.com/us/en",
    "https://www.databricks.com/company/careers",
    "https://instacart.careers/current-openings/",
    "https://stripe.com/jobs/search",
    "https://www.ftxinfotech.com/careers/",
    "https://www.close.com/careers",
    "https://linear.app/careers",
    "https://vercel.com/careers",
    "https://www.notion.com/careers",
    "https://www.gong.io/careers/",
    "https://www.perplexity.ai/hub/careers",
    "https://www.moveworks.com/us/en/company/careers",
    "https://replicate.com/about",
    "https://www.anterior.com/company",
    "https://www.pinecone.io/careers/",
    "https://weaviate.io/company/careers",
    "https://jobs.ashbyhq.com/anyscale",
    "https://jobs.ashbyhq.com/baseten",
    "https://www.together.ai/careers",
    "https://www.anthropic.com/careers",
    "https://www.cohere.ai/careers",
    "https://www.huggingface.co/careers",
    "https://www.mistral.ai/careers",
    "https://www.character.ai/careers",
    "https://www.jasper.ai/careers",
    "https://www.copy.ai/careers",
    "https://www.runwayml.com/careers",
    "https://www.midjourney.com/careers",
    "https://www.stability.ai/careers",
    "https://www.leap.ai/careers",
    "https://www.leonardo.ai/careers",
    "https://www.ideogram.ai/careers",
    "https://www.unsplash.com/careers",
    "https://www.shutterstock.com/careers",
    "https://www.gettyimages.com/careers",
    "https://www.adobe.com/careers",
    "https://www.canva.com/careers",
    "https://www.sketch.com/careers",
    "https://www.invisionapp.com/careers",
    "https://www.principle.com/careers",
    "https://www.framer.com/careers",
    "https://www.webflow.com/careers",
    "https://www.squarespace.com/careers",
    "https://www.wix.com/careers",
    "https://www.shopify.com/careers",
    "https://www.bigcommerce.com/careers",
    "https://www.magento.com/careers",
    "https://www.woocommerce.com/careers",
    "https://www.prestashop.com/careers",
    "https://www.opencart.com/careers",
    "https://www.zen-cart.com/careers",
    "https://www.oscommerce.com/careers",
    "https://www.cubecart.com/careers",
    "https://www.xt-commerce.com/careers",
    "https://www.oxid-esales.com/careers",
    "https://www.shopware.com/careers",
    "https://www.sylius.com/careers",
    "https://www.akeneo.com/careers",
    "https://www.pimcore.com/careers",
];
