use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::FingerprintConfig;
use crate::models::{ContentHash, JobPosting};

const SCRAPED_AT: &str = "scraped_at";

/// Computes the content hash of a site's kept postings.
///
/// Records are hashed in the order the filter produced them, so the same jobs
/// discovered in a different order hash differently. Object keys are sorted at
/// every level before hashing.
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    include_scraped_at: bool,
}

impl Fingerprinter {
    pub fn new(config: &FingerprintConfig) -> Self {
        Self {
            include_scraped_at: config.include_scraped_at,
        }
    }

    /// Hashes posting content only, ignoring the scrape timestamp.
    pub fn content_only() -> Self {
        Self {
            include_scraped_at: false,
        }
    }

    /// Canonical JSON text the hash is computed over.
    pub fn canonical_json(&self, postings: &[JobPosting]) -> Result<String> {
        let mut value = serde_json::to_value(postings).context("Failed to serialize postings")?;

        if !self.include_scraped_at {
            if let Value::Array(records) = &mut value {
                for record in records {
                    if let Value::Object(fields) = record {
                        fields.remove(SCRAPED_AT);
                    }
                }
            }
        }

        serde_json::to_string(&sort_keys(value)).context("Failed to encode canonical postings")
    }

    pub fn hash(&self, postings: &[JobPosting]) -> Result<ContentHash> {
        let canonical = self.canonical_json(postings)?;
        Ok(ContentHash(format!("{:x}", md5::compute(canonical.as_bytes()))))
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(fields) => {
            let sorted: BTreeMap<String, Value> = fields
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
