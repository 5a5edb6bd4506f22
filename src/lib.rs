//! Polls career pages for remote full-stack postings, fingerprints each site's
//! filtered list and emails when it changes. Serves the current results over HTTP.

pub mod api;
pub mod config;
pub mod fingerprint;
pub mod models;
pub mod monitor;
pub mod notify;
pub mod parsers;
pub mod scheduler;
pub mod scrapers;
pub mod storage;
pub mod utils;
