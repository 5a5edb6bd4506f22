use serde::{Deserialize, Serialize};

/// One page to poll and the CSS selector matching its job nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteSpec {
    pub url: String,
    pub selector: String,
}

impl SiteSpec {
    pub fn new(url: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            selector: selector.into(),
        }
    }
}
