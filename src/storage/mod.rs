use anyhow::Result;
use async_trait::async_trait;

use crate::models::SiteState;

mod json;
pub use json::JsonFileStorage;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the last persisted state. Missing or malformed data loads as empty.
    async fn load(&self) -> SiteState;
    /// Persist a full state snapshot.
    async fn save(&self, state: &SiteState) -> Result<()>;
}
