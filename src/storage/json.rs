use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

use crate::config::StorageConfig;
use crate::models::SiteState;
use crate::storage::Storage;

/// Two JSON documents: site URL -> content hash, and site URL -> postings.
pub struct JsonFileStorage {
    hashes_path: PathBuf,
    postings_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            hashes_path: config.hashes_path.clone(),
            postings_path: config.postings_path.clone(),
        }
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn load(&self) -> SiteState {
        let state = SiteState {
            hashes: read_document(&self.hashes_path).await,
            postings: read_document(&self.postings_path).await,
        };
        info!(
            sites = state.hashes.len(),
            hashes = %self.hashes_path.display(),
            "Loaded stored state"
        );
        state
    }

    /// Both documents are staged as temp files before either target is
    /// replaced. If the postings rename fails, the previous hashes file is put
    /// back so the pair on disk never mixes two cycles.
    async fn save(&self, state: &SiteState) -> Result<()> {
        let hashes_tmp = stage_document(&self.hashes_path, &state.hashes).await?;
        let postings_tmp = match stage_document(&self.postings_path, &state.postings).await {
            Ok(tmp) => tmp,
            Err(e) => {
                discard(&hashes_tmp).await;
                return Err(e);
            }
        };

        let backup = self.hashes_path.with_extension("json.bak");
        let had_previous = match fs::copy(&self.hashes_path, &backup).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                discard(&hashes_tmp).await;
                discard(&postings_tmp).await;
                return Err(e)
                    .with_context(|| format!("Failed to back up {}", self.hashes_path.display()));
            }
        };

        if let Err(e) = fs::rename(&hashes_tmp, &self.hashes_path).await {
            discard(&hashes_tmp).await;
            discard(&postings_tmp).await;
            discard(&backup).await;
            return Err(e)
                .with_context(|| format!("Failed to replace {}", self.hashes_path.display()));
        }

        if let Err(e) = fs::rename(&postings_tmp, &self.postings_path).await {
            let restored = if had_previous {
                fs::rename(&backup, &self.hashes_path).await
            } else {
                fs::remove_file(&self.hashes_path).await
            };
            if let Err(restore_err) = restored {
                error!(
                    path = %self.hashes_path.display(),
                    error = %restore_err,
                    "Could not restore previous hashes file"
                );
            }
            discard(&postings_tmp).await;
            return Err(e)
                .with_context(|| format!("Failed to replace {}", self.postings_path.display()));
        }

        discard(&backup).await;
        Ok(())
    }
}

async fn read_document<T: DeserializeOwned + Default>(path: &Path) -> T {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read state file, starting empty");
            return T::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Malformed state file, starting empty");
        T::default()
    })
}

// Write a document to a sibling temp file and return the temp path.
async fn stage_document<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_vec_pretty(value).context("Failed to serialize state")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    Ok(tmp)
}

async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Could not remove leftover file");
        }
    }
}
