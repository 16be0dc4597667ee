//! The offline cache manager and its lifecycle.
//!
//! A manager owns one versioned cache store. It pre-caches a fixed asset
//! list on install, purges every other store on activate, and answers
//! fetches cache-first with a network fallback and an offline document.

mod events;
mod lifecycle;
mod manager;
mod precache;

#[cfg(test)]
pub(crate) mod testing;

pub use events::{EventResult, ExtendableEvent, FetchEvent, WorkerEvent};
pub use lifecycle::WorkerState;
pub use manager::{ActivateOutcome, FetchOutcome, InstallOutcome, OfflineCacheManager, ResponseSource};
pub use precache::precache;

use url::Url;

use crate::{Error, resolve};

/// Versioned configuration for one manager instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Name of the active cache store; every other store is stale.
    pub cache_name: String,
    /// Base that relative asset paths were resolved against.
    pub scope: Url,
    /// Assets pre-cached on install, in order.
    pub assets: Vec<Url>,
    /// Cached document served when the network fails on a miss.
    pub offline_fallback: Option<Url>,
}

impl WorkerConfig {
    pub fn new(cache_name: impl Into<String>, scope: Url) -> Self {
        Self { cache_name: cache_name.into(), scope, assets: Vec::new(), offline_fallback: None }
    }

    /// Resolve `paths` against the scope and use them as the asset list.
    pub fn with_assets(mut self, paths: &[&str]) -> Result<Self, Error> {
        self.assets = paths
            .iter()
            .map(|path| resolve(&self.scope, path))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Resolve `path` against the scope and use it as the offline document.
    pub fn with_offline_fallback(mut self, path: &str) -> Result<Self, Error> {
        self.offline_fallback = Some(resolve(&self.scope, path)?);
        Ok(self)
    }
}
