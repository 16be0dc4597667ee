//! Offline cache manager: install, activate and fetch handlers.

use futures_util::future::join_all;

use super::events::{EventResult, ExtendableEvent, FetchEvent, WorkerEvent};
use super::lifecycle::{Lifecycle, WorkerState};
use super::precache::precache;
use super::WorkerConfig;
use crate::cache::CacheStorage;
use crate::network::Network;
use crate::{Error, Request, Response};

/// How an install settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Every asset was fetched and committed.
    Cached { cache: String, entries: usize },
    /// Pre-cache failed; the worker is installed with partial offline coverage.
    Degraded { cache: String, error: String },
}

impl InstallOutcome {
    pub fn is_cached(&self) -> bool {
        matches!(self, InstallOutcome::Cached { .. })
    }
}

/// Result of activation cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateOutcome {
    /// The store that survives.
    pub cache: String,
    /// Stale stores removed during activation.
    pub deleted: Vec<String>,
}

/// Where a fetch response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    /// Hit in the active store; the network was not touched.
    Cache,
    /// Miss answered by the network. Not written back.
    Network,
    /// Miss while offline, answered with the cached offline document.
    OfflineFallback,
    /// Worker not yet activated; request went straight to the network.
    Passthrough,
}

/// A resolved fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub response: Response,
    pub source: ResponseSource,
}

/// Maintains one versioned cache store and answers fetches from it.
///
/// The store name, asset list and fallback come from the [`WorkerConfig`]
/// given at construction, so several versions can run side by side
/// against the same storage.
pub struct OfflineCacheManager<S, N> {
    config: WorkerConfig,
    storage: S,
    network: N,
    lifecycle: Lifecycle,
}

impl<S: CacheStorage, N: Network> OfflineCacheManager<S, N> {
    pub fn new(config: WorkerConfig, storage: S, network: N) -> Self {
        Self { config, storage, network, lifecycle: Lifecycle::new() }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn state(&self) -> WorkerState {
        self.lifecycle.current().await
    }

    /// Pre-cache the asset list into the current store.
    ///
    /// Pre-cache failures are logged and reported as
    /// [`InstallOutcome::Degraded`]; the worker still reaches `Installed`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` unless the worker is freshly `Parsed`.
    pub async fn install(&self) -> Result<InstallOutcome, Error> {
        self.lifecycle.advance(WorkerState::Parsed).await?;

        let cache = self.config.cache_name.clone();
        tracing::info!(cache = %cache, assets = self.config.assets.len(), "installing");

        let outcome = match precache(&self.storage, &self.network, &cache, &self.config.assets).await {
            Ok(entries) => {
                tracing::info!(cache = %cache, entries, "pre-cached assets");
                InstallOutcome::Cached { cache, entries }
            }
            Err(err) => {
                tracing::error!(cache = %cache, error = %err, "failed to pre-cache");
                InstallOutcome::Degraded { cache, error: err.to_string() }
            }
        };

        self.lifecycle.advance(WorkerState::Installing).await?;
        Ok(outcome)
    }

    /// Delete every cache store other than the current one.
    ///
    /// Activation completes even if cleanup fails; the failure is logged and
    /// only the stores actually removed are reported.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` unless the worker is `Installed`.
    pub async fn activate(&self) -> Result<ActivateOutcome, Error> {
        self.lifecycle.advance(WorkerState::Installed).await?;

        let cache = self.config.cache_name.clone();
        let deleted = match self.purge_stale().await {
            Ok(deleted) => deleted,
            Err(err) => {
                tracing::error!(cache = %cache, error = %err, "failed to purge stale caches");
                Vec::new()
            }
        };

        if !deleted.is_empty() {
            tracing::info!(cache = %cache, deleted = ?deleted, "purged stale caches");
        }

        self.lifecycle.advance(WorkerState::Activating).await?;
        Ok(ActivateOutcome { cache, deleted })
    }

    /// Delete stale stores concurrently. A failed delete is logged and
    /// skipped; the rest still count.
    async fn purge_stale(&self) -> Result<Vec<String>, Error> {
        let stale: Vec<String> = self
            .storage
            .keys()
            .await?
            .into_iter()
            .filter(|name| *name != self.config.cache_name)
            .collect();

        let results = join_all(stale.iter().map(|name| self.storage.delete(name))).await;

        let mut deleted = Vec::with_capacity(stale.len());
        for (name, result) in stale.into_iter().zip(results) {
            match result {
                Ok(true) => deleted.push(name),
                Ok(false) => {}
                Err(err) => tracing::error!(stale = %name, error = %err, "failed to delete stale cache"),
            }
        }
        Ok(deleted)
    }

    /// Answer a request cache-first.
    ///
    /// Hit → stored response. Miss → network. Network failure → the cached
    /// offline document when there is one.
    ///
    /// # Errors
    ///
    /// Returns `Error::Offline` when the network fails and no fallback is
    /// cached, or the network error itself for uncontrolled requests.
    pub async fn handle_fetch(&self, request: &Request) -> Result<FetchOutcome, Error> {
        if !self.state().await.is_controlling() {
            let response = self.network.fetch(request).await?;
            return Ok(FetchOutcome { response, source: ResponseSource::Passthrough });
        }

        match self.storage.match_request(&self.config.cache_name, request).await {
            Ok(Some(response)) => {
                tracing::debug!(request = %request, "cache hit");
                return Ok(FetchOutcome { response, source: ResponseSource::Cache });
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(request = %request, error = %err, "cache lookup failed; trying network");
            }
        }

        match self.network.fetch(request).await {
            Ok(response) => Ok(FetchOutcome { response, source: ResponseSource::Network }),
            Err(err) => {
                tracing::warn!(request = %request, error = %err, "fetch failed; returning offline page instead");
                self.offline_fallback(request, err).await
            }
        }
    }

    async fn offline_fallback(&self, request: &Request, cause: Error) -> Result<FetchOutcome, Error> {
        let Some(fallback) = &self.config.offline_fallback else {
            return Err(Error::Offline(format!("{request}: {cause}")));
        };

        let fallback = Request::get(fallback.clone());
        match self.storage.match_request(&self.config.cache_name, &fallback).await? {
            Some(response) => Ok(FetchOutcome { response, source: ResponseSource::OfflineFallback }),
            None => Err(Error::Offline(format!("{request}: {cause}; {} not cached", fallback.url()))),
        }
    }

    /// Deliver a host event, holding it pending until its work settles.
    pub async fn dispatch(&self, event: WorkerEvent) -> Result<EventResult, Error> {
        let kind = event.kind();
        tracing::debug!(event = kind, cache = %self.config.cache_name, "dispatching");

        match event {
            WorkerEvent::Install => {
                let mut event = ExtendableEvent::new(kind);
                event.wait_until(self.install());
                single(event.settled().await?).map(EventResult::Installed)
            }
            WorkerEvent::Activate => {
                let mut event = ExtendableEvent::new(kind);
                event.wait_until(self.activate());
                single(event.settled().await?).map(EventResult::Activated)
            }
            WorkerEvent::Fetch(request) => {
                let mut event = FetchEvent::new(request.clone());
                event.respond_with(async move { self.handle_fetch(&request).await })?;
                event.settled().await.map(EventResult::Responded)
            }
        }
    }
}

fn single<T>(results: Vec<T>) -> Result<T, Error> {
    results
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidState("event settled without a result".into()))
}
