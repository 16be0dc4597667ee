//! Drives a manager through host events and reports what happened.

use serde::Serialize;
use swcache_client::{FetchClient, FetchConfig};
use swcache_core::worker::{EventResult, InstallOutcome, ResponseSource, WorkerEvent};
use swcache_core::{AppConfig, CacheDb, CacheStorage, Network, OfflineCacheManager, Request};

use crate::cli::Command;
use crate::error::HostError;

/// One line of command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Report {
    Install { cache: String, cached: bool, entries: usize, error: Option<String> },
    Activate { cache: String, deleted: Vec<String> },
    Fetch { url: String, status: Option<u16>, source: Option<&'static str>, bytes: usize, error: Option<String> },
    Cache { name: String, entries: u64, current: bool },
}

fn source_name(source: ResponseSource) -> &'static str {
    match source {
        ResponseSource::Cache => "cache",
        ResponseSource::Network => "network",
        ResponseSource::OfflineFallback => "offline_fallback",
        ResponseSource::Passthrough => "passthrough",
    }
}

pub struct Host<S, N> {
    manager: OfflineCacheManager<S, N>,
}

impl Host<CacheDb, FetchClient> {
    /// Open the configured database and build a manager over the HTTP client.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let worker = config.worker_config()?;
        let storage = CacheDb::open(&config.db_path).await?;
        let network = FetchClient::new(FetchConfig::from(config))?;
        Ok(Self::new(OfflineCacheManager::new(worker, storage, network)))
    }
}

impl<S: CacheStorage, N: Network> Host<S, N> {
    pub fn new(manager: OfflineCacheManager<S, N>) -> Self {
        Self { manager }
    }

    pub async fn run(&self, command: Command) -> anyhow::Result<Vec<Report>> {
        let mut reports = Vec::new();
        match command {
            Command::Install => reports.push(self.install().await?),
            Command::Activate => {
                reports.push(self.install().await?);
                reports.push(self.activate().await?);
            }
            Command::Fetch { urls } | Command::Run { urls } => {
                // Resolve everything up front so a typo fails before any network work.
                let requests = urls
                    .iter()
                    .map(|input| {
                        Request::get_relative(&self.manager.config().scope, input)
                            .map_err(|source| HostError::InvalidArgument { input: input.clone(), source })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                reports.push(self.install().await?);
                reports.push(self.activate().await?);
                for request in requests {
                    reports.push(self.fetch(request).await?);
                }
            }
            Command::Caches => reports.extend(self.caches().await?),
        }
        Ok(reports)
    }

    async fn install(&self) -> anyhow::Result<Report> {
        let EventResult::Installed(outcome) = self.manager.dispatch(WorkerEvent::Install).await? else {
            return Err(HostError::UnexpectedResult("install").into());
        };
        Ok(match outcome {
            InstallOutcome::Cached { cache, entries } => Report::Install { cache, cached: true, entries, error: None },
            InstallOutcome::Degraded { cache, error } => {
                Report::Install { cache, cached: false, entries: 0, error: Some(error) }
            }
        })
    }

    async fn activate(&self) -> anyhow::Result<Report> {
        let EventResult::Activated(outcome) = self.manager.dispatch(WorkerEvent::Activate).await? else {
            return Err(HostError::UnexpectedResult("activate").into());
        };
        Ok(Report::Activate { cache: outcome.cache, deleted: outcome.deleted })
    }

    /// Failures stay local to the request and are reported, not raised.
    async fn fetch(&self, request: Request) -> anyhow::Result<Report> {
        let url = request.url().to_string();
        match self.manager.dispatch(WorkerEvent::Fetch(request)).await {
            Ok(EventResult::Responded(outcome)) => Ok(Report::Fetch {
                url,
                status: Some(outcome.response.status),
                source: Some(source_name(outcome.source)),
                bytes: outcome.response.body.len(),
                error: None,
            }),
            Ok(_) => Err(HostError::UnexpectedResult("fetch").into()),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "request failed");
                Ok(Report::Fetch { url, status: None, source: None, bytes: 0, error: Some(err.to_string()) })
            }
        }
    }

    async fn caches(&self) -> anyhow::Result<Vec<Report>> {
        let storage = self.manager.storage();
        let current = &self.manager.config().cache_name;
        let mut reports = Vec::new();
        for name in storage.keys().await? {
            let entries = storage.entry_count(&name).await?;
            reports.push(Report::Cache { current: name == *current, name, entries });
        }
        Ok(reports)
    }
}
