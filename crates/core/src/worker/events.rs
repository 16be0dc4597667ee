//! Event-lifetime primitives for lifecycle and fetch events.
//!
//! An [`ExtendableEvent`] stays pending until every future handed to
//! `wait_until` settles. A [`FetchEvent`] additionally carries the request
//! and accepts exactly one response future.

use std::future::Future;

use futures_util::future::{BoxFuture, join_all};

use super::manager::{ActivateOutcome, FetchOutcome, InstallOutcome};
use crate::{Error, Request};

/// Events the host delivers to a worker instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    Install,
    Activate,
    Fetch(Request),
}

impl WorkerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WorkerEvent::Install => "install",
            WorkerEvent::Activate => "activate",
            WorkerEvent::Fetch(_) => "fetch",
        }
    }
}

/// What a dispatched event settled with.
#[derive(Debug, Clone)]
pub enum EventResult {
    Installed(InstallOutcome),
    Activated(ActivateOutcome),
    Responded(FetchOutcome),
}

/// A lifecycle event whose lifetime can be extended by pending work.
pub struct ExtendableEvent<'a, T> {
    kind: &'static str,
    pending: Vec<BoxFuture<'a, Result<T, Error>>>,
}

impl<'a, T> ExtendableEvent<'a, T> {
    pub fn new(kind: &'static str) -> Self {
        Self { kind, pending: Vec::new() }
    }

    /// Keep the event pending until `future` settles.
    pub fn wait_until<F>(&mut self, future: F)
    where
        F: Future<Output = Result<T, Error>> + Send + 'a,
    {
        self.pending.push(Box::pin(future));
    }

    /// Number of futures holding the event open.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Wait for every pending future. Fails with the first error, in registration order.
    pub async fn settled(self) -> Result<Vec<T>, Error> {
        let results = join_all(self.pending).await;
        tracing::trace!(event = self.kind, settled = results.len(), "event settled");
        results.into_iter().collect()
    }
}

/// A fetch event: the intercepted request plus its single response slot.
pub struct FetchEvent<'a> {
    request: Request,
    response: Option<BoxFuture<'a, Result<FetchOutcome, Error>>>,
}

impl<'a> FetchEvent<'a> {
    pub fn new(request: Request) -> Self {
        Self { request, response: None }
    }

    /// Supply the response. A second call is rejected and the first response stands.
    pub fn respond_with<F>(&mut self, future: F) -> Result<(), Error>
    where
        F: Future<Output = Result<FetchOutcome, Error>> + Send + 'a,
    {
        if self.response.is_some() {
            return Err(Error::AlreadyResponded(self.request.to_string()));
        }
        self.response = Some(Box::pin(future));
        Ok(())
    }

    /// Wait for the response.
    pub async fn settled(self) -> Result<FetchOutcome, Error> {
        match self.response {
            Some(response) => response.await,
            None => Err(Error::InvalidState(format!("no response supplied for {}", self.request))),
        }
    }
}
