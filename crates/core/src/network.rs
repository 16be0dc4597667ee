//! The network collaborator consulted on cache misses and during pre-cache.

use async_trait::async_trait;

use crate::{Error, Request, Response};

/// Anything that can turn a request into a response over the network.
///
/// Implementations resolve with `Ok` for every HTTP status the server
/// sends back, including 4xx/5xx. `Err` means the exchange itself failed.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, Error>;
}

#[async_trait]
impl<N: Network + ?Sized> Network for std::sync::Arc<N> {
    async fn fetch(&self, request: &Request) -> Result<Response, Error> {
        (**self).fetch(request).await
    }
}
