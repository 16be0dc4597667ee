//! All-or-nothing bulk population of a cache store.

use futures_util::future::join_all;
use url::Url;

use crate::cache::CacheStorage;
use crate::network::Network;
use crate::{Error, Request};

/// Fetch every asset and commit them to `cache_name` only if all succeeded.
///
/// Fetches run concurrently. A transport error or a non-2xx status on any
/// asset aborts the whole operation before anything touches storage, so a
/// store that did not exist stays absent. Returns the number of committed entries.
pub async fn precache<S, N>(storage: &S, network: &N, cache_name: &str, assets: &[Url]) -> Result<usize, Error>
where
    S: CacheStorage + ?Sized,
    N: Network + ?Sized,
{
    let requests: Vec<Request> = assets.iter().cloned().map(Request::get).collect();
    let results = join_all(requests.iter().map(|request| network.fetch(request))).await;

    let mut entries = Vec::with_capacity(requests.len());
    let mut failures = Vec::new();
    for (request, result) in requests.into_iter().zip(results) {
        match result {
            Ok(response) if response.is_ok() => entries.push((request, response)),
            Ok(response) => failures.push(format!("{request}: status {}", response.status)),
            Err(e) => failures.push(format!("{request}: {e}")),
        }
    }

    if let Some(reason) = failures.first() {
        return Err(Error::PrecacheFailed {
            cache: cache_name.to_string(),
            failed: failures.len(),
            total: assets.len(),
            reason: reason.clone(),
        });
    }

    let count = entries.len();
    storage.put_all(cache_name, entries).await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheDb;
    use crate::worker::testing::StubNetwork;

    fn assets(paths: &[&str]) -> Vec<Url> {
        let base = Url::parse("https://example.com/docs/").unwrap();
        paths.iter().map(|p| base.join(p).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_precache_commits_everything() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let network = StubNetwork::new()
            .serve("https://example.com/docs/", "root")
            .serve("https://example.com/docs/index.html", "index");

        let count = precache(&db, &network, "v1", &assets(&["./", "./index.html"])).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(db.entry_count("v1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_precache_404_leaves_store_absent() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let network = StubNetwork::new().serve("https://example.com/docs/", "root");

        let result = precache(&db, &network, "v1", &assets(&["./", "./missing.css"])).await;

        match result {
            Err(Error::PrecacheFailed { failed, total, reason, .. }) => {
                assert_eq!(failed, 1);
                assert_eq!(total, 2);
                assert!(reason.contains("404"));
            }
            other => panic!("expected PrecacheFailed, got {other:?}"),
        }
        assert!(!db.has("v1").await.unwrap());
    }

    #[tokio::test]
    async fn test_precache_offline_leaves_existing_store_unchanged() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let network = StubNetwork::new().serve("https://example.com/docs/", "root");
        precache(&db, &network, "v1", &assets(&["./"])).await.unwrap();

        network.set_offline(true);
        assert!(precache(&db, &network, "v1", &assets(&["./", "./index.html"])).await.is_err());

        assert_eq!(db.entry_count("v1").await.unwrap(), 1);
    }
}
