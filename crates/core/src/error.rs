//! Unified error types for swcache.
//!
//! Display strings carry a stable code prefix so log lines can be grepped
//! by failure class.

use tokio_rusqlite::rusqlite;

/// Unified error type shared by the cache manager and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an empty cache name).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row could not be decoded.
    #[error("CACHE_ERROR: corrupt entry: {0}")]
    CorruptEntry(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure: DNS, connect, TLS, reset.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Bulk pre-cache did not complete; nothing was committed.
    #[error("PRECACHE_FAILED: {failed} of {total} assets failed for {cache} (first: {reason})")]
    PrecacheFailed { cache: String, failed: usize, total: usize, reason: String },

    /// Network unavailable and no offline fallback could be served.
    #[error("OFFLINE: {0}")]
    Offline(String),

    /// Lifecycle event arrived in the wrong state.
    #[error("INVALID_STATE: {0}")]
    InvalidState(String),

    /// A fetch event was given a second response.
    #[error("ALREADY_RESPONDED: {0}")]
    AlreadyResponded(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Offline("https://example.com/page".to_string());
        assert!(err.to_string().starts_with("OFFLINE"));
        assert!(err.to_string().contains("https://example.com/page"));
    }

    #[test]
    fn test_precache_failed_display() {
        let err = Error::PrecacheFailed {
            cache: "v1".to_string(),
            failed: 1,
            total: 5,
            reason: "status 404".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("PRECACHE_FAILED"));
        assert!(text.contains("1 of 5"));
        assert!(text.contains("status 404"));
    }
}
