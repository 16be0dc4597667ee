//! Errors raised by the host before a request reaches the manager.

use swcache_core::Error;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A command-line URL could not be resolved against the scope.
    #[error("INVALID_ARGUMENT: {input}: {source}")]
    InvalidArgument {
        input: String,
        #[source]
        source: Error,
    },

    /// The lifecycle event did not settle with the expected result.
    #[error("UNEXPECTED_RESULT: {0}")]
    UnexpectedResult(&'static str),
}
