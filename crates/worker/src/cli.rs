//! Command-line surface of the `swcache` binary.

use clap::{Parser, Subcommand};

/// Host an offline cache worker against the configured scope.
///
/// Every invocation is a fresh worker instance; it runs the lifecycle as far
/// as the command needs before doing its work.
#[derive(Debug, Parser)]
#[command(name = "swcache", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pre-cache the asset list into the current store.
    Install,
    /// Install, then purge every store except the current one.
    Activate,
    /// Install and activate, then answer each URL cache-first.
    Fetch {
        /// URLs relative to the scope, or absolute.
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Run the full lifecycle, then answer any given URLs.
    Run {
        /// URLs relative to the scope, or absolute.
        urls: Vec<String>,
    },
    /// List cache stores and their entry counts.
    Caches,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from(["swcache", "fetch", "./", "./reader.html"]).unwrap();
        match cli.command {
            Command::Fetch { urls } => assert_eq!(urls, vec!["./".to_string(), "./reader.html".to_string()]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_fetch_requires_url() {
        assert!(Cli::try_parse_from(["swcache", "fetch"]).is_err());
    }

    #[test]
    fn test_parse_run_with_and_without_urls() {
        match Cli::try_parse_from(["swcache", "run"]).unwrap().command {
            Command::Run { urls } => assert!(urls.is_empty()),
            other => panic!("unexpected command: {other:?}"),
        }
        match Cli::try_parse_from(["swcache", "run", "./library.html"]).unwrap().command {
            Command::Run { urls } => assert_eq!(urls, vec!["./library.html".to_string()]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_lifecycle_commands() {
        assert!(matches!(Cli::try_parse_from(["swcache", "install"]).unwrap().command, Command::Install));
        assert!(matches!(Cli::try_parse_from(["swcache", "activate"]).unwrap().command, Command::Activate));
        assert!(matches!(Cli::try_parse_from(["swcache", "caches"]).unwrap().command, Command::Caches));
    }
}
