//! Network side of swcache.
//!
//! This crate provides the HTTP fetch client the offline cache manager
//! consults on cache misses and during pre-cache.

pub mod fetch;

pub use fetch::{FetchClient, FetchConfig};
