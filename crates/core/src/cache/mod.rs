//! SQLite-backed cache stores for pre-cached request/response pairs.
//!
//! This module provides persistent, named cache stores using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - Request keys derived from SHA-256 over method and URL
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Atomic bulk population of a store

pub mod connection;
pub mod hash;
pub mod migrations;
pub mod storage;

pub use crate::Error;

pub use connection::CacheDb;
pub use storage::CacheStorage;
