//! Data layer for the Regna rules engine.
//!
//! Implements the store contract defined by `regna-engine` twice:
//!
//! - [`stores::PostgresStore`] -- the durable backend over `PostgreSQL`
//!   (jsonb documents plus an integer version column for conditional
//!   kingdom updates).
//! - [`memory::MemoryStore`] -- an in-memory backend with identical
//!   compare-and-swap semantics, used by engine tests and local
//!   development.
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool and configuration
//! - [`stores`] -- `PostgreSQL` implementations of the entity stores
//! - [`memory`] -- In-memory implementation of the entity stores
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod postgres;
pub mod stores;

// Re-export primary types for convenience.
pub use error::DbError;
pub use memory::MemoryStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use stores::PostgresStore;
