//! # shelf-database
//!
//! PostgreSQL connection management, the [`NamespaceStore`] trait over the
//! prefix-addressed entry table, and concrete repository implementations
//! for all Shelf entities.

pub mod connection;
pub mod migration;
pub mod namespace;
pub mod repositories;

pub use connection::DatabasePool;
pub use namespace::NamespaceStore;
