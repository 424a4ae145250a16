//! Core traits defined in `shelf-core` and implemented by other crates.

pub mod object_store;

pub use object_store::{object_key, ByteStream, ObjectStore};
