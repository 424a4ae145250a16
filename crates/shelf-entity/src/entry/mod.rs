//! Storage entry domain entities.

pub mod model;

pub use model::{extension_of, NewEntry, StorageEntry, META_PREVIOUS_VERSION};
