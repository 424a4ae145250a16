//! Search over a user's entries.

pub mod service;

pub use service::SearchService;
