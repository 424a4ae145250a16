//! Tag catalog and per-entry tag sets.

pub mod service;

pub use service::TagService;
