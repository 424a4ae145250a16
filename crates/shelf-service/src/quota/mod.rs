//! Storage quota viewing and adjustment.

pub mod service;

pub use service::QuotaService;
