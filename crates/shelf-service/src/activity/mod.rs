//! Activity audit trail.

pub mod service;

pub use service::ActivityService;
