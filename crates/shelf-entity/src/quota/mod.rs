//! Quota domain entities.

pub mod model;

pub use model::UserQuota;
