//! User profile self-service.

pub mod service;

pub use service::{UpdateProfile, UserService};
