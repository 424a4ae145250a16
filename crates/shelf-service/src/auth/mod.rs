//! Registration, login, and token lifecycle.

pub mod service;

pub use service::{AuthService, AuthSession, LoginParams, RegisterParams};
