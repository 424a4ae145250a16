//! Sharing between users and public access links.

pub mod link;
pub mod service;

pub use link::LinkService;
pub use service::{CreateShare, ShareService};
