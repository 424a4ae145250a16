//! # shelf-service
//!
//! Business logic services for Shelf. Each service owns one slice of the
//! domain and composes repositories, the namespace store, and the blob
//! store; handlers in `shelf-api` stay thin.

pub mod activity;
pub mod auth;
pub mod folder;
pub mod object;
pub mod quota;
pub mod search;
pub mod share;
pub mod tag;
pub mod user;

pub use activity::ActivityService;
pub use auth::AuthService;
pub use folder::{FolderListing, FolderService};
pub use object::ObjectService;
pub use quota::QuotaService;
pub use search::SearchService;
pub use share::{LinkService, ShareService};
pub use tag::TagService;
pub use user::UserService;
