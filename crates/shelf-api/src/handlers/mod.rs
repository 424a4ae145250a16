//! HTTP request handlers, grouped by domain.

pub mod activity;
pub mod auth;
pub mod folder;
pub mod health;
pub mod link;
pub mod object;
pub mod quota;
pub mod search;
pub mod share;
pub mod tag;
pub mod user;
