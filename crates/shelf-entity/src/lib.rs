//! # shelf-entity
//!
//! Domain entity models for Shelf. Every struct in this crate represents a
//! database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod activity;
pub mod entry;
pub mod quota;
pub mod share;
pub mod tag;
pub mod token;
pub mod user;
