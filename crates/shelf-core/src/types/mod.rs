//! Core type definitions used across the Shelf workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
