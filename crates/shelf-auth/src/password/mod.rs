//! Password hashing and policy enforcement.

pub mod hasher;
pub mod strength;

pub use hasher::PasswordHasher;
pub use strength::PasswordPolicy;
