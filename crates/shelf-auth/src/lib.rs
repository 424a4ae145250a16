//! # shelf-auth
//!
//! Stateless authentication primitives for Shelf.
//!
//! - `jwt`: access/refresh token issuance and validation
//! - `password`: Argon2id hashing and password policy
//!
//! Refresh token revocation is not handled here; the service layer
//! compares presented refresh tokens against the single stored row per
//! user, so stolen-but-rotated tokens die on first reuse.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordPolicy};
