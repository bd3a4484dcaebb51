//! Credential handling for the Skylab backend: argon2 password hashes and
//! the HS256 JWTs handed out at login.

use thiserror::Error;

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenManager};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
    #[error("stored password hash is malformed")]
    MalformedHash,
    #[error("failed to issue token: {0}")]
    TokenCreation(String),
    #[error("token has expired")]
    TokenExpired,
    #[error("invalid token")]
    InvalidToken,
}
