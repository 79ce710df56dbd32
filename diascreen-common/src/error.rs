//! Common error types for DiaScreen

use thiserror::Error;

/// Common result type for DiaScreen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared across DiaScreen crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Username already taken at registration
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Unknown username or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password hashing or hash parsing failure
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Uploaded bytes could not be decoded as an image
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Model execution failure
    #[error("Inference error: {0}")]
    Inference(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
