//! Error types shared by the session and persistence layers.
//!
//! Only [`Error::EmailRequired`] and [`Error::PasswordTooShort`] are ever
//! shown to the player. Storage and serialization failures are logged and
//! surfaced through the sync status.

/// Errors produced by the login form, the session store and the game
/// persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The login form was submitted without an email.
    #[error("Please enter your email")]
    EmailRequired,

    /// The password given at login is shorter than the required minimum.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// `window.localStorage` is not available (private mode, no window).
    #[error("Local storage is unavailable")]
    StorageUnavailable,

    /// The browser rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
