use thiserror::Error;

/// Failures creating or opening a signup state token.
///
/// Any failure to open a token means the token must be rejected; there is no fallback
/// to a partially decoded value.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The configured key is not a base64-encoded 32-byte key.
    #[error("Signup token key must be 32 bytes of base64: {0}")]
    InvalidKey(String),

    /// Encryption failed.
    #[error("Failed to seal signup token")]
    Seal,

    /// The token is not valid base64, was tampered with, or was sealed with another key.
    #[error("Signup token failed to authenticate")]
    Invalid,

    /// The token authenticated but is older than the allowed age.
    #[error("Signup token expired {age_secs}s after issue")]
    Expired { age_secs: u64 },
}
