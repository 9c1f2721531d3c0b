//! Signup state tokens.
//!
//! A token binds a Discord user ID to the time it was issued. It travels through the
//! user's browser and the osu! redirect as the OAuth `state`, so it is sealed with
//! AES-256-GCM: the ID cannot be read or altered without the key.
//!
//! Layout before base64 (URL-safe, unpadded): `nonce (12) || ciphertext || tag (16)`,
//! where the plaintext is `issued_at (u64 BE, unix seconds) || discord_id (u64 BE)`.

use std::time::Duration;

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use rand::Rng;

use crate::error::token::TokenError;

const NONCE_SIZE: usize = 12;
const PLAINTEXT_SIZE: usize = 16;
const TAG_SIZE: usize = 16;

/// Binds tokens to this purpose so a ciphertext made for anything else under the same
/// key never opens as a signup token.
const ASSOCIATED_DATA: &[u8] = b"anzt-signup-v1";

/// Seals and opens signup state tokens with a process-wide key.
#[derive(Clone)]
pub struct SignupTokenCodec {
    cipher: Aes256Gcm,
    max_age: Duration,
}

impl std::fmt::Debug for SignupTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupTokenCodec")
            .field("cipher", &"[REDACTED]")
            .field("max_age", &self.max_age)
            .finish()
    }
}

impl SignupTokenCodec {
    /// Creates a codec from a raw 32-byte key.
    ///
    /// # Arguments
    /// - `key_bytes` - AES-256 key, exactly 32 bytes
    /// - `max_age` - How long after issue a token is still accepted
    ///
    /// # Returns
    /// - `Ok(SignupTokenCodec)` - Codec ready for use
    /// - `Err(TokenError::InvalidKey)` - Key is not 32 bytes
    pub fn new(key_bytes: &[u8], max_age: Duration) -> Result<Self, TokenError> {
        if key_bytes.len() != 32 {
            return Err(TokenError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                key_bytes.len()
            )));
        }

        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
            max_age,
        })
    }

    /// Creates a codec from a base64-encoded key, as stored in `SIGNUP_TOKEN_KEY`.
    ///
    /// Both standard and URL-safe alphabets are accepted.
    pub fn from_base64_key(encoded: &str, max_age: Duration) -> Result<Self, TokenError> {
        let encoded = encoded.trim();
        let key_bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .or_else(|_| base64::engine::general_purpose::URL_SAFE.decode(encoded))
            .or_else(|_| URL_SAFE_NO_PAD.decode(encoded))
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;

        Self::new(&key_bytes, max_age)
    }

    /// Seals a token for a Discord user, issued now.
    pub fn encode(&self, discord_id: u64) -> Result<String, TokenError> {
        self.encode_at(discord_id, unix_now())
    }

    /// Seals a token as if issued at `issued_at` (unix seconds).
    pub(crate) fn encode_at(&self, discord_id: u64, issued_at: u64) -> Result<String, TokenError> {
        let mut plaintext = [0u8; PLAINTEXT_SIZE];
        plaintext[..8].copy_from_slice(&issued_at.to_be_bytes());
        plaintext[8..].copy_from_slice(&discord_id.to_be_bytes());

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rng().fill(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(
                nonce,
                Payload {
                    msg: &plaintext,
                    aad: ASSOCIATED_DATA,
                },
            )
            .map_err(|_| TokenError::Seal)?;

        let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(combined))
    }

    /// Opens a token and returns the Discord user ID it was issued for.
    ///
    /// # Returns
    /// - `Ok(u64)` - Discord ID the token was sealed for
    /// - `Err(TokenError::Invalid)` - Malformed, tampered with, or sealed under another key
    /// - `Err(TokenError::Expired)` - Authentic but older than the maximum age
    pub fn decode(&self, token: &str) -> Result<u64, TokenError> {
        let combined = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| TokenError::Invalid)?;

        if combined.len() != NONCE_SIZE + PLAINTEXT_SIZE + TAG_SIZE {
            return Err(TokenError::Invalid);
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: ciphertext,
                    aad: ASSOCIATED_DATA,
                },
            )
            .map_err(|_| TokenError::Invalid)?;

        let plaintext: [u8; PLAINTEXT_SIZE] =
            plaintext.try_into().map_err(|_| TokenError::Invalid)?;
        let issued_at = u64::from_be_bytes(split_word(&plaintext, 0));
        let discord_id = u64::from_be_bytes(split_word(&plaintext, 8));

        // Tokens issued slightly in the future (clock skew) count as fresh.
        let age_secs = unix_now().saturating_sub(issued_at);
        if age_secs > self.max_age.as_secs() {
            return Err(TokenError::Expired { age_secs });
        }

        Ok(discord_id)
    }
}

fn split_word(bytes: &[u8; PLAINTEXT_SIZE], offset: usize) -> [u8; 8] {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[offset..offset + 8]);
    word
}

fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
