//! Signup domain models and parameters.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A verified tournament signup linking a Discord user to an osu! account.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupRecord {
    /// Discord ID of the user, unique across signups.
    pub discord_id: u64,
    /// osu! user ID confirmed through OAuth.
    pub osu_id: i64,
    /// Country code of the osu! account at signup time.
    pub country_code: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for recording a new signup.
#[derive(Debug, Clone)]
pub struct CreateSignupParam {
    pub discord_id: u64,
    pub osu_id: i64,
    pub country_code: String,
}

/// The osu! account behind an authorization code.
///
/// Only lives for the duration of one callback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalProfile {
    /// osu! user ID.
    #[serde(rename = "id")]
    pub osu_id: i64,
    pub username: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
}
