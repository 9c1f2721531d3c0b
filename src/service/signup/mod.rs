//! Signup reconciliation.
//!
//! `SignupService` runs one OAuth callback through the signup state machine:
//!
//! 1. Open the state token to recover the Discord user (`InvalidState` on failure).
//! 2. Stop early if the user is already in the ledger (`AlreadyRegistered`).
//! 3. Exchange the code for an osu! profile (`ProviderUnavailable` on failure).
//! 4. Check the profile's country against the allow-list (`NotAllowed`).
//! 5. Insert into the ledger. Losing a race to a concurrent callback for the same user
//!    also ends in `AlreadyRegistered`.
//!
//! The ledger and the identity provider sit behind traits so callbacks can be driven
//! against test doubles.

pub mod ledger;
pub mod prompt;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::{
    error::{
        signup::{ProviderError, SignupError},
        token::TokenError,
    },
    model::signup::{CreateSignupParam, ExternalProfile, SignupRecord},
    service::token::SignupTokenCodec,
};

/// Converts a single-use authorization code into the profile that approved it.
#[async_trait]
pub trait IdentityExchange: Send + Sync {
    async fn exchange_code_for_profile(&self, code: &str) -> Result<ExternalProfile, ProviderError>;
}

/// Durable record of completed signups.
#[async_trait]
pub trait SignupLedger: Send + Sync {
    /// Checks whether the Discord user already has a signup.
    async fn exists(&self, discord_id: u64) -> Result<bool, DbErr>;

    /// Finds the Discord user's signup.
    async fn find(&self, discord_id: u64) -> Result<Option<SignupRecord>, DbErr>;

    /// Inserts a signup atomically.
    ///
    /// Returns `Ok(None)` when a signup for the same Discord user already exists.
    async fn insert(&self, param: CreateSignupParam) -> Result<Option<SignupRecord>, DbErr>;
}

/// Completes signups from OAuth callbacks.
#[derive(Clone)]
pub struct SignupService {
    codec: SignupTokenCodec,
    ledger: Arc<dyn SignupLedger>,
    identity: Arc<dyn IdentityExchange>,
    allowed_countries: Arc<[String]>,
}

impl SignupService {
    /// Creates a new SignupService.
    ///
    /// # Arguments
    /// - `codec` - Codec for the state tokens sent out in registration prompts
    /// - `ledger` - Signup ledger
    /// - `identity` - osu! identity exchange
    /// - `allowed_countries` - Upper-cased country codes permitted to sign up
    pub fn new(
        codec: SignupTokenCodec,
        ledger: Arc<dyn SignupLedger>,
        identity: Arc<dyn IdentityExchange>,
        allowed_countries: Vec<String>,
    ) -> Self {
        Self {
            codec,
            ledger,
            identity,
            allowed_countries: allowed_countries.into(),
        }
    }

    /// Runs a callback through the signup state machine.
    ///
    /// # Arguments
    /// - `code` - Authorization code from the osu! redirect
    /// - `state` - Signup token from the osu! redirect
    ///
    /// # Returns
    /// - `Ok(SignupRecord)` - Signup recorded
    /// - `Err(SignupError)` - The most specific reason the signup did not complete
    pub async fn complete(&self, code: &str, state: &str) -> Result<SignupRecord, SignupError> {
        let discord_id = self.codec.decode(state)?;

        if self.ledger.exists(discord_id).await? {
            return Err(SignupError::AlreadyRegistered(discord_id));
        }

        let profile = self.identity.exchange_code_for_profile(code).await?;

        let country = profile.country_code.to_ascii_uppercase();
        if !self.is_allowed(&country) {
            return Err(SignupError::NotAllowed {
                osu_id: profile.osu_id,
                country,
                allowed: self.allowed_countries.to_vec(),
            });
        }

        let record = self
            .ledger
            .insert(CreateSignupParam {
                discord_id,
                osu_id: profile.osu_id,
                country_code: country,
            })
            .await?
            .ok_or(SignupError::AlreadyRegistered(discord_id))?;

        tracing::info!(
            discord_id = record.discord_id,
            osu_id = record.osu_id,
            username = %profile.username,
            "Signup completed"
        );

        Ok(record)
    }

    /// Looks up a Discord user's signup.
    pub async fn registration(&self, discord_id: u64) -> Result<Option<SignupRecord>, SignupError> {
        Ok(self.ledger.find(discord_id).await?)
    }

    /// Seals a state token for a registration prompt.
    pub fn issue_state(&self, discord_id: u64) -> Result<String, TokenError> {
        self.codec.encode(discord_id)
    }

    fn is_allowed(&self, country: &str) -> bool {
        self.allowed_countries.iter().any(|allowed| allowed == country)
    }
}
