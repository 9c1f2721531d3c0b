//! Test doubles for the signup seams.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::{
    error::signup::ProviderError,
    model::signup::{CreateSignupParam, ExternalProfile, SignupRecord},
    service::{
        signup::{IdentityExchange, SignupLedger},
        token::SignupTokenCodec,
    },
};

pub(crate) const TEST_KEY: [u8; 32] = [42u8; 32];

pub(crate) fn codec() -> SignupTokenCodec {
    SignupTokenCodec::new(&TEST_KEY, Duration::from_secs(60 * 60)).unwrap()
}

/// Identity provider returning a fixed profile for any code.
pub(crate) struct FakeIdentity {
    profile: Option<ExternalProfile>,
    calls: AtomicUsize,
}

impl FakeIdentity {
    pub(crate) fn new(osu_id: i64, country_code: &str) -> Self {
        Self {
            profile: Some(ExternalProfile {
                osu_id,
                username: format!("player{osu_id}"),
                country_code: country_code.to_string(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider that rejects every code.
    pub(crate) fn failing() -> Self {
        Self {
            profile: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityExchange for FakeIdentity {
    async fn exchange_code_for_profile(&self, _code: &str) -> Result<ExternalProfile, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profile
            .clone()
            .ok_or_else(|| ProviderError::ExchangeFailed("invalid_grant".to_string()))
    }
}

/// Ledger whose every operation fails.
pub(crate) struct FailingLedger;

#[async_trait]
impl SignupLedger for FailingLedger {
    async fn exists(&self, _discord_id: u64) -> Result<bool, DbErr> {
        Err(DbErr::Custom("injected ledger fault".to_string()))
    }

    async fn find(&self, _discord_id: u64) -> Result<Option<SignupRecord>, DbErr> {
        Err(DbErr::Custom("injected ledger fault".to_string()))
    }

    async fn insert(&self, _param: CreateSignupParam) -> Result<Option<SignupRecord>, DbErr> {
        Err(DbErr::Custom("injected ledger fault".to_string()))
    }
}

/// Ledger that fails its first operation and delegates to `inner` afterwards.
pub(crate) struct FlakyLedger<L> {
    inner: L,
    tripped: AtomicBool,
}

impl<L> FlakyLedger<L> {
    pub(crate) fn new(inner: L) -> Self {
        Self {
            inner,
            tripped: AtomicBool::new(false),
        }
    }

    fn trip(&self) -> Result<(), DbErr> {
        if self.tripped.swap(true, Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DbErr::Custom("injected ledger fault".to_string()))
        }
    }
}

#[async_trait]
impl<L: SignupLedger> SignupLedger for FlakyLedger<L> {
    async fn exists(&self, discord_id: u64) -> Result<bool, DbErr> {
        self.trip()?;
        self.inner.exists(discord_id).await
    }

    async fn find(&self, discord_id: u64) -> Result<Option<SignupRecord>, DbErr> {
        self.trip()?;
        self.inner.find(discord_id).await
    }

    async fn insert(&self, param: CreateSignupParam) -> Result<Option<SignupRecord>, DbErr> {
        self.trip()?;
        self.inner.insert(param).await
    }
}

/// Ledger that panics, for exercising the receiver's isolation.
pub(crate) struct PanickingLedger;

#[async_trait]
impl SignupLedger for PanickingLedger {
    async fn exists(&self, _discord_id: u64) -> Result<bool, DbErr> {
        panic!("ledger exploded")
    }

    async fn find(&self, _discord_id: u64) -> Result<Option<SignupRecord>, DbErr> {
        panic!("ledger exploded")
    }

    async fn insert(&self, _param: CreateSignupParam) -> Result<Option<SignupRecord>, DbErr> {
        panic!("ledger exploded")
    }
}
