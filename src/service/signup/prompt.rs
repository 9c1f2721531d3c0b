//! Registration prompt tracking.
//!
//! This module provides the `PromptTracker`, an in-memory record of the Discord users
//! that have recently been sent a registration prompt. It only stops the bot from
//! sending the same invitation twice, e.g. when a user reacts to the registration
//! message repeatedly; whether someone is registered is always answered by the signup
//! ledger.
//!
//! Entries expire after a configured time and the tracker holds a bounded number of
//! users. A user who expired or was evicted is simply prompted again.

use std::time::Duration;

use moka::future::Cache;

/// Users remembered at most, unless configured otherwise.
pub const DEFAULT_PROMPT_TRACKER_CAPACITY: u64 = 10_000;

/// How long a prompt suppresses the next one, unless configured otherwise.
pub const DEFAULT_PROMPT_TRACKER_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Set of Discord users recently prompted to register.
///
/// Cheap to clone; clones share the same set.
#[derive(Clone)]
pub struct PromptTracker {
    prompted: Cache<u64, ()>,
}

impl PromptTracker {
    /// Creates an empty tracker.
    ///
    /// # Arguments
    /// - `capacity` - Most users remembered at once
    /// - `ttl` - How long a user stays marked after being prompted
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let prompted = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { prompted }
    }

    /// Checks whether a user has recently been sent a prompt.
    pub async fn has_been_prompted(&self, discord_id: u64) -> bool {
        self.prompted.contains_key(&discord_id)
    }

    /// Records that a prompt was delivered to a user.
    ///
    /// Only call after the prompt was actually sent, so a user whose DMs were closed can
    /// be prompted again later.
    ///
    /// # Returns
    /// - `true` - The user was not tracked before
    /// - `false` - The user was already tracked
    pub async fn mark_prompted(&self, discord_id: u64) -> bool {
        self.prompted.entry(discord_id).or_insert(()).await.is_fresh()
    }

    /// Forgets every prompted user.
    ///
    /// # Returns
    /// - `u64` - Number of users that were tracked
    pub async fn reset(&self) -> u64 {
        self.prompted.run_pending_tasks().await;
        let cleared = self.prompted.entry_count();

        self.prompted.invalidate_all();
        self.prompted.run_pending_tasks().await;

        cleared
    }
}

impl Default for PromptTracker {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_TRACKER_CAPACITY, DEFAULT_PROMPT_TRACKER_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests marking and checking a prompted user.
    ///
    /// Expected: only the marked user is reported as prompted
    #[tokio::test]
    async fn tracks_prompted_users() {
        let tracker = PromptTracker::default();
        assert!(!tracker.has_been_prompted(1).await);

        assert!(tracker.mark_prompted(1).await);
        assert!(!tracker.mark_prompted(1).await);

        assert!(tracker.has_been_prompted(1).await);
        assert!(!tracker.has_been_prompted(2).await);
    }

    /// Tests that clones share state.
    ///
    /// Expected: a user marked through one clone is visible through another
    #[tokio::test]
    async fn clones_share_state() {
        let tracker = PromptTracker::default();
        let clone = tracker.clone();

        clone.mark_prompted(5).await;

        assert!(tracker.has_been_prompted(5).await);
    }

    /// Tests resetting the tracker.
    ///
    /// Expected: reset reports the cleared count and users can be prompted again
    #[tokio::test]
    async fn reset_clears_all_users() {
        let tracker = PromptTracker::default();
        tracker.mark_prompted(1).await;
        tracker.mark_prompted(2).await;

        assert_eq!(tracker.reset().await, 2);
        assert!(!tracker.has_been_prompted(1).await);
        assert!(tracker.mark_prompted(1).await);
        assert_eq!(tracker.reset().await, 1);
        assert_eq!(tracker.reset().await, 0);
    }

    /// Tests that a prompt stops suppressing repeats once it expires.
    ///
    /// Expected: the user can be marked again and reset only counts live entries
    #[tokio::test]
    async fn expired_users_can_be_prompted_again() {
        let tracker = PromptTracker::new(100, Duration::from_millis(50));
        tracker.mark_prompted(1).await;

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(!tracker.has_been_prompted(1).await);
        assert!(tracker.mark_prompted(1).await);
        assert_eq!(tracker.reset().await, 1);
    }

    /// Tests that the tracker never holds more users than its capacity.
    ///
    /// Expected: entry count bounded after marking more users than fit
    #[tokio::test]
    async fn stays_within_capacity() {
        let tracker = PromptTracker::new(4, DEFAULT_PROMPT_TRACKER_TTL);
        for discord_id in 0..64 {
            tracker.mark_prompted(discord_id).await;
        }

        tracker.prompted.run_pending_tasks().await;
        assert!(tracker.prompted.entry_count() <= 4);
        assert!(tracker.reset().await <= 4);
    }
}
