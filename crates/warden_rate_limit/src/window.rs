//! Per-actor, per-bucket sliding-window counters.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};
use warden_core::{ActorId, Bucket};

type Key = (ActorId, Bucket);

/// Sliding-window counter keyed by actor and bucket.
///
/// Each key owns an ordered sequence of timestamps. Every access prunes the
/// entries that have left the window, so memory is bounded by the number of
/// actions still inside their windows rather than by all-time volume.
///
/// Keys are locked independently: concurrent records for different actors or
/// buckets never contend on the same lock, and no operation holds two keys at
/// once.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use warden_core::{ActorId, Bucket};
/// use warden_rate_limit::WindowTracker;
///
/// let tracker = WindowTracker::new();
/// let actor = ActorId::new(1);
/// let window = Duration::from_secs(10);
/// let t0 = Instant::now();
///
/// assert_eq!(tracker.record(actor, Bucket::Bans, window, t0), 1);
/// assert_eq!(tracker.record(actor, Bucket::Bans, window, t0 + Duration::from_secs(3)), 2);
/// assert_eq!(tracker.record(actor, Bucket::Bans, window, t0 + Duration::from_secs(14)), 1);
/// ```
#[derive(Debug, Default)]
pub struct WindowTracker {
    buckets: DashMap<Key, VecDeque<Instant>>,
}

impl WindowTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action at `now` and return how many actions remain in the window.
    ///
    /// The sequence stays non-decreasing: a timestamp older than the newest stored
    /// one is recorded at the newest one's instant. Entries `t` with
    /// `now - t >= window` are then dropped.
    #[instrument(skip_all, fields(actor = actor.get(), %bucket, window_secs = window.as_secs()))]
    pub fn record(&self, actor: ActorId, bucket: Bucket, window: Duration, now: Instant) -> usize {
        let mut stamps = self.buckets.entry((actor, bucket)).or_default();

        let at = match stamps.back() {
            Some(&newest) if newest > now => {
                debug!("Out-of-order timestamp clamped to newest entry");
                newest
            }
            _ => now,
        };
        stamps.push_back(at);
        prune(&mut stamps, window, at);

        let count = stamps.len();
        trace!(count, "Recorded action");
        count
    }

    /// Count the actions inside the window without recording a new one.
    pub fn count(&self, actor: ActorId, bucket: Bucket, window: Duration, now: Instant) -> usize {
        let key = (actor, bucket);
        let count = match self.buckets.get_mut(&key) {
            Some(mut stamps) => {
                prune(&mut stamps, window, now);
                stamps.len()
            }
            None => return 0,
        };

        if count == 0 {
            self.buckets.remove_if(&key, |_, stamps| stamps.is_empty());
        }
        count
    }

    /// Prune every key against its bucket's window and drop keys left empty.
    ///
    /// Returns the number of keys removed.
    #[instrument(skip_all)]
    pub fn sweep<F>(&self, now: Instant, window_for: F) -> usize
    where
        F: Fn(Bucket) -> Duration,
    {
        let before = self.buckets.len();
        self.buckets.retain(|(_, bucket), stamps| {
            prune(stamps, window_for(*bucket), now);
            !stamps.is_empty()
        });
        let removed = before.saturating_sub(self.buckets.len());
        debug!(removed, remaining = self.buckets.len(), "Swept idle window buckets");
        removed
    }

    /// Drop all state for one actor.
    pub fn forget(&self, actor: ActorId) {
        self.buckets.retain(|(owner, _), _| *owner != actor);
    }

    /// Drop all state.
    pub fn reset(&self) {
        self.buckets.clear();
    }

    /// Number of keys currently holding entries.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no key holds entries.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

fn prune(stamps: &mut VecDeque<Instant>, window: Duration, now: Instant) {
    while let Some(&oldest) = stamps.front() {
        if now.saturating_duration_since(oldest) >= window {
            stamps.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_first_action_counts_one() {
        let tracker = WindowTracker::new();
        let count = tracker.record(ActorId::new(1), Bucket::Roles, secs(10), Instant::now());
        assert_eq!(count, 1);
    }

    #[test]
    fn test_entries_expire_at_window_boundary() {
        let tracker = WindowTracker::new();
        let actor = ActorId::new(1);
        let t0 = Instant::now();

        tracker.record(actor, Bucket::Bans, secs(10), t0);
        // Exactly one window later the first entry no longer counts
        assert_eq!(tracker.record(actor, Bucket::Bans, secs(10), t0 + secs(10)), 1);
    }

    #[test]
    fn test_out_of_order_is_clamped() {
        let tracker = WindowTracker::new();
        let actor = ActorId::new(1);
        let t0 = Instant::now();

        tracker.record(actor, Bucket::Bans, secs(10), t0 + secs(5));
        assert_eq!(tracker.record(actor, Bucket::Bans, secs(10), t0), 2);
        // Both entries sit at t0+5, so both survive until t0+15
        assert_eq!(tracker.count(actor, Bucket::Bans, secs(10), t0 + secs(14)), 2);
        assert_eq!(tracker.count(actor, Bucket::Bans, secs(10), t0 + secs(15)), 0);
    }

    #[test]
    fn test_count_does_not_record() {
        let tracker = WindowTracker::new();
        let actor = ActorId::new(1);
        let t0 = Instant::now();

        assert_eq!(tracker.count(actor, Bucket::Bans, secs(10), t0), 0);
        tracker.record(actor, Bucket::Bans, secs(10), t0);
        assert_eq!(tracker.count(actor, Bucket::Bans, secs(10), t0 + secs(1)), 1);
        assert_eq!(tracker.count(actor, Bucket::Bans, secs(10), t0 + secs(2)), 1);
    }

    #[test]
    fn test_count_drops_empty_keys() {
        let tracker = WindowTracker::new();
        let actor = ActorId::new(1);
        let t0 = Instant::now();

        tracker.record(actor, Bucket::Bans, secs(10), t0);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.count(actor, Bucket::Bans, secs(10), t0 + secs(20)), 0);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_sweep_removes_idle_keys() {
        let tracker = WindowTracker::new();
        let t0 = Instant::now();

        tracker.record(ActorId::new(1), Bucket::Bans, secs(10), t0);
        tracker.record(ActorId::new(2), Bucket::Roles, secs(60), t0);

        let removed = tracker.sweep(t0 + secs(30), |bucket| match bucket {
            Bucket::Roles => secs(60),
            _ => secs(10),
        });

        assert_eq!(removed, 1);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.count(ActorId::new(2), Bucket::Roles, secs(60), t0 + secs(30)), 1);
    }

    #[test]
    fn test_forget_and_reset() {
        let tracker = WindowTracker::new();
        let t0 = Instant::now();

        tracker.record(ActorId::new(1), Bucket::Bans, secs(10), t0);
        tracker.record(ActorId::new(1), Bucket::Roles, secs(10), t0);
        tracker.record(ActorId::new(2), Bucket::Bans, secs(10), t0);

        tracker.forget(ActorId::new(1));
        assert_eq!(tracker.len(), 1);

        tracker.reset();
        assert!(tracker.is_empty());
    }
}
