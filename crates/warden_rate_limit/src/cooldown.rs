//! Per-user, per-command cooldown for administrative commands.

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use std::time::Duration;
use tracing::debug;
use warden_core::ActorId;

/// Allows each user one use of each command per cooldown period.
///
/// Slots are keyed by user and command name, so a cooldown on one command
/// does not block the user's other commands. A zero period disables the
/// cooldown.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use warden_core::ActorId;
/// use warden_rate_limit::CommandCooldown;
///
/// let cooldown = CommandCooldown::new(Duration::from_secs(5));
/// let user = ActorId::new(10);
///
/// assert!(cooldown.check(user, "ping").is_ok());
/// let retry_after = cooldown.check(user, "ping").unwrap_err();
/// assert!(retry_after <= Duration::from_secs(5));
/// assert!(cooldown.check(user, "viewconfig").is_ok());
/// ```
pub struct CommandCooldown {
    period: Duration,
    limiter: Option<DefaultKeyedRateLimiter<(ActorId, &'static str)>>,
    clock: DefaultClock,
}

impl CommandCooldown {
    /// Create a cooldown of `period` per user and command.
    pub fn new(period: Duration) -> Self {
        let limiter = Quota::with_period(period).map(GovernorRateLimiter::keyed);
        Self {
            period,
            limiter,
            clock: DefaultClock::default(),
        }
    }

    /// The configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Consume the user's slot for `command`, or report how long until it is
    /// available.
    pub fn check(&self, user: ActorId, command: &'static str) -> Result<(), Duration> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };

        limiter.check_key(&(user, command)).map_err(|not_until| {
            let retry_after = not_until.wait_time_from(self.clock.now());
            debug!(user = user.get(), command, retry_after_ms = retry_after.as_millis() as u64, "Command on cooldown");
            retry_after
        })
    }

    /// Forget slots whose cooldown has fully elapsed.
    pub fn sweep(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.retain_recent();
        }
    }
}

impl std::fmt::Debug for CommandCooldown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandCooldown")
            .field("period", &self.period)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_is_per_user() {
        let cooldown = CommandCooldown::new(Duration::from_secs(60));

        assert!(cooldown.check(ActorId::new(1), "ping").is_ok());
        assert!(cooldown.check(ActorId::new(1), "ping").is_err());
        assert!(cooldown.check(ActorId::new(2), "ping").is_ok());
    }

    #[test]
    fn test_cooldown_is_per_command() {
        let cooldown = CommandCooldown::new(Duration::from_secs(60));

        assert!(cooldown.check(ActorId::new(1), "ping").is_ok());
        assert!(cooldown.check(ActorId::new(1), "viewconfig").is_ok());
        assert!(cooldown.check(ActorId::new(1), "ping").is_err());
        assert!(cooldown.check(ActorId::new(1), "viewconfig").is_err());
    }

    #[test]
    fn test_retry_after_is_close_to_period() {
        let cooldown = CommandCooldown::new(Duration::from_secs(60));
        cooldown.check(ActorId::new(1), "ping").unwrap();

        let retry_after = cooldown.check(ActorId::new(1), "ping").unwrap_err();
        assert!(retry_after > Duration::from_secs(50));
        assert!(retry_after <= Duration::from_secs(60));
    }

    #[test]
    fn test_zero_period_disables_cooldown() {
        let cooldown = CommandCooldown::new(Duration::ZERO);
        for _ in 0..10 {
            assert!(cooldown.check(ActorId::new(1), "ping").is_ok());
        }
    }

    #[test]
    fn test_slot_frees_after_period() {
        let cooldown = CommandCooldown::new(Duration::from_millis(50));
        cooldown.check(ActorId::new(1), "ping").unwrap();
        assert!(cooldown.check(ActorId::new(1), "ping").is_err());

        std::thread::sleep(Duration::from_millis(80));
        assert!(cooldown.check(ActorId::new(1), "ping").is_ok());
    }
}
