//! Single-winner cooldown gate guarding outbound venue calls.
//!
//! Each limiter stores the monotonic timestamp of the last call it let through.
//! A call is allowed when the cooldown has elapsed since that timestamp *and*
//! the caller wins the compare-and-swap that records its own timestamp, so
//! concurrent callers racing in the same window get at most one `true`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use tracing::trace;

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);

// Marker for "no call has been allowed yet".
const NEVER: u64 = u64::MAX;

/// Nanoseconds on the process-wide monotonic clock.
pub fn monotonic_now_ns() -> u64 {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    let anchor = ANCHOR.get_or_init(Instant::now);
    u64::try_from(anchor.elapsed().as_nanos()).unwrap_or(NEVER - 1)
}

#[derive(Debug)]
pub struct RateLimiter {
    last_allowed_ns: AtomicU64,
    cooldown_ns: u64,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_cooldown(DEFAULT_COOLDOWN)
    }

    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            last_allowed_ns: AtomicU64::new(NEVER),
            cooldown_ns: u64::try_from(cooldown.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_nanos(self.cooldown_ns)
    }

    /// Returns true at most once per cooldown window.
    pub fn allow(&self) -> bool {
        self.allow_at(monotonic_now_ns())
    }

    /// Same decision as [`allow`](Self::allow) against an explicit clock reading.
    pub fn allow_at(&self, now_ns: u64) -> bool {
        let last = self.last_allowed_ns.load(Ordering::Acquire);
        if last != NEVER && now_ns.saturating_sub(last) < self.cooldown_ns {
            trace!(now_ns, last, "Cooldown active");
            return false;
        }
        // Losing the swap means another caller claimed this window first.
        self.last_allowed_ns
            .compare_exchange(last, now_ns, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
