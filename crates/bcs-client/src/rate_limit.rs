//! Client-side request rate limiting
//!
//! A token bucket owned by each [`crate::Client`]. Callers that find the
//! bucket empty wait for a token instead of failing; the wait can be
//! cancelled through a [`CancellationToken`].

use governor::{DefaultDirectRateLimiter, Quota};
use std::num::NonZeroU32;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::{BcsError, Result};

/// The API does not document a limit; 150 requests per second is used.
pub const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 150;

/// Default bucket capacity
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 1;

/// Rate limiting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Steady-state requests per second
    pub per_second: u32,
    /// Requests allowed back to back before throttling kicks in
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: DEFAULT_RATE_LIMIT_PER_SECOND,
            burst: DEFAULT_RATE_LIMIT_BURST,
        }
    }
}

impl RateLimitConfig {
    fn quota(&self) -> Result<Quota> {
        let per_second = NonZeroU32::new(self.per_second)
            .ok_or_else(|| BcsError::invalid_config("rate limit must be at least 1 per second"))?;
        let burst = NonZeroU32::new(self.burst)
            .ok_or_else(|| BcsError::invalid_config("rate limit burst must be at least 1"))?;
        Ok(Quota::per_second(per_second).allow_burst(burst))
    }
}

/// Token bucket shared by every request issued through one client
pub struct RateLimiter {
    limiter: DefaultDirectRateLimiter,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        Ok(Self {
            limiter: governor::RateLimiter::direct(config.quota()?),
            config,
        })
    }

    /// Take a token, waiting for one if the bucket is empty.
    ///
    /// Returns [`BcsError::Cancelled`] if `cancel` has fired or fires before
    /// a token is available. A cancelled caller never consumes a token.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(BcsError::Cancelled);
        }
        if self.limiter.check().is_ok() {
            return Ok(());
        }

        trace!(per_second = self.config.per_second, "Rate limit reached, waiting for a token");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(BcsError::Cancelled),
            _ = self.limiter.until_ready() => Ok(()),
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
