//! Rate limiting utilities

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiter type alias
pub type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Create a rate limiter with the specified requests per minute
pub fn create_limiter(requests_per_minute: u32) -> Arc<Limiter> {
    let quota = Quota::per_minute(NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Shared throttle for outbound API calls.
///
/// A budget of zero disables throttling entirely.
#[derive(Clone)]
pub struct ApiThrottle {
    limiter: Option<Arc<Limiter>>,
}

impl ApiThrottle {
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self {
            limiter: (requests_per_minute > 0).then(|| create_limiter(requests_per_minute)),
        }
    }

    /// Wait until the next request fits in the budget
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Check without waiting (returns true if a request is allowed now)
    #[cfg(test)]
    pub fn check(&self) -> bool {
        self.limiter
            .as_ref()
            .map_or(true, |limiter| limiter.check().is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_throttle_always_allows() {
        let throttle = ApiThrottle::per_minute(0);
        for _ in 0..100 {
            assert!(throttle.check());
        }
    }

    #[test]
    fn budget_is_enforced() {
        let throttle = ApiThrottle::per_minute(2);
        assert!(throttle.check());
        assert!(throttle.check());
        assert!(!throttle.check());
    }

    #[tokio::test]
    async fn acquire_returns_immediately_within_budget() {
        let throttle = ApiThrottle::per_minute(5);
        throttle.acquire().await;
        throttle.acquire().await;
        assert!(throttle.check());
    }
}
