//! Per-client token buckets.
//!
//! Each client starts with `max_requests` tokens; tokens refill continuously
//! so that a full bucket is restored over one window. A bucket untouched for a
//! whole window is full again, so it is dropped on the next sweep.

use std::collections::HashMap;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::core::config::RateLimitConfig;

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

#[derive(Debug)]
struct Buckets {
    by_client: HashMap<String, Bucket>,
    last_sweep: Instant,
}

pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Mutex<Buckets>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Mutex::new(Buckets {
                by_client: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled()
    }

    pub fn trusts_proxy(&self) -> bool {
        self.config.trust_proxy
    }

    fn capacity(&self) -> f64 {
        f64::from(self.config.max_requests)
    }

    fn refill_per_sec(&self) -> f64 {
        self.capacity() / self.config.window.as_secs_f64()
    }

    /// Take one token for `key`; false when the bucket is empty
    pub async fn allow(&self, key: &str) -> bool {
        if !self.enabled() {
            return true;
        }

        let now = Instant::now();
        let capacity = self.capacity();
        let refill_per_sec = self.refill_per_sec();

        let window = self.config.window;

        let mut lock = self.buckets.lock().await;
        if now.duration_since(lock.last_sweep) >= window {
            let before = lock.by_client.len();
            lock.by_client
                .retain(|_, bucket| now.duration_since(bucket.last_refill) < window);
            lock.last_sweep = now;
            tracing::debug!(
                "Rate limiter sweep dropped {} idle clients",
                before - lock.by_client.len()
            );
        }

        let bucket = lock.by_client.entry(key.to_string()).or_insert_with(|| Bucket {
            tokens: capacity,
            last_refill: now,
        });
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.last_refill = now;
        bucket.tokens = (bucket.tokens + elapsed * refill_per_sec).min(capacity);
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.buckets.lock().await.by_client.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn limiter(max_requests: u32) -> RateLimiter {
        limiter_with_window(max_requests, Duration::from_secs(3600))
    }

    fn limiter_with_window(max_requests: u32, window: Duration) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            max_requests,
            window,
            trust_proxy: false,
        })
    }

    #[tokio::test]
    async fn test_exhausts_after_capacity() {
        let limiter = limiter(3);
        for _ in 0..3 {
            assert!(limiter.allow("203.0.113.7").await);
        }
        assert!(!limiter.allow("203.0.113.7").await);
    }

    #[tokio::test]
    async fn test_buckets_are_per_client() {
        let limiter = limiter(1);
        assert!(limiter.allow("a").await);
        assert!(!limiter.allow("a").await);
        assert!(limiter.allow("b").await);
    }

    #[tokio::test]
    async fn test_disabled_always_allows() {
        let limiter = limiter(0);
        for _ in 0..1000 {
            assert!(limiter.allow("a").await);
        }
    }

    #[tokio::test]
    async fn test_idle_clients_are_swept() {
        let limiter = limiter_with_window(2, Duration::from_millis(50));
        for i in 0..20 {
            assert!(limiter.allow(&format!("10.0.0.{}", i)).await);
        }
        assert_eq!(limiter.tracked_clients().await, 20);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(limiter.allow("10.0.1.1").await);
        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[tokio::test]
    async fn test_sweep_keeps_recent_clients() {
        let limiter = limiter_with_window(1, Duration::from_millis(400));
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(limiter.allow("a").await);
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Sweep runs here; "a" has been idle for less than a window
        assert!(limiter.allow("b").await);
        assert_eq!(limiter.tracked_clients().await, 2);
    }
}
