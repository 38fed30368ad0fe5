//! Fixed-window rate limiting keyed by client IP.

use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const WINDOW: Duration = Duration::from_secs(15 * 60);
pub const MAX_REQUESTS: u32 = 100;

/// Per-IP request counters over a fixed window. The first request from an IP
/// opens its window; the counter resets once the window elapses.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    counters: Mutex<HashMap<IpAddr, (u32, Instant)>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request from `ip`. Returns false once the quota for the
    /// current window is exhausted. Expired windows are swept here so the map
    /// does not accumulate one entry per client IP forever.
    pub fn check(&self, ip: IpAddr) -> bool {
        let mut counters = self.counters.lock().unwrap();
        let now = Instant::now();
        counters.retain(|_, (_, started)| now.duration_since(*started) < self.window);
        match counters.get_mut(&ip) {
            Some((count, _)) => {
                if *count >= self.max_requests {
                    false
                } else {
                    *count += 1;
                    true
                }
            }
            None => {
                counters.insert(ip, (1, now));
                true
            }
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.counters.lock().unwrap().len()
    }
}

/// Middleware applied to every route. Keys on the connected peer address;
/// falls back to a fixed key when connect info is absent (in-process tests).
pub async fn enforce(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    if !state.limiter.check(ip) {
        tracing::warn!(%ip, "rate limit exceeded");
        return Err(AppError::RateLimited);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn allows_up_to_the_quota_then_rejects() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.check(ip(1)));
        }
        assert!(!limiter.check(ip(1)));
        assert!(!limiter.check(ip(1)));
    }

    #[test]
    fn counters_are_per_ip() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check(ip(1)));
        assert!(limiter.check(ip(2)));
        assert!(!limiter.check(ip(1)));
    }

    #[test]
    fn expired_windows_are_swept_from_the_map() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        for last in 0..50u8 {
            assert!(limiter.check(ip(last)));
        }
        assert_eq!(limiter.tracked_clients(), 50);

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check(ip(200)));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn window_expiry_resets_the_counter() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.check(ip(1)));
        assert!(!limiter.check(ip(1)));
        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check(ip(1)));
    }
}
