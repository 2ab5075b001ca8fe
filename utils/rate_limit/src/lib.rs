//! Fixed-window limiter for outbound calls.
//!
//! At most `max_calls` permits are handed out per window. A window opens on
//! the first permit taken after the previous one expired. Callers that find
//! the window full wait for it to close instead of failing.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RateLimiterError {
    #[error("ZeroCalls: a window must allow at least one call")]
    ZeroCalls,

    #[error("ZeroPeriod: window period must be longer than zero")]
    ZeroPeriod,
}

#[derive(Debug, Default)]
struct Window {
    opened_at: Option<Instant>,
    granted: u32,
}

/// Hands out at most `max_calls` permits per fixed window.
///
/// Windows do not slide: a burst at the end of one window followed by a
/// burst at the start of the next can put up to `2 * max_calls` calls inside
/// a single `period`-long span.
#[derive(Debug)]
pub struct RateLimiter {
    max_calls: u32,
    period: Duration,
    window: Mutex<Window>,
}

impl RateLimiter {
    pub fn new(max_calls: u32, period: Duration) -> Result<Self, RateLimiterError> {
        if max_calls == 0 {
            return Err(RateLimiterError::ZeroCalls);
        }
        if period.is_zero() {
            return Err(RateLimiterError::ZeroPeriod);
        }

        Ok(Self {
            max_calls,
            period,
            window: Mutex::new(Window::default()),
        })
    }

    /// Waits until a permit is available in the current window, then takes it.
    pub async fn acquire(&self) {
        loop {
            let wait = match self.try_acquire().await {
                None => return,
                Some(wait) => wait,
            };

            debug!(
                wait_ms = wait.as_millis() as u64,
                max_calls = self.max_calls,
                "Rate limit window full, waiting"
            );

            // window lock is not held here
            tokio::time::sleep(wait).await;
        }
    }

    /// Takes a permit if one is free. Otherwise returns how long the current
    /// window still has to run.
    async fn try_acquire(&self) -> Option<Duration> {
        let mut window = self.window.lock().await;
        let now = Instant::now();

        match window.opened_at {
            Some(opened_at) if now.duration_since(opened_at) < self.period => {
                if window.granted < self.max_calls {
                    window.granted += 1;
                    None
                } else {
                    Some(self.period - now.duration_since(opened_at))
                }
            }
            _ => {
                window.opened_at = Some(now);
                window.granted = 1;
                None
            }
        }
    }
}
