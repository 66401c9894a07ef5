//! Per-connection rate limiting for inbound WebSocket frames.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::RateLimitConfig;

/// Sliding-window counter: at most `limit` hits in any `window`.
#[derive(Debug)]
pub struct RateLimiter {
    /// Times of the hits still inside the window, oldest first
    hits: VecDeque<Instant>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            hits: VecDeque::with_capacity(limit),
            limit,
            window,
        }
    }

    /// Record a hit now if the window has room.
    pub fn allow(&mut self) -> bool {
        self.allow_at(Instant::now())
    }

    /// Record a hit at `now` if the window has room. Refused hits are not
    /// recorded.
    pub fn allow_at(&mut self, now: Instant) -> bool {
        while self
            .hits
            .front()
            .is_some_and(|&hit| now.saturating_duration_since(hit) >= self.window)
        {
            self.hits.pop_front();
        }

        if self.hits.len() >= self.limit {
            return false;
        }

        self.hits.push_back(now);
        true
    }

    /// Hits left before the limiter refuses.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.hits.len())
    }
}

/// Why a frame was refused. The `Display` text is sent to the client.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Throttle {
    #[error("Rate limit exceeded. Please slow down.")]
    Burst,

    #[error("Too many messages. Please wait before sending more.")]
    Sustained,
}

impl Throttle {
    /// Metric label for the refusing window
    pub fn window(self) -> &'static str {
        match self {
            Throttle::Burst => "burst",
            Throttle::Sustained => "sustained",
        }
    }
}

/// Burst and sustained limits for one connection.
#[derive(Debug)]
pub struct MessageLimiter {
    burst: RateLimiter,
    sustained: RateLimiter,
}

impl MessageLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            burst: RateLimiter::new(config.burst_messages, config.burst_window),
            sustained: RateLimiter::new(config.sustained_messages, config.sustained_window),
        }
    }

    pub fn check(&mut self) -> Result<(), Throttle> {
        self.check_at(Instant::now())
    }

    /// The burst window is consulted first; a frame it refuses does not
    /// count against the sustained window.
    pub fn check_at(&mut self, now: Instant) -> Result<(), Throttle> {
        if !self.burst.allow_at(now) {
            return Err(Throttle::Burst);
        }

        if !self.sustained.allow_at(now) {
            return Err(Throttle::Sustained);
        }

        Ok(())
    }
}

impl Default for MessageLimiter {
    fn default() -> Self {
        Self::new(&RateLimitConfig::default())
    }
}
