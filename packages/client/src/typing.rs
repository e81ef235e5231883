//! Receiver-side typing indicator.
//!
//! The relay never sends "stopped typing", so each `user-typing` signal is
//! shown until it has not been refreshed for [`TYPING_TIMEOUT`].

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

pub const TYPING_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct TypingIndicator {
    timeout: Duration,
    last_seen: BTreeMap<String, Instant>,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self {
            timeout: TYPING_TIMEOUT,
            last_seen: BTreeMap::new(),
        }
    }

    /// Record a typing signal. Returns `true` if `user` was not already shown.
    pub fn mark(&mut self, user: &str, now: Instant) -> bool {
        self.last_seen.insert(user.to_string(), now).is_none()
    }

    /// Drop a user immediately, e.g. when their message arrives.
    pub fn clear(&mut self, user: &str) {
        self.last_seen.remove(user);
    }

    /// Remove and return users whose indication has expired at `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<String> {
        let timeout = self.timeout;
        let expired: Vec<String> = self
            .last_seen
            .iter()
            .filter(|(_, seen)| now.saturating_duration_since(**seen) >= timeout)
            .map(|(user, _)| user.clone())
            .collect();
        for user in &expired {
            self.last_seen.remove(user);
        }
        expired
    }

    /// Users currently shown as typing, sorted.
    pub fn active(&self) -> Vec<&str> {
        self.last_seen.keys().map(String::as_str).collect()
    }
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new()
    }
}
