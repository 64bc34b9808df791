//! Retry schedule — the Model Caller's retry policy as an explicit iterator.
//!
//! State is `(attempt, model index)`: models advance fastest, wrapping into the
//! next attempt when the preference list is exhausted. Terminal outcomes
//! (first usable text, or running the iterator dry) live in the caller; this
//! type only enumerates the call plan, so the policy is testable without any
//! network.

/// One planned model invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledCall {
    /// 1-based attempt number.
    pub attempt: u32,
    pub model: &'static str,
    /// True at each attempt boundary after the first: the caller pauses
    /// briefly here. Never true on the very first call, and because the pause
    /// precedes the attempt there is no trailing pause after the last one.
    pub pause_before: bool,
}

/// Iterator over `(attempt, model)` pairs for `max_attempts` passes over the
/// model preference list.
#[derive(Debug, Clone)]
pub struct RetrySchedule {
    models: &'static [&'static str],
    max_attempts: u32,
    attempt: u32,
    model_idx: usize,
}

impl RetrySchedule {
    pub fn new(max_attempts: u32, models: &'static [&'static str]) -> Self {
        Self {
            models,
            max_attempts,
            attempt: 1,
            model_idx: 0,
        }
    }
}

impl Iterator for RetrySchedule {
    type Item = ScheduledCall;

    fn next(&mut self) -> Option<ScheduledCall> {
        if self.models.is_empty() || self.attempt > self.max_attempts {
            return None;
        }

        let call = ScheduledCall {
            attempt: self.attempt,
            model: self.models[self.model_idx],
            pause_before: self.model_idx == 0 && self.attempt > 1,
        };

        self.model_idx += 1;
        if self.model_idx == self.models.len() {
            self.model_idx = 0;
            self.attempt += 1;
        }

        Some(call)
    }
}
