use std::time::{Duration, Instant};

/// Holds back the latest input until `window` has passed without another one.
///
/// A new [`push`](Debouncer::push) replaces the pending value and restarts the window. The
/// debouncer owns no timer: callers feed it the current time and ask for due values.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `value` for `now + window`.
    ///
    /// With a zero window nothing is scheduled and `value` is handed straight back.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        if self.window.is_zero() {
            self.pending = None;
            return Some(value);
        }

        self.pending = Some((value, now + self.window));
        None
    }

    /// Takes the pending value if its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}
