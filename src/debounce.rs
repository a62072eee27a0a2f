use std::time::{Duration, Instant};

/// Delay used to coalesce rapid page changes into a single settle
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Holds at most one pending value until a quiet period has elapsed.
///
/// Each call to [`Debouncer::schedule`] replaces the pending value and
/// restarts the delay, so only the last of a burst of values is delivered.
/// Dropping the debouncer discards whatever is pending.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Debouncer<T> {
        Debouncer {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.schedule_at(value, now + self.delay);
    }

    /// Like `schedule`, but with an explicit deadline
    pub fn schedule_at(&mut self, value: T, deadline: Instant) {
        tracing::trace!(?deadline, "debounced value (re)scheduled");
        self.pending = Some((value, deadline));
    }

    /// Returns the pending value if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, deadline)) if deadline <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|&(_, deadline)| deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_delivers_after_delay() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(200 * MS);
        d.schedule(1, t0);
        assert_eq!(d.deadline(), Some(t0 + 200 * MS));
        assert_eq!(d.poll(t0 + 199 * MS), None);
        assert!(d.is_pending());
        assert_eq!(d.poll(t0 + 200 * MS), Some(1));
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + 400 * MS), None);
    }

    #[test]
    fn test_last_value_wins_and_restarts_delay() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(200 * MS);
        d.schedule(1, t0);
        d.schedule(2, t0 + 150 * MS);
        d.schedule(3, t0 + 300 * MS);
        assert_eq!(d.poll(t0 + 450 * MS), None);
        assert_eq!(d.poll(t0 + 500 * MS), Some(3));
        assert_eq!(d.poll(t0 + 1000 * MS), None);
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(200 * MS);
        d.schedule("x", t0);
        assert_eq!(d.cancel(), Some("x"));
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(t0 + 1000 * MS), None);
    }

    #[test]
    fn test_schedule_at_now_is_immediate() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(200 * MS);
        d.schedule_at(7, t0);
        assert_eq!(d.poll(t0), Some(7));
    }
}
