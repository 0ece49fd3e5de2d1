//! Cancellable repeating timer polled from the UI loop.

use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Identifies one arming of a [`TickTimer`]. Firings carrying an id that is
/// no longer armed are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Armed {
    id: TimerId,
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
pub struct TickTimer {
    next_id: u64,
    armed: Option<Armed>,
}

impl TickTimer {
    /// Arms a timer firing every `period` from `now`, replacing any armed one.
    pub fn start(&mut self, now: Instant, period: Duration) -> TimerId {
        self.cancel();
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.armed = Some(Armed {
            id,
            period,
            next_due: now + period,
        });
        id
    }

    pub fn cancel(&mut self) -> Option<TimerId> {
        self.armed.take().map(|armed| armed.id)
    }

    pub fn is_current(&self, id: TimerId) -> bool {
        self.armed.as_ref().map(|armed| armed.id) == Some(id)
    }

    /// One firing per period elapsed since the last poll.
    pub fn due(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();
        if let Some(armed) = self.armed.as_mut() {
            while armed.next_due <= now {
                fired.push(armed.id);
                armed.next_due += armed.period;
            }
        }
        fired
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.armed
            .as_ref()
            .map(|armed| armed.next_due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn fires_once_per_elapsed_period() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        let id = timer.start(t0, SECOND);

        assert!(timer.due(t0 + Duration::from_millis(999)).is_empty());
        assert_eq!(timer.due(t0 + SECOND), vec![id]);
        assert_eq!(timer.due(t0 + Duration::from_millis(3500)), vec![id, id]);
        assert_eq!(
            timer.time_until_next(t0 + Duration::from_millis(3500)),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn restart_cancels_previous_arming() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        let first = timer.start(t0, SECOND);
        let second = timer.start(t0, SECOND);

        assert_ne!(first, second);
        assert!(!timer.is_current(first));
        assert!(timer.is_current(second));
        assert_eq!(timer.due(t0 + SECOND), vec![second]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        let id = timer.start(t0, SECOND);
        assert_eq!(timer.cancel(), Some(id));
        assert!(timer.due(t0 + SECOND * 10).is_empty());
        assert_eq!(timer.time_until_next(t0), None);
        assert_eq!(timer.cancel(), None);
    }
}
