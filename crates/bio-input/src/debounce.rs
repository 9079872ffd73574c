//! Trailing-edge debouncing for bursty events.

/// Holds the latest value of a burst until the burst has been quiet for the
/// idle window, then releases it exactly once.
///
/// Polling is the only way a value comes out; the owner calls `poll(now)`
/// from its frame loop.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    idle_ms: u64,
    pending: Option<T>,
    last_event_ms: u64,
}

impl<T> Debouncer<T> {
    pub fn new(idle_ms: u64) -> Self {
        Self {
            idle_ms,
            pending: None,
            last_event_ms: 0,
        }
    }

    pub fn idle_ms(&self) -> u64 {
        self.idle_ms
    }

    /// Record an event. Supersedes any pending value and restarts the window.
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some(value);
        self.last_event_ms = now_ms;
    }

    /// Release the pending value if the window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.is_some() && now_ms.saturating_sub(self.last_event_ms) >= self.idle_ms {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|_| self.last_event_ms.saturating_add(self.idle_ms))
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn burst_settles_once_with_last_value() {
        let mut debouncer = Debouncer::new(100);
        let mut fired = Vec::new();

        for now in 0..=400u64 {
            if now <= 90 && now % 10 == 0 {
                debouncer.push(1000 - now, now);
            }
            if let Some(width) = debouncer.poll(now) {
                fired.push((now, width));
            }
        }

        assert_eq!(fired, vec![(190, 910)]);
    }

    #[test]
    fn nothing_fires_before_the_window() {
        let mut debouncer = Debouncer::new(100);
        debouncer.push(800.0, 0);
        assert_eq!(debouncer.poll(99), None);
        assert_eq!(debouncer.deadline(), Some(100));
        assert_eq!(debouncer.poll(100), Some(800.0));
        assert_eq!(debouncer.poll(500), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_drops_pending() {
        let mut debouncer = Debouncer::new(100);
        debouncer.push(1, 0);
        debouncer.cancel();
        assert_eq!(debouncer.poll(1000), None);
        assert_eq!(debouncer.deadline(), None);
    }

    proptest! {
        #[test]
        fn any_burst_within_window_fires_once(gaps in prop::collection::vec(0u64..100, 1..30)) {
            let mut debouncer = Debouncer::new(100);
            let mut now = 0u64;
            let mut last = 0usize;
            for (index, gap) in gaps.iter().enumerate() {
                now += gap;
                debouncer.push(index, now);
                last = index;
                // Polling mid-burst right at the event never releases.
                prop_assert_eq!(debouncer.poll(now), None);
            }
            prop_assert_eq!(debouncer.poll(now + 99), None);
            prop_assert_eq!(debouncer.poll(now + 100), Some(last));
            prop_assert_eq!(debouncer.poll(now + 1000), None);
        }
    }
}
