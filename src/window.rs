//! Time-bounded sample window.
//!
//! Keeps values pushed within the last `max_age`, plus one older
//! boundary sample. Retention runs on every push, so the window never
//! needs a background sweeper and a quiet window simply keeps its last
//! samples until the next push.
//!
//! The boundary sample exists because rate and delta calculations over
//! the window need one data point from just before the cutoff, otherwise
//! the measured span shrinks below `max_age` whenever samples are
//! sparse. Callers reading `front()` should expect a timestamp up to one
//! inter-sample gap older than the cutoff.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
/// Sliding window of timestamped values bounded by age, not count.
pub struct TimeWindow<T> {
    entries: VecDeque<(Instant, T)>,
    max_age: Duration,
}

impl<T> TimeWindow<T> {
    /// Creates an empty window retaining values for `max_age`.
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            max_age,
        }
    }

    /// Returns the configured retention span.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Returns the number of retained samples, including the boundary
    /// sample.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `value` at the current time, then drops samples older
    /// than `max_age` except the newest expired one.
    pub fn push(&mut self, value: T) {
        self.push_at(Instant::now(), value);
    }

    /// Timestamps are supplied by `push`; split out so tests can drive
    /// the clock without sleeping.
    fn push_at(&mut self, now: Instant, value: T) {
        self.entries.push_back((now, value));
        let Some(cutoff) = now.checked_sub(self.max_age) else {
            return;
        };
        // Keep the newest expired entry as the boundary sample.
        while self.entries.len() >= 2 && self.entries[1].0 < cutoff {
            self.entries.pop_front();
        }
    }

    /// Returns the oldest retained sample and its timestamp. This may be
    /// the boundary sample from just before the cutoff.
    pub fn front(&self) -> Option<(&T, Instant)> {
        self.entries.front().map(|(at, v)| (v, *at))
    }

    /// Returns the newest sample and its timestamp.
    pub fn back(&self) -> Option<(&T, Instant)> {
        self.entries.back().map(|(at, v)| (v, *at))
    }

    /// Time spanned from the oldest retained sample to the newest, or
    /// zero with fewer than two samples.
    pub fn span(&self) -> Duration {
        match (self.entries.front(), self.entries.back()) {
            (Some((oldest, _)), Some((newest, _))) => newest.duration_since(*oldest),
            _ => Duration::ZERO,
        }
    }

    /// Iterates values oldest → newest.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Iterates `(timestamp, value)` pairs oldest → newest.
    pub fn iter(&self) -> impl Iterator<Item = (Instant, &T)> {
        self.entries.iter().map(|(at, v)| (*at, v))
    }

    /// Drops all samples.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut prev: Option<Instant> = None;
        for (at, _) in &self.entries {
            if let Some(p) = prev {
                assert!(p <= *at, "timestamps must be non-decreasing");
            }
            prev = Some(*at);
        }
        // At most one entry may predate the newest push's cutoff.
        if let Some((newest, _)) = self.entries.back() {
            if let Some(cutoff) = newest.checked_sub(self.max_age) {
                let expired = self
                    .entries
                    .iter()
                    .filter(|(at, _)| *at < cutoff)
                    .count();
                assert!(expired <= 1, "only the boundary sample may be expired");
            }
        }
    }
}

impl<T: Clone> TimeWindow<T> {
    /// Materializes the retained values oldest → newest.
    pub fn to_vec(&self) -> Vec<T> {
        self.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, secs: u64) -> Instant {
        base + Duration::from_secs(secs)
    }

    #[test]
    fn retains_everything_inside_the_window() {
        let base = Instant::now();
        let mut window = TimeWindow::new(Duration::from_secs(10));
        window.push_at(at(base, 0), 1);
        window.push_at(at(base, 3), 2);
        window.push_at(at(base, 6), 3);
        assert_eq!(window.to_vec(), vec![1, 2, 3]);
        assert_eq!(window.len(), 3);
        window.debug_validate_invariants();
    }

    #[test]
    fn expires_old_samples_but_keeps_boundary() {
        let base = Instant::now();
        let mut window = TimeWindow::new(Duration::from_secs(10));
        window.push_at(at(base, 0), 1);
        window.push_at(at(base, 4), 2);
        window.push_at(at(base, 8), 3);
        // cutoff = 15 - 10 = 5: samples 1 and 2 are expired, 2 stays as
        // the boundary sample.
        window.push_at(at(base, 15), 4);
        assert_eq!(window.to_vec(), vec![2, 3, 4]);
        let (front, front_at) = window.front().unwrap();
        assert_eq!(*front, 2);
        assert_eq!(front_at, at(base, 4));
        window.debug_validate_invariants();
    }

    #[test]
    fn long_gap_keeps_only_boundary_and_new() {
        let base = Instant::now();
        let mut window = TimeWindow::new(Duration::from_secs(10));
        window.push_at(at(base, 0), 1);
        window.push_at(at(base, 1), 2);
        window.push_at(at(base, 2), 3);
        window.push_at(at(base, 100), 4);
        assert_eq!(window.to_vec(), vec![3, 4]);
        window.debug_validate_invariants();
    }

    #[test]
    fn span_measures_oldest_to_newest() {
        let base = Instant::now();
        let mut window = TimeWindow::new(Duration::from_secs(60));
        assert_eq!(window.span(), Duration::ZERO);
        window.push_at(at(base, 5), 1);
        assert_eq!(window.span(), Duration::ZERO);
        window.push_at(at(base, 25), 2);
        assert_eq!(window.span(), Duration::from_secs(20));
    }

    #[test]
    fn front_back_and_clear() {
        let base = Instant::now();
        let mut window = TimeWindow::new(Duration::from_secs(10));
        assert!(window.front().is_none());
        window.push_at(at(base, 1), "a");
        window.push_at(at(base, 2), "b");
        assert_eq!(window.front().unwrap().0, &"a");
        assert_eq!(window.back().unwrap().0, &"b");

        window.clear();
        assert!(window.is_empty());
        assert!(window.back().is_none());
        assert_eq!(window.to_vec(), Vec::<&str>::new());
    }

    #[test]
    fn iter_pairs_carry_timestamps() {
        let base = Instant::now();
        let mut window = TimeWindow::new(Duration::from_secs(10));
        window.push_at(at(base, 1), 10);
        window.push_at(at(base, 2), 20);
        let pairs: Vec<_> = window.iter().map(|(t, v)| (t, *v)).collect();
        assert_eq!(pairs, vec![(at(base, 1), 10), (at(base, 2), 20)]);
    }

    #[test]
    fn wall_clock_push_is_retained() {
        let mut window = TimeWindow::new(Duration::from_secs(60));
        window.push(7);
        assert_eq!(window.to_vec(), vec![7]);
        assert_eq!(window.max_age(), Duration::from_secs(60));
        window.debug_validate_invariants();
    }
}
