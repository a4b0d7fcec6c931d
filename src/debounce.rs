//! Per-column debounce of filter text.
//!
//! Every keystroke restarts that column's single-shot timer. A column's
//! text is released only once its timer has run out without another
//! keystroke, so a burst of typing turns into one re-filter.
//!
//! Time is passed in by the caller, which lets the host drive this from its
//! own event loop and lets tests use fixed instants.

use log::trace;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending {
    text: String,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct FilterDebouncer {
    delay: Duration,
    pending: Vec<Option<Pending>>,
}

impl FilterDebouncer {
    pub fn new(columns: usize, delay: Duration) -> Self {
        FilterDebouncer {
            delay,
            pending: vec![None; columns],
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record new text for `column` and restart its timer.
    ///
    /// Returns false for an out-of-range column.
    pub fn text_changed(&mut self, column: usize, text: &str, now: Instant) -> bool {
        let Some(slot) = self.pending.get_mut(column) else {
            return false;
        };
        let deadline = now + self.delay;
        trace!("filter text for column {} restarted, fires in {:?}", column, self.delay);
        *slot = Some(Pending {
            text: text.to_string(),
            deadline,
        });
        true
    }

    /// Cancel a pending timer without firing it.
    pub fn cancel(&mut self, column: usize) {
        if let Some(slot) = self.pending.get_mut(column) {
            *slot = None;
        }
    }

    pub fn cancel_all(&mut self) {
        for slot in &mut self.pending {
            *slot = None;
        }
    }

    pub fn is_pending(&self, column: usize) -> bool {
        matches!(self.pending.get(column), Some(Some(_)))
    }

    /// Earliest moment at which `poll` will release something.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().flatten().map(|p| p.deadline).min()
    }

    /// Release every column whose timer has expired at `now`, as
    /// `(column, last text)` pairs in column order.
    pub fn poll(&mut self, now: Instant) -> Vec<(usize, String)> {
        let mut fired = Vec::new();
        for (column, slot) in self.pending.iter_mut().enumerate() {
            let expired = slot.as_ref().is_some_and(|p| now >= p.deadline);
            if expired {
                if let Some(p) = slot.take() {
                    fired.push((column, p.text));
                }
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(750);

    #[test]
    fn test_burst_collapses_to_last_text() {
        let start = Instant::now();
        let mut debouncer = FilterDebouncer::new(2, DELAY);

        for (i, text) in [">", ">5", ">50"].iter().enumerate() {
            let at = start + Duration::from_millis(100 * i as u64);
            debouncer.text_changed(0, text, at);
            assert!(debouncer.poll(at).is_empty());
        }

        // 750ms after the first keystroke the timer has been restarted twice.
        assert!(debouncer.poll(start + DELAY).is_empty());

        let last = start + Duration::from_millis(200);
        assert_eq!(debouncer.poll(last + DELAY), vec![(0, ">50".to_string())]);
        assert!(!debouncer.is_pending(0));
        assert!(debouncer.poll(last + DELAY * 2).is_empty());
    }

    #[test]
    fn test_columns_are_independent() {
        let start = Instant::now();
        let mut debouncer = FilterDebouncer::new(3, DELAY);
        debouncer.text_changed(0, "a", start);
        debouncer.text_changed(2, "b", start + Duration::from_millis(500));

        assert_eq!(debouncer.next_deadline(), Some(start + DELAY));
        assert_eq!(debouncer.poll(start + DELAY), vec![(0, "a".to_string())]);
        assert_eq!(
            debouncer.next_deadline(),
            Some(start + Duration::from_millis(500) + DELAY)
        );
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(2000)),
            vec![(2, "b".to_string())]
        );
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = FilterDebouncer::new(1, DELAY);
        debouncer.text_changed(0, "x", start);
        debouncer.cancel(0);
        assert!(debouncer.poll(start + DELAY).is_empty());
        assert_eq!(debouncer.next_deadline(), None);
    }

    #[test]
    fn test_out_of_range_column() {
        let mut debouncer = FilterDebouncer::new(1, DELAY);
        assert!(!debouncer.text_changed(4, "x", Instant::now()));
    }
}
