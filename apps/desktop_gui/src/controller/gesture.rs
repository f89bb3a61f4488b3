//! Multi-click grouping for the hidden admin gesture.
//!
//! Activations whose gaps fit inside the grouping window form one group. A
//! group is only judged once it settles (no further activation within the
//! window), so a fourth click cannot retroactively count as a triple.

use std::time::Duration;

pub const ADMIN_TRIGGER_COUNT: u32 = 3;

#[derive(Debug, Clone)]
pub struct MultiClickDetector {
    window_secs: f64,
    count: u32,
    last_at: Option<f64>,
}

impl MultiClickDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            window_secs: window.as_secs_f64(),
            count: 0,
            last_at: None,
        }
    }

    /// Records an activation at `at` (seconds on the UI clock). Returns the
    /// size of the previous group if this activation arrived after it had
    /// already expired.
    pub fn register(&mut self, at: f64) -> Option<u32> {
        let settled = self.settle(at);
        self.count += 1;
        self.last_at = Some(at);
        settled
    }

    /// Closes the pending group once `now` is past its window.
    pub fn settle(&mut self, now: f64) -> Option<u32> {
        let last_at = self.last_at?;
        if now - last_at <= self.window_secs {
            return None;
        }
        let count = self.count;
        self.count = 0;
        self.last_at = None;
        Some(count)
    }

    /// Time until the pending group settles, if any.
    pub fn remaining(&self, now: f64) -> Option<Duration> {
        let last_at = self.last_at?;
        let left = (last_at + self.window_secs - now).max(0.0);
        Some(Duration::from_secs_f64(left))
    }
}

pub fn is_admin_trigger(settled_count: u32) -> bool {
    settled_count == ADMIN_TRIGGER_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    /// Feeds `clicks` activations 0.1s apart and returns the settled count.
    fn settled_after(clicks: u32) -> Option<u32> {
        let mut detector = MultiClickDetector::new(WINDOW);
        let mut t = 10.0;
        for _ in 0..clicks {
            assert_eq!(detector.register(t), None);
            t += 0.1;
        }
        assert_eq!(detector.settle(t), None, "group still open inside the window");
        detector.settle(t + 1.0)
    }

    #[test]
    fn exactly_three_activations_trigger() {
        assert!(is_admin_trigger(settled_after(3).unwrap()));
    }

    #[test]
    fn other_counts_do_not_trigger() {
        for clicks in [1, 2, 4, 5] {
            let settled = settled_after(clicks).unwrap();
            assert_eq!(settled, clicks);
            assert!(!is_admin_trigger(settled), "{clicks} clicks must not open admin");
        }
    }

    #[test]
    fn slow_clicks_form_separate_groups() {
        let mut detector = MultiClickDetector::new(WINDOW);
        assert_eq!(detector.register(0.0), None);
        assert_eq!(detector.register(0.2), None);
        assert_eq!(detector.register(1.0), Some(2));
        assert_eq!(detector.register(1.2), None);
        assert_eq!(detector.register(1.4), None);
        assert_eq!(detector.settle(2.0), Some(3));
        assert_eq!(detector.settle(5.0), None);
    }

    #[test]
    fn remaining_counts_down_while_pending() {
        let mut detector = MultiClickDetector::new(WINDOW);
        assert_eq!(detector.remaining(0.0), None);
        detector.register(1.0);
        let left = detector.remaining(1.2).unwrap();
        assert!((left.as_secs_f64() - 0.3).abs() < 1e-9);
        assert_eq!(detector.remaining(9.0), Some(Duration::ZERO));
    }
}
