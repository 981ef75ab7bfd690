use crate::format::format_metric_value;
use crate::models::MetricFormat;
use std::time::Duration;

pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(1_200);

/// Counts a KPI up from zero to `target` with a cubic ease-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedCounter {
    pub target: f64,
    pub duration: Duration,
}

impl AnimatedCounter {
    pub fn new(target: f64, duration: Duration) -> Self {
        Self { target, duration }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let progress = self.progress(elapsed);
        let eased = 1.0 - (1.0 - progress).powi(3);
        self.target * eased
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    pub fn label_at(&self, elapsed: Duration, format: MetricFormat) -> String {
        format_metric_value(self.value_at(elapsed), format)
    }
}

impl Default for AnimatedCounter {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_COUNTER_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_out_to_target() {
        let counter = AnimatedCounter::new(1_000.0, Duration::from_millis(1_000));
        assert_eq!(counter.value_at(Duration::ZERO), 0.0);
        assert!((counter.value_at(Duration::from_millis(500)) - 875.0).abs() < 1e-9);
        assert_eq!(counter.value_at(Duration::from_millis(1_000)), 1_000.0);
        assert_eq!(counter.value_at(Duration::from_secs(5)), 1_000.0);
        assert!(!counter.is_finished(Duration::from_millis(999)));
        assert!(counter.is_finished(Duration::from_millis(1_000)));
    }

    #[test]
    fn value_never_decreases() {
        let counter = AnimatedCounter::new(847_329.0, DEFAULT_COUNTER_DURATION);
        let samples: Vec<f64> = (0..=30)
            .map(|step| counter.value_at(Duration::from_millis(step * 50)))
            .collect();
        assert!(samples.windows(2).all(|pair| pair[1] >= pair[0]));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let counter = AnimatedCounter::new(42.0, Duration::ZERO);
        assert!(counter.is_finished(Duration::ZERO));
        assert_eq!(counter.value_at(Duration::ZERO), 42.0);
    }

    #[test]
    fn labels_use_metric_format() {
        let counter = AnimatedCounter::new(847_329.0, Duration::from_millis(100));
        assert_eq!(counter.label_at(Duration::from_secs(1), MetricFormat::Currency), "$847,329");
        assert_eq!(counter.label_at(Duration::ZERO, MetricFormat::Number), "0");
    }
}
