//! Lookup metrics.
//!
//! Counts how lookups resolved so a host can tell how much of its UI is
//! actually being shown translated.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup counters owned by a [`Translator`](crate::i18n::Translator).
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Lookups answered with a translation
    hits: AtomicUsize,

    /// Lookups that matched an unfinished or empty translation
    fallbacks: AtomicUsize,

    /// Lookups for a source string the catalogue does not contain
    misses: AtomicUsize,

    /// Lookups that matched a retired (obsolete) translation
    retired: AtomicUsize,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup answered with a translation.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that fell back to the source string.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup with no matching message.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that matched a retired message.
    pub fn record_retired(&self) {
        self.retired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn retired(&self) -> usize {
        self.retired.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallbacks = self.fallbacks();
        let misses = self.misses();
        let retired = self.retired();
        let lookups = hits + fallbacks + misses + retired;
        let hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            hits,
            fallbacks,
            misses,
            retired,
            hit_rate,
        }
    }
}

/// Snapshot of the lookup counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Total lookups recorded
    pub lookups: usize,

    /// Lookups answered with a translation
    pub hits: usize,

    /// Lookups that fell back to an unfinished or empty translation
    pub fallbacks: usize,

    /// Lookups with no matching message
    pub misses: usize,

    /// Lookups that matched a retired translation
    pub retired: usize,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_hit() {
        let metrics = LookupMetrics::new();
        assert_eq!(metrics.hits(), 0);
        metrics.record_hit();
        assert_eq!(metrics.hits(), 1);
        metrics.record_hit();
        assert_eq!(metrics.hits(), 2);
    }

    #[test]
    fn test_record_fallback_miss_retired() {
        let metrics = LookupMetrics::new();
        metrics.record_fallback();
        metrics.record_miss();
        metrics.record_miss();
        metrics.record_retired();
        assert_eq!(metrics.fallbacks(), 1);
        assert_eq!(metrics.misses(), 2);
        assert_eq!(metrics.retired(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LookupMetrics::new().report();
        assert_eq!(report.lookups, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = LookupMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();

        let report = metrics.report();
        assert_eq!(report.lookups, 4);
        assert_eq!(report.hits, 3);
        assert!((report.hit_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_serialization() {
        let metrics = LookupMetrics::new();
        metrics.record_hit();

        let json = serde_json::to_string(&metrics.report()).unwrap();
        assert!(json.contains("\"hits\":1"));
        assert!(json.contains("\"hit_rate\":100.0"));
    }

    #[test]
    fn test_concurrent_recording() {
        let metrics = LookupMetrics::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        metrics.record_hit();
                    }
                });
            }
        });
        assert_eq!(metrics.hits(), 400);
    }
}
