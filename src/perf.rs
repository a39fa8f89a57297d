//! Performance Metrics - Single-shot samples and phase breakdown
//!
//! Collects one sample per measured iteration for percentile analysis and
//! regression detection. Single-shot means one sample covers one whole
//! insert + evaluate pass; there is no intra-iteration sampling rate.

/// Stats for one scenario run: per-iteration samples plus phase totals
#[derive(Debug, Default, Clone)]
pub struct IterationStats {
    /// Per measured iteration: insert + evaluate elapsed (nanoseconds)
    pub samples: Vec<u64>,

    // Phase breakdown across all measured iterations (nanoseconds)
    pub total_insert_ns: u64,   // Session fill: clone + insert of every fact
    pub total_evaluate_ns: u64, // The one evaluate_all call
}

impl IterationStats {
    pub fn with_capacity(iterations: usize) -> Self {
        IterationStats {
            samples: Vec::with_capacity(iterations),
            ..Default::default()
        }
    }

    /// Record one measured iteration
    #[inline]
    pub fn record(&mut self, insert_ns: u64, evaluate_ns: u64) {
        self.samples.push(insert_ns + evaluate_ns);
        self.total_insert_ns += insert_ns;
        self.total_evaluate_ns += evaluate_ns;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Calculate percentile from samples
    ///
    /// # Arguments
    /// * `p` - Percentile (0-100), e.g., 50.0 for median, 99.0 for P99
    pub fn percentile(&self, p: f64) -> Option<u64> {
        if self.samples.is_empty() {
            return None;
        }
        let mut sorted = self.samples.clone();
        sorted.sort_unstable();
        let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        Some(sorted[idx.min(sorted.len() - 1)])
    }

    pub fn min(&self) -> Option<u64> {
        self.samples.iter().copied().min()
    }

    pub fn max(&self) -> Option<u64> {
        self.samples.iter().copied().max()
    }

    pub fn avg(&self) -> Option<u64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<u64>() / self.samples.len() as u64)
    }

    /// Total tracked time across both phases
    pub fn total_tracked_ns(&self) -> u64 {
        self.total_insert_ns + self.total_evaluate_ns
    }

    /// Percentage breakdown: (insert, evaluate)
    pub fn breakdown_pct(&self) -> (f64, f64) {
        let total = self.total_tracked_ns() as f64;
        if total == 0.0 {
            return (0.0, 0.0);
        }
        (
            self.total_insert_ns as f64 / total * 100.0,
            self.total_evaluate_ns as f64 / total * 100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sums_phases() {
        let mut stats = IterationStats::with_capacity(2);
        stats.record(100, 400);
        stats.record(200, 300);

        assert_eq!(stats.samples, vec![500, 500]);
        assert_eq!(stats.total_insert_ns, 300);
        assert_eq!(stats.total_evaluate_ns, 700);
        assert_eq!(stats.total_tracked_ns(), 1000);
    }

    #[test]
    fn test_percentile() {
        let mut stats = IterationStats::default();
        for i in 1..=100 {
            stats.record(i, 0);
        }

        assert_eq!(stats.min(), Some(1));
        assert_eq!(stats.max(), Some(100));
        // P50 of 1..100 with this formula rounds to 51 (50.5 rounded)
        let p50 = stats.percentile(50.0).unwrap();
        assert!(p50 == 50 || p50 == 51, "P50 should be ~50, got {}", p50);
        assert_eq!(stats.percentile(99.0), Some(99));
    }

    #[test]
    fn test_empty_stats_have_no_numbers() {
        let stats = IterationStats::default();
        assert!(stats.is_empty());
        assert_eq!(stats.percentile(50.0), None);
        assert_eq!(stats.min(), None);
        assert_eq!(stats.avg(), None);
        assert_eq!(stats.breakdown_pct(), (0.0, 0.0));
    }

    #[test]
    fn test_breakdown() {
        let mut stats = IterationStats::default();
        stats.record(250, 750);

        let (insert, evaluate) = stats.breakdown_pct();
        assert!((insert - 25.0).abs() < 0.1);
        assert!((evaluate - 75.0).abs() < 0.1);
    }
}
