use std::time::{Duration, Instant};

/// Counters for a single pipeline run
#[derive(Debug, Clone)]
pub struct RunMetrics {
    /// Number of integers obtained from the source
    numbers_read: u64,
    /// Number of integers the predicate kept
    matched: u64,
    /// Number of integers the predicate rejected
    rejected: u64,
    /// Start of the run, for elapsed time
    start_time: Instant,
}

impl RunMetrics {
    /// Start collecting metrics for a run
    pub fn new() -> Self {
        Self {
            numbers_read: 0,
            matched: 0,
            rejected: 0,
            start_time: Instant::now(),
        }
    }

    /// Record how many integers the source produced
    pub fn record_read(&mut self, count: usize) {
        self.numbers_read += count as u64;
    }

    /// Record an integer that passed the predicate
    pub fn record_matched(&mut self) {
        self.matched += 1;
    }

    /// Record an integer that failed the predicate
    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    pub fn numbers_read(&self) -> u64 {
        self.numbers_read
    }

    pub fn matched(&self) -> u64 {
        self.matched
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Get a snapshot of current metrics
    pub fn snapshot(&self) -> RunStats {
        RunStats {
            numbers_read: self.numbers_read,
            matched: self.matched,
            rejected: self.rejected,
            elapsed: self.start_time.elapsed(),
        }
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub numbers_read: u64,
    pub matched: u64,
    pub rejected: u64,
    pub elapsed: Duration,
}

impl RunStats {
    /// Share of read integers that matched, in `[0, 1]`
    pub fn match_ratio(&self) -> f64 {
        if self.numbers_read == 0 {
            0.0
        } else {
            self.matched as f64 / self.numbers_read as f64
        }
    }

    /// Format stats as a human-readable string
    pub fn format(&self) -> String {
        format!(
            "Read: {}, Matched: {}, Rejected: {}, Match ratio: {:.2}%, Elapsed: {:.3}ms",
            self.numbers_read,
            self.matched,
            self.rejected,
            self.match_ratio() * 100.0,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_metrics() {
        let mut metrics = RunMetrics::new();
        metrics.record_read(4);
        metrics.record_matched();
        metrics.record_rejected();
        metrics.record_rejected();
        metrics.record_matched();

        assert_eq!(metrics.numbers_read(), 4);
        assert_eq!(metrics.matched(), 2);
        assert_eq!(metrics.rejected(), 2);

        let stats = metrics.snapshot();
        assert_eq!(stats.numbers_read, 4);
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.match_ratio(), 0.5);
    }

    #[test]
    fn test_format() {
        let stats = RunStats {
            numbers_read: 6,
            matched: 3,
            rejected: 3,
            elapsed: Duration::from_millis(2),
        };
        let text = stats.format();
        assert!(text.starts_with("Read: 6, Matched: 3, Rejected: 3, Match ratio: 50.00%"));
    }

    #[test]
    fn test_empty_ratio() {
        assert_eq!(RunMetrics::new().snapshot().match_ratio(), 0.0);
    }
}
