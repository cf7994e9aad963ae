use std::fmt;
use std::time::Duration;

/// Counters gathered during one A* search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes pulled from the open set and closed.
    pub expanded: usize,
    /// Nodes that entered the open set, the start included.
    pub opened: usize,
    /// Open nodes whose cost was lowered after discovery.
    pub improved: usize,
    /// Largest open-set size seen.
    pub peak_open: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expanded={} opened={} improved={} peak_open={}",
            self.expanded, self.opened, self.improved, self.peak_open
        )
    }
}

/// Aggregate of a batch of random searches checked against BFS.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub trials: usize,
    pub found: usize,
    pub unreachable: usize,
    pub truncated: usize,
    pub mismatches: usize,
    pub total_search_time: Duration,
    pub total_expanded: usize,
    pub total_path_length: usize,
}

impl BatchSummary {
    pub fn new() -> Self {
        BatchSummary::default()
    }

    pub fn record(
        &mut self,
        length: Option<usize>,
        reference: Option<usize>,
        capacity: usize,
        stats: &SearchStats,
        elapsed: Duration,
    ) {
        self.trials += 1;
        self.total_search_time += elapsed;
        self.total_expanded += stats.expanded;

        match length {
            Some(len) => {
                self.found += 1;
                self.total_path_length += len;
                if len > capacity {
                    self.truncated += 1;
                }
            }
            None => self.unreachable += 1,
        }

        if length != reference {
            self.mismatches += 1;
        }
    }

    pub fn average_search_time(&self) -> Duration {
        if self.trials == 0 {
            Duration::from_nanos(0)
        } else {
            self.total_search_time / self.trials as u32
        }
    }

    pub fn average_expanded(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_expanded as f64 / self.trials as f64
        }
    }

    pub fn average_path_length(&self) -> f64 {
        if self.found == 0 {
            0.0
        } else {
            self.total_path_length as f64 / self.found as f64
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatches == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trials: {}", self.trials)?;
        writeln!(f, "Paths found: {}", self.found)?;
        writeln!(f, "Unreachable: {}", self.unreachable)?;
        writeln!(f, "Truncated: {}", self.truncated)?;
        writeln!(f, "Average path length: {:.2}", self.average_path_length())?;
        writeln!(f, "Average nodes expanded: {:.1}", self.average_expanded())?;
        writeln!(f, "Average search time: {:.2?}", self.average_search_time())?;

        if self.is_consistent() {
            writeln!(f, "✓ Every A* length matched the BFS reference")?;
        } else {
            writeln!(f, "✗ {} lengths differed from the BFS reference", self.mismatches)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_outcomes() {
        let mut summary = BatchSummary::new();
        let stats = SearchStats {
            expanded: 10,
            ..SearchStats::default()
        };
        summary.record(Some(6), Some(6), 4, &stats, Duration::from_micros(3));
        summary.record(None, None, 4, &stats, Duration::from_micros(1));
        summary.record(Some(2), Some(3), 4, &stats, Duration::from_micros(2));

        assert_eq!(summary.trials, 3);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.unreachable, 1);
        assert_eq!(summary.truncated, 1);
        assert_eq!(summary.mismatches, 1);
        assert!(!summary.is_consistent());
        assert_eq!(summary.average_search_time(), Duration::from_micros(2));
        assert_eq!(summary.average_path_length(), 4.0);
        assert_eq!(summary.average_expanded(), 10.0);
    }

    #[test]
    fn empty_summary_has_zero_averages() {
        let summary = BatchSummary::new();
        assert_eq!(summary.average_search_time(), Duration::from_nanos(0));
        assert_eq!(summary.average_expanded(), 0.0);
        assert!(summary.is_consistent());
        assert!(summary.to_string().contains("Trials: 0"));
    }
}
