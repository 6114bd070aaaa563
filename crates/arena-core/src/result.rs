//! Per-task outcomes and run-level tallies.

use std::fmt;

/// Terminal outcome of one generation task.
///
/// Exactly one of these is recorded per planned task; a best-effort
/// artifact delivered after exhausted repair attempts still counts as
/// `Generated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationResult {
    /// Destination artifact already existed, validated clean, and no
    /// force flag targeted it. No process was spawned.
    Skipped,
    /// An artifact was produced and copied to its destination.
    Generated,
    /// The vendor CLI failed or never produced the expected artifact.
    Failed,
}

impl fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Skipped => "skipped",
            Self::Generated => "generated",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Run-level result tallies.
///
/// An explicit accumulator owned by the scheduler's caller; there is no
/// process-wide counter state anywhere.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn record(&mut self, result: GenerationResult) {
        match result {
            GenerationResult::Generated => self.generated += 1,
            GenerationResult::Skipped => self.skipped += 1,
            GenerationResult::Failed => self.failed += 1,
        }
    }

    /// Total number of recorded results.
    pub fn total(&self) -> usize {
        self.generated + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_sum_to_recorded_count() {
        let mut stats = RunStats::default();
        for result in [
            GenerationResult::Generated,
            GenerationResult::Skipped,
            GenerationResult::Skipped,
            GenerationResult::Failed,
        ] {
            stats.record(result);
        }
        assert_eq!(stats.generated, 1);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.total(), 4);
    }
}
