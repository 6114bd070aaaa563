//! End-of-run summary report.

use std::time::Duration;

use arena_core::RunStats;
use chrono::Utc;

/// Print the human-readable run summary.
pub fn print_summary(stats: &RunStats, elapsed: Duration) {
    println!();
    println!("{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Generated: {}", stats.generated);
    println!("  Skipped:   {}", stats.skipped);
    println!("  Failed:    {}", stats.failed);
    println!("  Elapsed:   {}", format_elapsed(elapsed));
    println!("  Finished:  {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
}

fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let (mins, secs) = (total_secs / 60, total_secs % 60);
    if mins > 0 {
        format!("{mins}m {secs:02}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_runs_are_seconds_only() {
        assert_eq!(format_elapsed(Duration::from_secs(42)), "42s");
    }

    #[test]
    fn long_runs_carry_minutes() {
        assert_eq!(format_elapsed(Duration::from_secs(605)), "10m 05s");
    }
}
