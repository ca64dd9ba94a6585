//! Process exit status for a lint run.

use super::diagnostic::LintReport;
use super::stats::Stats;

/// Outcome of a lint run as seen by the calling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// No errors and warnings within budget.
    Clean,
    /// At least one error-severity diagnostic.
    Errors,
    /// No errors, but more warnings than `maxWarnings` allows.
    TooManyWarnings,
}

impl ExitStatus {
    /// Process exit code.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::Errors | ExitStatus::TooManyWarnings => 1,
        }
    }
}

/// Decides the exit status from run-wide counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitPolicy {
    /// Warning budget; negative disables the check.
    pub max_warnings: i64,
}

impl Default for ExitPolicy {
    fn default() -> Self {
        Self { max_warnings: -1 }
    }
}

impl ExitPolicy {
    pub fn new(max_warnings: i64) -> Self {
        Self { max_warnings }
    }

    /// Errors always fail. Otherwise warnings fail only when the budget is
    /// enabled and exceeded.
    pub fn decide(&self, stats: Stats) -> ExitStatus {
        if stats.error_count > 0 {
            return ExitStatus::Errors;
        }
        if self.too_many_warnings(stats.warning_count) {
            return ExitStatus::TooManyWarnings;
        }
        ExitStatus::Clean
    }

    fn too_many_warnings(&self, warnings: usize) -> bool {
        u64::try_from(self.max_warnings)
            .map(|max| warnings as u64 > max)
            .unwrap_or(false)
    }
}

/// Exit code for `report` under a `max_warnings` budget.
pub fn decide(report: &LintReport, max_warnings: i64) -> i32 {
    ExitPolicy::new(max_warnings).decide(report.stats()).code()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(error_count: usize, warning_count: usize) -> Stats {
        Stats {
            error_count,
            warning_count,
        }
    }

    #[test]
    fn errors_always_fail() {
        assert_eq!(ExitPolicy::new(-1).decide(stats(1, 0)), ExitStatus::Errors);
        assert_eq!(ExitPolicy::new(100).decide(stats(1, 0)), ExitStatus::Errors);
        assert_eq!(ExitPolicy::new(0).decide(stats(2, 5)), ExitStatus::Errors);
    }

    #[test]
    fn warnings_over_budget_fail() {
        let status = ExitPolicy::new(4).decide(stats(0, 5));
        assert_eq!(status, ExitStatus::TooManyWarnings);
        assert_eq!(status.code(), 1);
    }

    #[test]
    fn warnings_at_budget_pass() {
        assert_eq!(ExitPolicy::new(4).decide(stats(0, 4)), ExitStatus::Clean);
    }

    #[test]
    fn zero_budget_rejects_any_warning() {
        assert_eq!(ExitPolicy::new(0).decide(stats(0, 0)), ExitStatus::Clean);
        assert_eq!(
            ExitPolicy::new(0).decide(stats(0, 1)),
            ExitStatus::TooManyWarnings
        );
    }

    #[test]
    fn negative_budget_disables_warning_check() {
        assert_eq!(ExitPolicy::default().decide(stats(0, 1000)), ExitStatus::Clean);
        assert_eq!(ExitPolicy::new(-5).decide(stats(0, 1)), ExitStatus::Clean);
    }

    #[test]
    fn decide_reads_report_totals() {
        let report = LintReport {
            results: vec![],
            error_count: 0,
            warning_count: 3,
        };
        assert_eq!(decide(&report, 2), 1);
        assert_eq!(decide(&report, 3), 0);
        assert_eq!(decide(&report, -1), 0);
    }
}
