//! Error/warning counting over diagnostics.

use std::ops::Add;

use super::diagnostic::Diagnostic;
use super::rule::Severity;

/// Error and warning counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub error_count: usize,
    pub warning_count: usize,
}

impl Stats {
    /// Count diagnostics by severity.
    ///
    /// Anything that is not an error counts as a warning.
    pub fn from_messages(messages: &[Diagnostic]) -> Self {
        messages.iter().fold(Self::default(), |mut stats, message| {
            match message.severity {
                Severity::Error => stats.error_count += 1,
                Severity::Warning => stats.warning_count += 1,
            }
            stats
        })
    }

    /// Total number of problems.
    pub fn total(&self) -> usize {
        self.error_count + self.warning_count
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, other: Stats) -> Stats {
        Stats {
            error_count: self.error_count + other.error_count,
            warning_count: self.warning_count + other.warning_count,
        }
    }
}

/// Reduce a list of diagnostics to error/warning counts.
pub fn aggregate(messages: &[Diagnostic]) -> Stats {
    Stats::from_messages(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn diag(severity: Severity) -> Diagnostic {
        Diagnostic::new("metric", severity, json!(1), "msg")
    }

    #[test]
    fn empty_list_is_zero() {
        assert_eq!(aggregate(&[]), Stats::default());
    }

    #[test]
    fn counts_by_severity() {
        let messages = vec![
            diag(Severity::Error),
            diag(Severity::Warning),
            diag(Severity::Error),
            diag(Severity::Warning),
            diag(Severity::Warning),
        ];
        let stats = aggregate(&messages);
        assert_eq!(stats.error_count, 2);
        assert_eq!(stats.warning_count, 3);
        assert_eq!(stats.total(), messages.len());
    }

    #[test]
    fn order_does_not_matter() {
        let a = vec![diag(Severity::Error), diag(Severity::Warning)];
        let b = vec![diag(Severity::Warning), diag(Severity::Error)];
        assert_eq!(aggregate(&a), aggregate(&b));
    }

    #[test]
    fn stats_add() {
        let sum = Stats {
            error_count: 1,
            warning_count: 2,
        } + Stats {
            error_count: 3,
            warning_count: 4,
        };
        assert_eq!(sum.error_count, 4);
        assert_eq!(sum.warning_count, 6);
    }
}
