//! Results of a full checker run.

use glider_common::{CheckResult, GliderResult, Priority};
use serde::Serialize;

/// What one check produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Results { results: Vec<CheckResult> },
    /// The check found nothing to inspect.
    Skipped,
    /// The check aborted, usually on a missing authority table.
    Error { message: String },
}

/// Outcome of one check, keyed by the check method name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckEntry {
    pub check: &'static str,
    pub outcome: CheckOutcome,
}

/// Outcomes of every check in run order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuiteReport {
    pub entries: Vec<CheckEntry>,
}

impl SuiteReport {
    pub(crate) fn record(&mut self, check: &'static str, outcome: GliderResult<Vec<CheckResult>>) {
        let outcome = match outcome {
            Ok(results) if results.is_empty() => CheckOutcome::Skipped,
            Ok(results) => CheckOutcome::Results { results },
            Err(e) => CheckOutcome::Error {
                message: e.to_string(),
            },
        };
        self.entries.push(CheckEntry { check, outcome });
    }

    pub fn get(&self, check: &str) -> Option<&CheckOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.check == check)
            .map(|entry| &entry.outcome)
    }

    /// Every result of the checks that completed.
    pub fn results(&self) -> impl Iterator<Item = &CheckResult> {
        self.entries.iter().flat_map(|entry| match &entry.outcome {
            CheckOutcome::Results { results } => results.as_slice(),
            _ => &[][..],
        })
    }

    /// `(check, message)` of every aborted check.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            CheckOutcome::Error { message } => Some((entry.check, message.as_str())),
            _ => None,
        })
    }

    pub fn by_priority(&self, priority: Priority) -> impl Iterator<Item = &CheckResult> {
        self.results().filter(move |result| result.priority == priority)
    }

    /// Summed `(score, out_of)` of all results.
    pub fn total(&self) -> (u32, u32) {
        self.results()
            .fold((0, 0), |(score, out_of), r| (score + r.score, out_of + r.out_of))
    }

    /// Every result scored full marks and no check aborted.
    pub fn passed(&self) -> bool {
        self.errors().next().is_none() && self.results().all(CheckResult::passed)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glider_common::{GliderError, Tally};

    fn result(priority: Priority, passed: bool) -> CheckResult {
        let mut tally = Tally::new();
        tally.assert_true(passed, "failed");
        tally.into_result(priority, "Example")
    }

    #[test]
    fn test_record_outcomes() {
        let mut report = SuiteReport::default();
        report.record("check_a", Ok(vec![result(Priority::High, true)]));
        report.record("check_b", Ok(vec![]));
        report.record(
            "check_c",
            Err(GliderError::TableUnavailable("sea_name".to_string())),
        );
        report.record("check_d", Ok(vec![result(Priority::Low, false)]));

        assert_eq!(report.get("check_b"), Some(&CheckOutcome::Skipped));
        assert_eq!(
            report.errors().collect::<Vec<_>>(),
            vec![("check_c", "Was unable to fetch sea_name table")]
        );
        assert_eq!(report.total(), (1, 2));
        assert_eq!(report.by_priority(Priority::Low).count(), 1);
        assert!(!report.passed());
    }

    #[test]
    fn test_json_shape() {
        let mut report = SuiteReport::default();
        report.record("check_ioos_ra", Ok(vec![result(Priority::Low, true)]));
        report.record(
            "check_ncei_tables",
            Err(GliderError::TableUnavailable("project".to_string())),
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["entries"][0]["outcome"]["status"], "results");
        assert_eq!(json["entries"][0]["outcome"]["results"][0]["priority"], "low");
        assert_eq!(json["entries"][1]["outcome"]["status"], "error");
        assert_eq!(
            json["entries"][1]["outcome"]["message"],
            "Was unable to fetch project table"
        );
    }
}
