//! Scores produced by the checks.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

/// Running `(score, out_of, messages)` total of a check.
///
/// Every message corresponds to one point missing from `score`, or to one
/// point added to `out_of` alone for recommendations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub score: u32,
    pub out_of: u32,
    pub messages: Vec<String>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one point if `passed`, otherwise record `message`.
    pub fn assert_true(&mut self, passed: bool, message: impl Into<String>) {
        self.out_of += 1;
        if passed {
            self.score += 1;
        } else {
            self.messages.push(message.into());
        }
    }

    pub fn pass(&mut self) {
        self.out_of += 1;
        self.score += 1;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.out_of += 1;
        self.messages.push(message.into());
    }

    /// Grow `out_of` without a matching score point.
    pub fn recommend(&mut self, message: impl Into<String>) {
        self.fail(message);
    }

    pub fn value(&self) -> (u32, u32) {
        (self.score, self.out_of)
    }

    /// Nothing was checked.
    pub fn is_empty(&self) -> bool {
        self.out_of == 0
    }

    pub fn passed(&self) -> bool {
        self.score == self.out_of
    }

    pub fn into_result(self, priority: Priority, name: impl Into<String>) -> CheckResult {
        CheckResult {
            priority,
            name: name.into(),
            score: self.score,
            out_of: self.out_of,
            messages: self.messages,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        self.score += other.score;
        self.out_of += other.out_of;
        self.messages.extend(other.messages);
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(mut self, other: Tally) -> Tally {
        self += other;
        self
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::new(), Add::add)
    }
}

/// Importance of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    pub fn weight(self) -> u8 {
        self as u8
    }

    /// Report header for this priority.
    pub fn header(self) -> &'static str {
        match self {
            Priority::High => "Required",
            Priority::Medium => "Recommended",
            Priority::Low => "Suggested",
        }
    }
}

/// Named outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub priority: Priority,
    pub name: String,
    pub score: u32,
    pub out_of: u32,
    pub messages: Vec<String>,
}

impl CheckResult {
    pub fn value(&self) -> (u32, u32) {
        (self.score, self.out_of)
    }

    pub fn passed(&self) -> bool {
        self.score == self.out_of
    }
}
