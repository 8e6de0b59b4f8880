//! Goal evaluation: a named numeric comparison with a reached flag.

use serde::Serialize;

/// The closed set of comparison kinds a goal can use.
///
/// All comparisons are inclusive: a goal exactly met counts as reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalKind {
    /// Reached when `current <= target` (e.g. a calorie budget).
    AtMost,
    /// Reached when `current >= target` (e.g. a step floor).
    AtLeast,
    /// Reached when `current == target`.
    Exactly,
}

/// One goal evaluation: a target threshold and the observed value.
#[derive(Clone, Copy, Debug)]
pub struct Goal {
    kind: GoalKind,
    target: f64,
    current: f64,
}

/// The persisted result of evaluating one goal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GoalOutcome {
    pub current: f64,
    pub target: f64,
    pub reached: bool,
}

impl Goal {
    pub fn new(kind: GoalKind, target: f64, current: f64) -> Self {
        Self {
            kind,
            target,
            current,
        }
    }

    /// Whether the observed value meets the target.
    pub fn check(&self) -> bool {
        match self.kind {
            GoalKind::AtMost => self.current <= self.target,
            GoalKind::AtLeast => self.current >= self.target,
            GoalKind::Exactly => self.current == self.target,
        }
    }

    /// The structured outcome: inputs plus the reached flag.
    pub fn report(&self) -> GoalOutcome {
        GoalOutcome {
            current: self.current,
            target: self.target,
            reached: self.check(),
        }
    }
}
