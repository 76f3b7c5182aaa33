//! Ordered step sequence behind the progress indicator
//!
//! The sequence keeps a single cursor. Every step's status is derived by
//! comparing its index with the cursor, so there is no per-step flag that
//! could fall out of sync.

use serde::{Deserialize, Serialize};

/// Display status of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Current,
    Completed,
}

/// A named step in the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: &'static str,
    /// Translator key for the step title
    pub title: &'static str,
}

impl Step {
    pub const fn new(id: &'static str, title: &'static str) -> Self {
        Self { id, title }
    }
}

/// Where the sequence currently points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepCursor {
    At(usize),
    /// Terminal state: every step is completed
    Complete,
}

/// A step paired with its derived status, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView<'a> {
    pub index: usize,
    pub step: &'a Step,
    pub status: StepStatus,
}

#[derive(Debug, Clone)]
pub struct StepSequence {
    steps: Vec<Step>,
    cursor: StepCursor,
}

impl StepSequence {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            cursor: StepCursor::At(0),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.cursor, StepCursor::Complete)
    }

    /// Index of the current step, `None` when empty or complete
    pub fn current_index(&self) -> Option<usize> {
        match self.cursor {
            StepCursor::At(index) if index < self.steps.len() => Some(index),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&Step> {
        self.current_index().map(|i| &self.steps[i])
    }

    pub fn is_last(&self) -> bool {
        self.current_index()
            .is_some_and(|i| i + 1 == self.steps.len())
    }

    /// Status of the step at `index`, strictly by position
    pub fn status_of(&self, index: usize) -> StepStatus {
        match self.cursor {
            StepCursor::Complete => StepStatus::Completed,
            StepCursor::At(current) => match index.cmp(&current) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Current,
                std::cmp::Ordering::Greater => StepStatus::Pending,
            },
        }
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.status_of(index) == StepStatus::Completed
    }

    /// Every step with its derived status; empty for an empty sequence
    pub fn views(&self) -> Vec<StepView<'_>> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| StepView {
                index,
                step,
                status: self.status_of(index),
            })
            .collect()
    }

    /// Move to the next step. Returns false and leaves the cursor alone on
    /// the last step, on an empty sequence, or once complete.
    pub fn advance(&mut self) -> bool {
        match self.current_index() {
            Some(index) if index + 1 < self.steps.len() => {
                self.cursor = StepCursor::At(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Move to the previous step. Returns false at the first step, on an
    /// empty sequence, or once complete.
    pub fn retreat(&mut self) -> bool {
        match self.current_index() {
            Some(index) if index > 0 => {
                self.cursor = StepCursor::At(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Enter the terminal state. Has no effect on an empty sequence.
    pub fn complete(&mut self) {
        if !self.steps.is_empty() {
            self.cursor = StepCursor::Complete;
        }
    }

    /// Fraction of steps completed, 0.0 when empty
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        let completed = (0..self.steps.len())
            .filter(|&i| self.is_completed(i))
            .count();
        completed as f64 / self.steps.len() as f64
    }
}
