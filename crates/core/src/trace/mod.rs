use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{Result, SortVizError};

/// One recorded step of a sorting run.
///
/// Operations are intention-preserving: replaying them in order against a
/// copy of the original input reproduces the full execution, including the
/// final sorted order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    /// Read-only observation of positions `i` and `j`.
    Compare { i: usize, j: usize },
    /// Exchange of the values at positions `i` and `j`.
    Swap { i: usize, j: usize },
    /// Direct store of `value` at position `i`.
    Overwrite { i: usize, value: f32 },
}

impl Operation {
    /// Applies the operation's mutation (if any) to the given values.
    pub fn apply(&self, values: &mut [f32]) -> Result<()> {
        let len = values.len();
        match *self {
            Operation::Compare { i, j } => {
                check_index(i, len)?;
                check_index(j, len)?;
            }
            Operation::Swap { i, j } => {
                check_index(i, len)?;
                check_index(j, len)?;
                values.swap(i, j);
            }
            Operation::Overwrite { i, value } => {
                check_index(i, len)?;
                values[i] = value;
            }
        }
        Ok(())
    }

    /// The distinct positions this operation involves, in recorded order.
    pub fn touched(&self) -> Vec<usize> {
        match *self {
            Operation::Compare { i, j } | Operation::Swap { i, j } => {
                if i == j {
                    vec![i]
                } else {
                    vec![i, j]
                }
            }
            Operation::Overwrite { i, .. } => vec![i],
        }
    }

    /// Whether the operation mutates the array when applied.
    pub fn mutates(&self) -> bool {
        !matches!(self, Operation::Compare { .. })
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(SortVizError::IndexOutOfBounds { index, len })
    }
}

/// Ordered record of one sorting run, drained front-to-back exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    source_len: usize,
    ops: VecDeque<Operation>,
    consumed: usize,
}

impl Trace {
    /// Creates an empty trace for an input of `source_len` elements.
    pub fn new(source_len: usize) -> Self {
        Self {
            source_len,
            ops: VecDeque::new(),
            consumed: 0,
        }
    }

    /// Length of the array the trace was recorded against.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn push(&mut self, op: Operation) {
        self.ops.push_back(op);
    }

    /// Removes and returns the next operation, if any remain.
    pub fn pop_front(&mut self) -> Option<Operation> {
        let op = self.ops.pop_front();
        if op.is_some() {
            self.consumed += 1;
        }
        op
    }

    pub fn remaining(&self) -> usize {
        self.ops.len()
    }

    /// How many operations have already been popped off this trace.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn is_drained(&self) -> bool {
        self.ops.is_empty()
    }

    /// The remaining operations, oldest first, without draining them.
    pub fn ops(&self) -> impl Iterator<Item = &Operation> {
        self.ops.iter()
    }

    /// Serialises the trace as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replays the whole trace against `values` without a scheduler.
    ///
    /// Used by tests and the trace export path; the animated path goes
    /// through the replay module one operation per tick.
    pub fn apply_all(&mut self, values: &mut [f32]) -> Result<()> {
        while let Some(op) = self.pop_front() {
            op.apply(values)?;
        }
        Ok(())
    }
}
