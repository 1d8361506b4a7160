//! Open-loop control inputs indexed by step number.
//!
//! A schedule stands in for an external controller: it maps the 0-based step
//! index to the control output applied at that step.

use crate::error::{PlantError, PlantResult};
use ps_core::Real;
use serde::{Deserialize, Serialize};

/// Control input as a function of step index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlSchedule {
    /// Same value every step.
    Constant { value: Real },
    /// `before` for steps `< at_step`, `after` from `at_step` on.
    Step {
        before: Real,
        after: Real,
        at_step: usize,
    },
    /// Explicit per-step values. The last value is held once exhausted; an
    /// empty sequence yields zero.
    Sequence { values: Vec<Real> },
}

impl Default for ControlSchedule {
    fn default() -> Self {
        ControlSchedule::Constant { value: 0.0 }
    }
}

impl ControlSchedule {
    /// Control output for the given 0-based step.
    pub fn value_at(&self, step: usize) -> Real {
        match self {
            ControlSchedule::Constant { value } => *value,
            ControlSchedule::Step {
                before,
                after,
                at_step,
            } => {
                if step < *at_step {
                    *before
                } else {
                    *after
                }
            }
            ControlSchedule::Sequence { values } => values
                .get(step)
                .or_else(|| values.last())
                .copied()
                .unwrap_or(0.0),
        }
    }

    /// Reject schedules containing non-finite values.
    pub fn validate(&self) -> PlantResult<()> {
        let non_finite = match self {
            ControlSchedule::Constant { value } => !value.is_finite(),
            ControlSchedule::Step { before, after, .. } => {
                !before.is_finite() || !after.is_finite()
            }
            ControlSchedule::Sequence { values } => values.iter().any(|v| !v.is_finite()),
        };
        if non_finite {
            return Err(PlantError::InvalidSchedule {
                what: format!("non-finite control value in {self:?}"),
            });
        }
        Ok(())
    }
}
