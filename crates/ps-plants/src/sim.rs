//! Open-loop runner and result recording.

use crate::error::{PlantError, PlantResult};
use crate::schedule::ControlSchedule;
use crate::system::PhysicalSystem;
use ps_core::Real;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::debug;

/// Options for open-loop runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Number of steps to apply
    pub steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps: 100,
            record_every: 1,
        }
    }
}

/// Recorded samples of a run. Sample 0 is the state before any control.
///
/// Exported through [`RunRecord::to_csv`] only; sample 0 carries a NaN control.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunRecord {
    /// Number of steps applied when the sample was taken
    pub step: Vec<usize>,
    /// Elapsed time (seconds), `step * dt`
    pub t: Vec<Real>,
    /// Control applied on the step that produced the sample (NaN for sample 0)
    pub control: Vec<Real>,
    /// Primary observable after the step
    pub position: Vec<Real>,
}

impl RunRecord {
    pub fn len(&self) -> usize {
        self.step.len()
    }

    pub fn is_empty(&self) -> bool {
        self.step.is_empty()
    }

    pub fn final_position(&self) -> Option<Real> {
        self.position.last().copied()
    }

    fn push(&mut self, step: usize, t: Real, control: Real, position: Real) {
        self.step.push(step);
        self.t.push(t);
        self.control.push(control);
        self.position.push(position);
    }

    /// Render as CSV with a `step,t,control,position` header.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("step,t,control,position\n");
        for i in 0..self.len() {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{},{},{},{}",
                self.step[i], self.t[i], self.control[i], self.position[i]
            );
        }
        out
    }
}

/// Drive a plant with a schedule, applying zero disturbance.
pub fn run_open_loop(
    plant: &mut dyn PhysicalSystem,
    schedule: &ControlSchedule,
    opts: &RunOptions,
) -> PlantResult<RunRecord> {
    if opts.steps == 0 {
        return Err(PlantError::InvalidArg {
            what: "steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(PlantError::InvalidArg {
            what: "record_every must be positive",
        });
    }
    schedule.validate()?;

    let dt = plant.dt();
    debug!(kind = %plant.kind(), steps = opts.steps, dt, "open-loop run started");

    let mut record = RunRecord::default();
    record.push(0, 0.0, Real::NAN, plant.position());

    let mut u = Real::NAN;
    for step in 0..opts.steps {
        u = schedule.value_at(step);
        plant.apply_undisturbed(u);

        let done = step + 1;
        if done % opts.record_every == 0 {
            record.push(done, done as Real * dt, u, plant.position());
        }
    }

    // Always record final state
    if opts.steps % opts.record_every != 0 {
        record.push(opts.steps, opts.steps as Real * dt, u, plant.position());
    }

    debug!(
        kind = %plant.kind(),
        samples = record.len(),
        final_position = plant.position(),
        "open-loop run finished"
    );
    Ok(record)
}
