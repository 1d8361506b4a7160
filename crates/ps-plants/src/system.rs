//! The capability contract shared by every plant.

use ps_core::Real;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variant tag for a plant, used in logs and run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    Trolley,
    TankHeating,
}

impl fmt::Display for PlantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantKind::Trolley => write!(f, "trolley"),
            PlantKind::TankHeating => write!(f, "tank_heating"),
        }
    }
}

/// A discrete-time plant driven by a scalar control input.
///
/// Implementations keep no step counter: each call to
/// [`apply_control`](PhysicalSystem::apply_control) is exactly one step of
/// length [`dt`](PhysicalSystem::dt). Inputs are not bounds-checked, so
/// non-finite inputs propagate into the state and show up in
/// [`position`](PhysicalSystem::position).
pub trait PhysicalSystem {
    /// Advance the internal state by one time step.
    ///
    /// `disturbance` is accepted for interface compatibility; the current
    /// plants do not add it to their balance equations.
    fn apply_control(&mut self, control_output: Real, disturbance: Real);

    /// Current primary observable (displacement or temperature).
    fn position(&self) -> Real;

    /// Fixed integration step in seconds.
    fn dt(&self) -> Real;

    fn kind(&self) -> PlantKind;

    /// One step with zero disturbance.
    fn apply_undisturbed(&mut self, control_output: Real) {
        self.apply_control(control_output, 0.0);
    }
}
