//! Continuously-stirred heated tank.

use crate::error::PlantResult;
use crate::system::{PhysicalSystem, PlantKind};
use ps_core::{Real, ensure_positive};
use ps_core::units::{Temperature, Time, k, to_s};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Incoming fluid temperature (K). Also the initial tank temperature.
pub const FEED_TEMPERATURE: Real = 300.0;
/// Heat capacity of the tank relative to the fluid.
pub const CAPACITY_RATIO: Real = 1.0;
/// Residence time (s).
pub const RESIDENCE_TIME: Real = 4.0;
/// Heat-exchange coefficient toward the setpoint (1/s).
pub const HEAT_EXCHANGE: Real = 2.0;

/// Mutable state of a heated tank.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TankState {
    /// Tank temperature (K)
    pub temperature: Real,
}

impl Default for TankState {
    fn default() -> Self {
        Self {
            temperature: FEED_TEMPERATURE,
        }
    }
}

/// Single well-mixed volume heated toward a target temperature.
///
/// Dynamics: `dT/dt = 1/(1+epsilon) * [(Tf - T)/tau + Q*(Tq - T)]`, where `Tq`
/// is the control input. The right-hand side pulls `T` toward both the feed
/// temperature and the setpoint, so for small enough `dt` the temperature
/// settles between the two without overshoot.
///
/// There is no reset; build a new tank to start over.
#[derive(Clone, Debug)]
pub struct ContinuousTankHeating {
    dt: Real,
    feed_temperature: Real,
    epsilon: Real,
    tau: Real,
    q: Real,
    state: TankState,
}

impl ContinuousTankHeating {
    /// Create a tank at the feed temperature.
    ///
    /// # Errors
    ///
    /// Returns error if `dt` is not positive or non-finite.
    pub fn new(dt: Real) -> PlantResult<Self> {
        let dt = ensure_positive(dt, "dt")?;
        debug!(dt, "tank heating created");
        Ok(Self {
            dt,
            feed_temperature: FEED_TEMPERATURE,
            epsilon: CAPACITY_RATIO,
            tau: RESIDENCE_TIME,
            q: HEAT_EXCHANGE,
            state: TankState::default(),
        })
    }

    pub fn from_quantity(dt: Time) -> PlantResult<Self> {
        Self::new(to_s(dt))
    }

    pub fn state(&self) -> &TankState {
        &self.state
    }

    pub fn temperature(&self) -> Temperature {
        k(self.state.temperature)
    }

    pub fn feed_temperature(&self) -> Real {
        self.feed_temperature
    }

    pub fn epsilon(&self) -> Real {
        self.epsilon
    }

    pub fn tau(&self) -> Real {
        self.tau
    }

    pub fn q(&self) -> Real {
        self.q
    }

    /// Temperature derivative for a given setpoint at the current state.
    pub fn dtdt(&self, setpoint: Real) -> Real {
        let t = self.state.temperature;
        1.0 / (1.0 + self.epsilon)
            * (1.0 / self.tau * (self.feed_temperature - t) + self.q * (setpoint - t))
    }

    /// Advance one step toward `setpoint`. Same as `apply_control`.
    pub fn update(&mut self, setpoint: Real, disturbance: Real) {
        let was_finite = self.state.temperature.is_finite();

        self.state.temperature += self.dtdt(setpoint) * self.dt;

        trace!(
            setpoint,
            disturbance,
            temperature = self.state.temperature,
            "tank heating step"
        );
        if was_finite && !self.state.temperature.is_finite() {
            warn!(setpoint, "tank temperature became non-finite");
        }
    }
}

impl PhysicalSystem for ContinuousTankHeating {
    fn apply_control(&mut self, control_output: Real, disturbance: Real) {
        self.update(control_output, disturbance);
    }

    fn position(&self) -> Real {
        self.state.temperature
    }

    fn dt(&self) -> Real {
        self.dt
    }

    fn kind(&self) -> PlantKind {
        PlantKind::TankHeating
    }
}
