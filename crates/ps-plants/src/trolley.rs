//! Spring-coupled trolley with viscous friction.
//!
//! The trolley is a point mass on a surface. Each step it is pushed by the
//! applied force, slowed by friction proportional to velocity, and pulled back
//! by a spring acting on the displacement increment of the previous step
//! (`delta_position`), not on the absolute displacement from an origin.

use crate::error::PlantResult;
use crate::system::{PhysicalSystem, PlantKind};
use ps_core::units::{Mass, Time, to_kg, to_s};
use ps_core::{Real, ensure_non_negative, ensure_positive};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Spring stiffness (N/m).
pub const SPRING_CONSTANT: Real = 50.0;

/// Reference force magnitude (N). Stored with the plant, not used by the update.
pub const REFERENCE_FORCE: Real = 50.0;

/// Mutable state of a trolley.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrolleyState {
    /// Displacement (m)
    pub position: Real,
    /// Velocity (m/s)
    pub velocity: Real,
    /// Displacement change over the last step (m)
    pub delta_position: Real,
}

impl TrolleyState {
    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.delta_position.is_finite()
    }
}

/// Mass-spring-damper plant driven by an applied force.
///
/// Dynamics per step, with input force `F`:
///
/// ```text
/// a  = F/m - c*v/m - k*dx/m
/// v' = v + a*dt
/// x' = x + v'*dt
/// dx' = x' - x
/// ```
///
/// # Example
///
/// ```
/// use ps_plants::{PhysicalSystem, Trolley};
///
/// let mut trolley = Trolley::new(1.0, 0.0, 1.0).unwrap();
/// trolley.apply_control(50.0, 0.0);
/// assert_eq!(trolley.position(), 50.0);
/// ```
#[derive(Clone, Debug)]
pub struct Trolley {
    mass: Real,
    friction: Real,
    spring_constant: Real,
    dt: Real,
    reference_force: Real,
    state: TrolleyState,
}

impl Trolley {
    /// Create a trolley at rest at the origin.
    ///
    /// # Arguments
    ///
    /// * `mass` - Mass in kg (must be positive)
    /// * `friction` - Viscous friction coefficient in N·s/m (must be non-negative)
    /// * `dt` - Time step in seconds (must be positive)
    ///
    /// # Errors
    ///
    /// Returns error if any parameter is out of range or non-finite.
    pub fn new(mass: Real, friction: Real, dt: Real) -> PlantResult<Self> {
        let mass = ensure_positive(mass, "mass")?;
        let friction = ensure_non_negative(friction, "friction")?;
        let dt = ensure_positive(dt, "dt")?;
        debug!(mass, friction, dt, "trolley created");
        Ok(Self {
            mass,
            friction,
            spring_constant: SPRING_CONSTANT,
            dt,
            reference_force: REFERENCE_FORCE,
            state: TrolleyState::default(),
        })
    }

    /// Create a trolley from typed mass and time step.
    pub fn from_quantities(mass: Mass, friction: Real, dt: Time) -> PlantResult<Self> {
        Self::new(to_kg(mass), friction, to_s(dt))
    }

    pub fn mass(&self) -> Real {
        self.mass
    }

    pub fn friction(&self) -> Real {
        self.friction
    }

    pub fn spring_constant(&self) -> Real {
        self.spring_constant
    }

    pub fn reference_force(&self) -> Real {
        self.reference_force
    }

    pub fn state(&self) -> &TrolleyState {
        &self.state
    }

    pub fn velocity(&self) -> Real {
        self.state.velocity
    }

    pub fn delta_position(&self) -> Real {
        self.state.delta_position
    }

    /// Position with its dimensional scalings: `(x, x/dt, x/dt²)`.
    ///
    /// The second and third entries are derived from position alone and are
    /// not the velocity or acceleration state.
    pub fn u(&self) -> (Real, Real, Real) {
        let x = self.state.position;
        (x, x / self.dt, x / (self.dt * self.dt))
    }

    /// Return to rest at the origin. Parameters are untouched.
    pub fn reset(&mut self) {
        self.state = TrolleyState::default();
        trace!("trolley reset");
    }

    /// Net acceleration for a given applied force and the current state.
    pub fn acceleration(&self, force: Real) -> Real {
        force / self.mass
            - self.friction * self.state.velocity / self.mass
            - self.spring_constant * self.state.delta_position / self.mass
    }
}

impl PhysicalSystem for Trolley {
    fn apply_control(&mut self, control_output: Real, disturbance: Real) {
        let was_finite = self.state.is_finite();

        let acceleration = self.acceleration(control_output);
        self.state.velocity += acceleration * self.dt;
        let position = self.state.position + self.state.velocity * self.dt;
        self.state.delta_position = position - self.state.position;
        self.state.position = position;

        trace!(
            force = control_output,
            disturbance,
            position = self.state.position,
            velocity = self.state.velocity,
            delta_position = self.state.delta_position,
            "trolley step"
        );
        if was_finite && !self.state.is_finite() {
            warn!(force = control_output, "trolley state became non-finite");
        }
    }

    fn position(&self) -> Real {
        self.state.position
    }

    fn dt(&self) -> Real {
        self.dt
    }

    fn kind(&self) -> PlantKind {
        PlantKind::Trolley
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlantError;
    use ps_core::CoreError;
    use ps_core::{Tolerances, nearly_equal};

    fn unit_trolley() -> Trolley {
        Trolley::new(1.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn starts_at_rest() {
        let t = Trolley::new(2.0, 0.3, 0.01).unwrap();
        assert_eq!(*t.state(), TrolleyState::default());
        assert_eq!(t.spring_constant(), 50.0);
        assert_eq!(t.reference_force(), 50.0);
    }

    #[test]
    fn zero_input_is_stationary() {
        let mut t = Trolley::new(2.0, 0.5, 0.01).unwrap();
        for _ in 0..1000 {
            t.apply_control(0.0, 0.0);
            assert_eq!(*t.state(), TrolleyState::default());
        }
    }

    #[test]
    fn first_step_arithmetic() {
        let mut t = unit_trolley();
        t.apply_control(50.0, 0.0);
        assert_eq!(t.velocity(), 50.0);
        assert_eq!(t.position(), 50.0);
        assert_eq!(t.delta_position(), 50.0);
    }

    #[test]
    fn second_step_uses_spring_on_delta_position() {
        let mut t = unit_trolley();
        t.apply_control(50.0, 0.0);
        t.apply_control(0.0, 0.0);
        // a = 0 - 0 - 50*50/1
        assert_eq!(t.velocity(), -2450.0);
        assert_eq!(t.position(), 50.0 - 2450.0);
        assert_eq!(t.delta_position(), -2450.0);
    }

    #[test]
    fn friction_opposes_velocity() {
        let mut t = Trolley::new(2.0, 4.0, 0.5).unwrap();
        t.apply_control(10.0, 0.0);
        // a = 10/2 = 5, v = 2.5, x = 1.25
        assert_eq!(t.velocity(), 2.5);
        assert_eq!(t.position(), 1.25);
        // a = 0 - 4*2.5/2 - 50*1.25/2 = -5 - 31.25
        assert_eq!(t.acceleration(0.0), -36.25);
    }

    #[test]
    fn disturbance_is_ignored() {
        let mut a = Trolley::new(1.5, 0.2, 0.1).unwrap();
        let mut b = a.clone();
        for i in 0..20 {
            a.apply_control(i as f64, 0.0);
            b.apply_control(i as f64, 1000.0);
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn apply_undisturbed_matches_zero_disturbance() {
        let mut a = unit_trolley();
        let mut b = unit_trolley();
        a.apply_control(3.0, 0.0);
        b.apply_undisturbed(3.0);
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn reset_is_idempotent_and_keeps_parameters() {
        let mut t = Trolley::new(3.0, 0.7, 0.02).unwrap();
        for _ in 0..10 {
            t.apply_control(25.0, 0.0);
        }
        assert_ne!(t.position(), 0.0);
        t.reset();
        assert_eq!(*t.state(), TrolleyState::default());
        t.reset();
        assert_eq!(*t.state(), TrolleyState::default());
        assert_eq!(t.mass(), 3.0);
        assert_eq!(t.friction(), 0.7);
        assert_eq!(t.dt(), 0.02);
        assert_eq!(t.spring_constant(), SPRING_CONSTANT);
    }

    #[test]
    fn reset_then_replay_matches_fresh() {
        let mut used = Trolley::new(1.0, 0.1, 0.05).unwrap();
        used.apply_control(7.0, 0.0);
        used.reset();
        let mut fresh = Trolley::new(1.0, 0.1, 0.05).unwrap();
        used.apply_control(4.0, 0.0);
        fresh.apply_control(4.0, 0.0);
        assert_eq!(used.state(), fresh.state());
    }

    #[test]
    fn u_scales_position() {
        let mut t = Trolley::new(1.0, 0.0, 0.5).unwrap();
        t.apply_control(8.0, 0.0);
        // v = 4, x = 2
        let (x, xv, xa) = t.u();
        assert_eq!(x, t.position());
        assert_eq!(xv, 2.0 / 0.5);
        assert_eq!(xa, 2.0 / 0.25);
    }

    #[test]
    fn non_finite_input_propagates() {
        let mut t = unit_trolley();
        t.apply_control(f64::NAN, 0.0);
        assert!(t.position().is_nan());
        t.apply_control(0.0, 0.0);
        assert!(t.position().is_nan());
    }

    #[test]
    fn invalid_parameters() {
        assert_eq!(
            Trolley::new(0.0, 0.0, 0.1).unwrap_err(),
            PlantError::Parameter(CoreError::NotPositive {
                what: "mass",
                value: 0.0
            })
        );
        assert!(Trolley::new(-1.0, 0.0, 0.1).is_err());
        assert!(Trolley::new(1.0, -0.1, 0.1).is_err());
        assert!(Trolley::new(1.0, 0.0, 0.0).is_err());
        assert!(Trolley::new(1.0, 0.0, -0.1).is_err());
        assert!(matches!(
            Trolley::new(f64::NAN, 0.0, 0.1),
            Err(PlantError::Parameter(CoreError::NonFinite { .. }))
        ));
    }

    #[test]
    fn from_quantities_converts_units() {
        use uom::si::mass::gram;
        use uom::si::time::millisecond;
        let t =
            Trolley::from_quantities(Mass::new::<gram>(2000.0), 0.1, Time::new::<millisecond>(10.0))
                .unwrap();
        assert!(nearly_equal(t.mass(), 2.0, Tolerances::default()));
        assert!(nearly_equal(t.dt(), 0.01, Tolerances::default()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn delta_position_tracks_last_increment(
            mass in 0.1_f64..10.0,
            friction in 0.0_f64..5.0,
            dt in 1e-3_f64..0.1,
            forces in prop::collection::vec(-100.0_f64..100.0, 1..50),
        ) {
            let mut t = Trolley::new(mass, friction, dt).unwrap();
            for f in forces {
                let before = t.position();
                t.apply_control(f, 0.0);
                prop_assert_eq!(t.delta_position(), t.position() - before);
            }
        }

        #[test]
        fn reset_from_any_state_is_idempotent(
            mass in 0.1_f64..10.0,
            friction in 0.0_f64..5.0,
            dt in 1e-3_f64..0.1,
            forces in prop::collection::vec(-1000.0_f64..1000.0, 0..50),
        ) {
            let mut t = Trolley::new(mass, friction, dt).unwrap();
            for f in forces {
                t.apply_control(f, 0.0);
            }
            t.reset();
            prop_assert_eq!(*t.state(), TrolleyState::default());
            t.reset();
            prop_assert_eq!(*t.state(), TrolleyState::default());
            prop_assert_eq!(t.mass(), mass);
            prop_assert_eq!(t.friction(), friction);
            prop_assert_eq!(t.dt(), dt);
        }

        #[test]
        fn u_is_recomputed_from_position(
            dt in 1e-3_f64..1.0,
            forces in prop::collection::vec(-10.0_f64..10.0, 0..20),
        ) {
            let mut t = Trolley::new(1.0, 0.5, dt).unwrap();
            for f in forces {
                t.apply_control(f, 0.0);
                let (x, xv, xa) = t.u();
                prop_assert_eq!(x, t.position());
                prop_assert_eq!(xv, t.position() / dt);
                prop_assert_eq!(xa, t.position() / (dt * dt));
            }
        }
    }
}
