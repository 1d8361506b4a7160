//! Discrete-time plant models for control loops.
//!
//! A plant is the "system under control": an external controller computes a
//! scalar control output every step, the plant advances its physical state by
//! one fixed time step, and the controller reads back the primary observable.
//!
//! # Architecture
//!
//! - [`PhysicalSystem`] is the shared contract. Controllers hold plants as
//!   `Box<dyn PhysicalSystem>` and never need to know the concrete variant.
//! - [`Trolley`] is a spring-coupled point mass with viscous friction.
//! - [`ContinuousTankHeating`] is a well-mixed tank relaxing toward a feed
//!   temperature and a heater setpoint.
//! - [`PlantConfig`] builds plants from serialized parameters.
//! - [`run_open_loop`] drives a plant with a [`ControlSchedule`] when no
//!   controller is attached.
//!
//! All plants integrate with explicit (forward) Euler at a fixed `dt`. Step
//! cadence is entirely caller-driven: one `apply_control` call is one step.

pub mod config;
pub mod error;
pub mod schedule;
pub mod sim;
pub mod system;
pub mod tank;
pub mod trolley;

pub use config::PlantConfig;
pub use error::{PlantError, PlantResult};
pub use schedule::ControlSchedule;
pub use sim::{RunOptions, RunRecord, run_open_loop};
pub use system::{PhysicalSystem, PlantKind};
pub use tank::{ContinuousTankHeating, TankState};
pub use trolley::{Trolley, TrolleyState};
