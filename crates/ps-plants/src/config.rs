//! Serializable plant parameters.

use crate::error::PlantResult;
use crate::system::{PhysicalSystem, PlantKind};
use crate::tank::ContinuousTankHeating;
use crate::trolley::Trolley;
use ps_core::Real;
use serde::{Deserialize, Serialize};

/// Construction parameters for any supported plant.
///
/// New plants add a variant here and an arm in [`PlantConfig::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlantConfig {
    Trolley { mass: Real, friction: Real, dt: Real },
    TankHeating { dt: Real },
}

impl PlantConfig {
    pub fn kind(&self) -> PlantKind {
        match self {
            PlantConfig::Trolley { .. } => PlantKind::Trolley,
            PlantConfig::TankHeating { .. } => PlantKind::TankHeating,
        }
    }

    /// Build a fresh plant through its validating constructor.
    pub fn build(&self) -> PlantResult<Box<dyn PhysicalSystem>> {
        let plant: Box<dyn PhysicalSystem> = match *self {
            PlantConfig::Trolley { mass, friction, dt } => {
                Box::new(Trolley::new(mass, friction, dt)?)
            }
            PlantConfig::TankHeating { dt } => Box::new(ContinuousTankHeating::new(dt)?),
        };
        Ok(plant)
    }
}
