//! Scenario schema definitions.

use ps_plants::{ControlSchedule, PlantConfig, RunOptions};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

fn default_version() -> u32 {
    LATEST_VERSION
}

/// One plant, one open-loop input schedule, and run options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    pub plant: PlantConfig,
    #[serde(default)]
    pub schedule: ControlSchedule,
    #[serde(default)]
    pub run: RunOptions,
}

impl Scenario {
    pub fn new(name: impl Into<String>, plant: PlantConfig) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            plant,
            schedule: ControlSchedule::default(),
            run: RunOptions::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: ControlSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_run(mut self, run: RunOptions) -> Self {
        self.run = run;
        self
    }
}
