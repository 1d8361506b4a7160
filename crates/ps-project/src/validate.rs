//! Scenario validation logic.

use crate::schema::{LATEST_VERSION, Scenario};
use ps_plants::PlantError;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid plant: {0}")]
    Plant(#[from] PlantError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", scenario.name),
            reason: "must not be empty".to_string(),
        });
    }

    if scenario.run.steps == 0 {
        return Err(ValidationError::InvalidValue {
            field: "run.steps".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    if scenario.run.record_every == 0 {
        return Err(ValidationError::InvalidValue {
            field: "run.record_every".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    scenario.schedule.validate()?;

    // Constructors carry the parameter checks.
    scenario.plant.build()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_plants::{ControlSchedule, PlantConfig, RunOptions};

    fn tank_scenario() -> Scenario {
        Scenario::new("tank", PlantConfig::TankHeating { dt: 0.1 })
    }

    #[test]
    fn default_scenario_is_valid() {
        validate_scenario(&tank_scenario()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut s = tank_scenario();
        s.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_empty_name() {
        let mut s = tank_scenario();
        s.name = "  ".to_string();
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn rejects_zero_steps_and_decimation() {
        let s = tank_scenario().with_run(RunOptions {
            steps: 0,
            record_every: 1,
        });
        let err = validate_scenario(&s).unwrap_err();
        assert!(err.to_string().contains("run.steps"));

        let s = tank_scenario().with_run(RunOptions {
            steps: 10,
            record_every: 0,
        });
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn rejects_bad_plant_and_schedule() {
        let s = Scenario::new(
            "bad trolley",
            PlantConfig::Trolley {
                mass: -1.0,
                friction: 0.0,
                dt: 0.1,
            },
        );
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::Plant(_))
        ));

        let s = tank_scenario().with_schedule(ControlSchedule::Constant { value: f64::NAN });
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::Plant(PlantError::InvalidSchedule { .. }))
        ));
    }
}
