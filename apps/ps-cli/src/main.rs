use clap::{Parser, Subcommand};
use ps_plants::{
    ContinuousTankHeating, ControlSchedule, PhysicalSystem, RunOptions, RunRecord, Trolley,
    run_open_loop,
};
use ps_project::{ProjectResult, load_scenario, run_scenario};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "PlantSim CLI - discrete-time plant models for control loops", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and parameters
    Validate {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
    },
    /// Run a scenario open loop
    Run {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
        /// Output CSV file path (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Push a trolley with a constant force and print CSV to stdout
    Trolley {
        /// Mass in kg
        #[arg(long, default_value_t = 1.0)]
        mass: f64,
        /// Viscous friction coefficient in N·s/m
        #[arg(long, default_value_t = 0.0)]
        friction: f64,
        /// Time step in seconds
        #[arg(long, default_value_t = 0.01)]
        dt: f64,
        /// Applied force in N
        #[arg(long)]
        force: f64,
        /// Number of steps
        #[arg(long, default_value_t = 100)]
        steps: usize,
    },
    /// Heat a tank toward a constant setpoint and print CSV to stdout
    Tank {
        /// Time step in seconds
        #[arg(long, default_value_t = 0.1)]
        dt: f64,
        /// Target temperature in K
        #[arg(long)]
        setpoint: f64,
        /// Number of steps
        #[arg(long, default_value_t = 100)]
        steps: usize,
    },
}

fn main() -> ProjectResult<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            output,
        } => cmd_run(&scenario_path, output.as_deref()),
        Commands::Trolley {
            mass,
            friction,
            dt,
            force,
            steps,
        } => {
            let mut plant = Trolley::new(mass, friction, dt)?;
            cmd_constant(&mut plant, force, steps)
        }
        Commands::Tank {
            dt,
            setpoint,
            steps,
        } => {
            let mut plant = ContinuousTankHeating::new(dt)?;
            cmd_constant(&mut plant, setpoint, steps)
        }
    }
}

fn cmd_validate(scenario_path: &Path) -> ProjectResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = load_scenario(scenario_path)?;
    println!(
        "✓ Scenario '{}' is valid ({} plant, {} steps)",
        scenario.name,
        scenario.plant.kind(),
        scenario.run.steps
    );
    Ok(())
}

fn cmd_run(scenario_path: &Path, output: Option<&Path>) -> ProjectResult<()> {
    let scenario = load_scenario(scenario_path)?;
    println!("Running scenario: {}", scenario.name);

    let record = run_scenario(&scenario)?;
    print_summary(&record);

    if let Some(path) = output {
        std::fs::write(path, record.to_csv())?;
        println!("✓ Wrote {} samples to {}", record.len(), path.display());
    }
    Ok(())
}

fn cmd_constant(plant: &mut dyn PhysicalSystem, value: f64, steps: usize) -> ProjectResult<()> {
    let opts = RunOptions {
        steps,
        record_every: 1,
    };
    let record = run_open_loop(plant, &ControlSchedule::Constant { value }, &opts)?;
    print!("{}", record.to_csv());
    Ok(())
}

fn print_summary(record: &RunRecord) {
    println!("  Samples: {}", record.len());
    if let (Some(t), Some(x)) = (record.t.last(), record.final_position()) {
        println!("  Final time: {:.3} s", t);
        println!("  Final position: {:.6}", x);
    }
}
