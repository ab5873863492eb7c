//! # DriveTherm Simulation Harness
//!
//! Drives the thermal manager the way the host platform would: computes the
//! heat-source inputs for a fixed operating point, then pumps the periodic
//! task at the coarse rate and the background task in between, printing the
//! estimated temperatures, the predicted overload peaks, and the admit
//! decision.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use drivetherm_core::config::ThermalConfig;
use drivetherm_core::manager::ThermalManager;
use drivetherm_core::sources::source_inputs;

#[derive(Parser, Debug)]
#[command(
    name = "drivetherm_sim",
    about = "Duty-cycle simulation for the stepper-servo thermal manager"
)]
struct Args {
    /// Drive current [A].
    #[arg(long, default_value_t = 4.0)]
    current: f32,

    /// Rotational speed [rad/s].
    #[arg(long, default_value_t = 36.652)]
    speed: f32,

    /// Simulated duration [s]; one periodic tick per second.
    #[arg(long, default_value_t = 3600)]
    duration: u32,

    /// Print a report every N ticks.
    #[arg(long, default_value_t = 60)]
    report_interval: u32,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ThermalConfig::load(path)?,
        None => ThermalConfig::default(),
    };
    let mut manager = ThermalManager::new(&config)?;

    let inputs = source_inputs(args.current, args.speed);
    info!(
        iron = inputs[0],
        copper = inputs[1],
        driver = inputs[2],
        "heat-source inputs [W]"
    );

    let mut was_available = true;
    for tick in 0..=args.duration {
        manager.set_inputs(&inputs);
        manager.periodic_task();
        manager.background_task();

        let available = manager.is_overload_available();
        if available != was_available {
            if available {
                info!(tick, "overload admission restored");
            } else {
                warn!(tick, violations = ?manager.violations(), "overload admission withdrawn");
            }
            was_available = available;
        }

        if tick % args.report_interval == 0 {
            let temp = manager.current_temps();
            let peak = manager.overload_temps();
            println!(
                "{tick:4} est [{:7.4} {:7.4} {:7.4} {:7.4}] | peak [{:7.4} {:7.4} {:7.4} {:7.4}] | overload: {}",
                temp[0],
                temp[1],
                temp[2],
                temp[3],
                peak[0],
                peak[1],
                peak[2],
                peak[3],
                if available { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}
