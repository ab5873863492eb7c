//! # DriveTherm Core
//!
//! Thermal-overload management for a stepper-servo motor drive. Runs
//! alongside the motion controller on an embedded target, estimates motor
//! and driver-stage temperatures from the commanded operating point, and
//! predicts whether a bounded-duration overload can be admitted in the next
//! service window without crossing protective thermal limits.
//!
//! ## Architecture
//!
//! - [`solver`] - fixed-order RK4 integrator over a linear state-space model
//! - [`plant`] - the drive's thermal plant constants (3 states, 3 heat
//!   inputs, 4 temperature outputs)
//! - [`sources`] - loss model converting (current, speed) into heat powers
//! - [`estimator`] - coarse-period temperature estimation
//! - [`predictor`] - overload-then-rated horizon sweep with peak capture
//! - [`manager`] - façade owning the estimator and predictor, pumped by the
//!   host's periodic and background task contexts
//! - [`torque`] / [`pi`] - torque setpoint management and the integer PI
//!   loop that consume the thermal signals
//!
//! ## Zero-Allocation Tasks
//!
//! All runtime state lives in compile-time-sized arrays owned by the
//! components. The periodic and background tasks perform no heap
//! allocation; integrator scratch is stack-resident and bounded at compile
//! time.

pub mod config;
pub mod estimator;
pub mod manager;
pub mod pi;
pub mod plant;
pub mod predictor;
pub mod solver;
pub mod sources;
pub mod torque;

pub use config::{ConfigError, ThermalConfig};
pub use manager::ThermalManager;
pub use plant::{NUM_INPUTS, NUM_OUTPUTS, NUM_STATES, THERMAL_PLANT};
pub use predictor::LimitViolations;
pub use solver::{SolveError, StateSpace};
pub use sources::source_inputs;
