//! Thermal overload predictor.
//!
//! Simulates a hypothetical duty cycle over a predictive horizon: a leading
//! overload segment followed by a rated-load segment, starting from the
//! estimator's latest thermal state. Per-output peak temperatures recorded
//! during the sweep are compared against ambient-referenced protective
//! limits to decide whether an overload may be admitted.

use bitflags::bitflags;
use static_assertions::const_assert_eq;

use crate::config::PredictorConfig;
use crate::plant::{NUM_INPUTS, NUM_OUTPUTS, NUM_STATES, THERMAL_PLANT};
use crate::solver::{self, StateSpace};

bitflags! {
    /// Outputs whose predicted peak exceeds its protective limit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LimitViolations: u8 {
        /// Motor winding peak above limit.
        const WINDING = 1 << 0;
        /// Motor housing peak above limit.
        const HOUSING = 1 << 1;
        /// Driver board peak above limit.
        const BOARD = 1 << 2;
        /// Driver junction peak above limit.
        const JUNCTION = 1 << 3;
    }
}

// One violation flag per plant output.
const_assert_eq!(NUM_OUTPUTS, 4);

/// Predictive overload admission check.
#[derive(Debug, Clone)]
pub struct OverloadPredictor {
    /// Integration step [s].
    step_size: f32,
    /// Predictive horizon length [steps].
    period_counts: u32,
    /// Leading steps driven at the overload input level.
    overload_counts: u32,
    /// Ambient temperature the protective limits are referenced to [°C].
    ambient_temp: f32,
    /// Per-output peaks over the last sweep, relative to ambient [°C].
    max_temps: [f32; NUM_OUTPUTS],
    /// Protective limits relative to ambient [°C].
    max_temp_thresholds: [f32; NUM_OUTPUTS],
    /// Starting state for the next sweep, refreshed from the estimator.
    initial_state: [f32; NUM_STATES],
    /// Heat inputs during the overload segment [W].
    overload_inputs: [f32; NUM_INPUTS],
    /// Heat inputs during the rated segment [W].
    rated_inputs: [f32; NUM_INPUTS],
    /// Keep peaks across sweeps instead of resetting them per sweep.
    lifetime_peaks: bool,
    /// Working state consumed by the sweep.
    state: [f32; NUM_STATES],
    outputs: [f32; NUM_OUTPUTS],
    model: &'static StateSpace<NUM_STATES, NUM_INPUTS, NUM_OUTPUTS>,
}

impl OverloadPredictor {
    /// Build a predictor against the drive's thermal plant.
    pub fn new(config: &PredictorConfig) -> Self {
        Self {
            step_size: config.step_size,
            period_counts: config.period_counts,
            overload_counts: config.overload_counts,
            ambient_temp: config.ambient_temp,
            max_temps: [0.0; NUM_OUTPUTS],
            max_temp_thresholds: config.max_temp_thresholds,
            initial_state: [0.0; NUM_STATES],
            overload_inputs: config.overload_inputs,
            rated_inputs: config.rated_inputs,
            lifetime_peaks: config.lifetime_peaks,
            state: [0.0; NUM_STATES],
            outputs: [0.0; NUM_OUTPUTS],
            model: &THERMAL_PLANT,
        }
    }

    /// Seed the next sweep with the estimator's thermal state.
    pub fn set_initial_state(&mut self, state: &[f32; NUM_STATES]) {
        self.initial_state = *state;
    }

    /// Shift the protective limits to a new ambient temperature.
    ///
    /// The limits are expressed relative to ambient, so a rise in ambient
    /// lowers every limit by the same amount (and a drop raises them).
    pub fn update_ambient_temperature(&mut self, ambient: f32) {
        let difference = self.ambient_temp - ambient;
        for limit in &mut self.max_temp_thresholds {
            *limit += difference;
        }
        self.ambient_temp = ambient;
    }

    /// Run one predictive sweep and refresh the per-output peaks.
    ///
    /// The working state is re-seeded from the latest estimator state, then
    /// advanced across the horizon: `overload_counts` steps at the overload
    /// input, one transition step interpolating down to the rated input,
    /// and rated input for the remainder. Peaks reset at sweep entry unless
    /// `lifetime_peaks` is set. An integrator failure aborts the sweep and
    /// keeps the peaks recorded so far.
    pub fn background_task(&mut self) {
        self.state = self.initial_state;
        if !self.lifetime_peaks {
            self.max_temps = [0.0; NUM_OUTPUTS];
        }

        for itr in 0..self.period_counts {
            let (u_now, u_next) = if itr < self.overload_counts {
                (self.overload_inputs, self.overload_inputs)
            } else if itr == self.overload_counts {
                (self.overload_inputs, self.rated_inputs)
            } else {
                (self.rated_inputs, self.rated_inputs)
            };

            if solver::step(
                self.model,
                self.step_size,
                &mut self.state,
                &u_now,
                &u_next,
                &mut self.outputs,
            )
            .is_err()
            {
                break;
            }

            for j in 0..NUM_OUTPUTS {
                self.max_temps[j] = self.max_temps[j].max(self.outputs[j]);
            }
        }
    }

    /// Outputs whose predicted peak exceeds its protective limit.
    pub fn violations(&self) -> LimitViolations {
        let mut violations = LimitViolations::empty();
        for j in 0..NUM_OUTPUTS {
            if self.max_temps[j] > self.max_temp_thresholds[j] {
                violations |= LimitViolations::from_bits_truncate(1u8 << j);
            }
        }
        violations
    }

    /// True iff every predicted peak stays within its protective limit.
    pub fn is_overload_available(&self) -> bool {
        self.violations().is_empty()
    }

    /// Per-output peaks over the last sweep, relative to ambient [°C].
    pub fn max_temps(&self) -> &[f32; NUM_OUTPUTS] {
        &self.max_temps
    }

    /// Protective limits relative to ambient [°C].
    pub fn max_temp_thresholds(&self) -> &[f32; NUM_OUTPUTS] {
        &self.max_temp_thresholds
    }
}
