//! Thermal estimator.
//!
//! Advances the drive's thermal state by one coarse service period per
//! invocation, stepping the plant model across fine sub-intervals under the
//! average heat input reported by the application for the elapsed period.

use crate::config::EstimatorConfig;
use crate::plant::{NUM_INPUTS, NUM_OUTPUTS, NUM_STATES, THERMAL_PLANT};
use crate::solver::{self, StateSpace};

/// Coarse-period temperature estimator.
///
/// Owns the persistent thermal state (relative to ambient) and the latest
/// plant outputs. The state buffer is advanced in place by
/// [`periodic_task`](Self::periodic_task), so consecutive periods chain
/// without copying.
#[derive(Debug, Clone)]
pub struct Estimator {
    /// Integration sub-step [s].
    step_size: f32,
    /// Sub-steps per coarse period.
    period_counts: u32,
    /// Ambient temperature [°C].
    ambient_temp: f32,
    /// Average heat inputs held constant across the period [W].
    ave_inputs: [f32; NUM_INPUTS],
    /// Thermal state, relative to ambient [°C].
    state: [f32; NUM_STATES],
    /// Latest plant outputs, relative to ambient [°C].
    outputs: [f32; NUM_OUTPUTS],
    model: &'static StateSpace<NUM_STATES, NUM_INPUTS, NUM_OUTPUTS>,
}

impl Estimator {
    /// Build an estimator against the drive's thermal plant.
    pub fn new(config: &EstimatorConfig) -> Self {
        Self {
            step_size: config.step_size,
            period_counts: config.period_counts,
            ambient_temp: config.ambient_temp,
            ave_inputs: [0.0; NUM_INPUTS],
            state: config.initial_state,
            outputs: [0.0; NUM_OUTPUTS],
            model: &THERMAL_PLANT,
        }
    }

    /// Store the average heat inputs for the elapsed period.
    ///
    /// Last writer wins; must not be interleaved with
    /// [`periodic_task`](Self::periodic_task) (enforced by `&mut self`).
    pub fn set_inputs(&mut self, inputs: &[f32; NUM_INPUTS]) {
        self.ave_inputs = *inputs;
    }

    /// Advance the thermal state by one coarse period.
    ///
    /// Runs `period_counts` integrator sub-steps with the held average
    /// input, so the state gains exactly `period_counts * step_size`
    /// seconds of simulated time. If a sub-step fails the task stops
    /// immediately and the last successful state is retained.
    pub fn periodic_task(&mut self) {
        for _ in 0..self.period_counts {
            let inputs = self.ave_inputs;
            if solver::step(
                self.model,
                self.step_size,
                &mut self.state,
                &inputs,
                &inputs,
                &mut self.outputs,
            )
            .is_err()
            {
                break;
            }
        }
    }

    /// Current thermal state, relative to ambient [°C].
    pub fn state(&self) -> &[f32; NUM_STATES] {
        &self.state
    }

    /// Latest plant outputs, relative to ambient [°C].
    pub fn outputs(&self) -> &[f32; NUM_OUTPUTS] {
        &self.outputs
    }

    /// Ambient temperature [°C].
    pub fn ambient_temp(&self) -> f32 {
        self.ambient_temp
    }

    /// Update the ambient temperature from the host's sensor feed.
    pub fn set_ambient_temp(&mut self, ambient: f32) {
        self.ambient_temp = ambient;
    }
}
