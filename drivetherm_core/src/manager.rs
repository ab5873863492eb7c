//! Thermal manager façade.
//!
//! Owns the single estimator and overload predictor instances and wires
//! them together: the periodic tick advances the estimator and hands its
//! resulting state (and ambient) to the predictor as the seed for the next
//! sweep; the background tick runs the sweep. Consumers read temperatures
//! and the admit decision through the façade.

use crate::config::{ConfigError, ThermalConfig};
use crate::estimator::Estimator;
use crate::plant::{NUM_INPUTS, NUM_OUTPUTS};
use crate::predictor::{LimitViolations, OverloadPredictor};

pub use crate::sources::source_inputs;

/// Façade over the thermal estimator and overload predictor.
///
/// Construction validates the configuration; after that the periodic and
/// background tasks are allocation-free. The host must serialize
/// [`periodic_task`](Self::periodic_task) and
/// [`background_task`](Self::background_task) with respect to each other;
/// `&mut self` already guarantees this in a cooperative single-threaded
/// host, and a preemptive host wraps the manager in a single mutex.
#[derive(Debug, Clone)]
pub struct ThermalManager {
    estimator: Estimator,
    predictor: OverloadPredictor,
}

impl ThermalManager {
    /// Build the manager from a validated configuration.
    pub fn new(config: &ThermalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            estimator: Estimator::new(&config.estimator),
            predictor: OverloadPredictor::new(&config.predictor),
        })
    }

    /// Coarse-rate tick: advance the estimator one service period, then
    /// seed the predictor with the resulting state and ambient.
    pub fn periodic_task(&mut self) {
        self.estimator.periodic_task();
        self.predictor.set_initial_state(self.estimator.state());
        self.predictor
            .update_ambient_temperature(self.estimator.ambient_temp());
    }

    /// Idle-time tick: run one predictive sweep.
    pub fn background_task(&mut self) {
        self.predictor.background_task();
    }

    /// Store the average heat inputs for the elapsed period.
    pub fn set_inputs(&mut self, inputs: &[f32; NUM_INPUTS]) {
        self.estimator.set_inputs(inputs);
    }

    /// Feed a new ambient temperature from the host's sensor.
    ///
    /// Takes effect on the predictor's limits at the next periodic tick.
    pub fn set_ambient_temperature(&mut self, ambient: f32) {
        self.estimator.set_ambient_temp(ambient);
    }

    /// Latest estimated temperatures, relative to ambient [°C].
    pub fn current_temps(&self) -> [f32; NUM_OUTPUTS] {
        *self.estimator.outputs()
    }

    /// Predicted peak temperatures from the last sweep, relative to
    /// ambient [°C].
    pub fn overload_temps(&self) -> [f32; NUM_OUTPUTS] {
        *self.predictor.max_temps()
    }

    /// True iff the predicted duty cycle stays within every protective
    /// limit.
    pub fn is_overload_available(&self) -> bool {
        self.predictor.is_overload_available()
    }

    /// Outputs whose predicted peak exceeds its protective limit.
    pub fn violations(&self) -> LimitViolations {
        self.predictor.violations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RATED_INPUTS_DEFAULT;

    #[test]
    fn construction_rejects_invalid_config() {
        let mut config = ThermalConfig::default();
        config.predictor.overload_counts = 1000;
        assert!(ThermalManager::new(&config).is_err());
    }

    #[test]
    fn periodic_tick_seeds_the_predictor() {
        let mut manager = ThermalManager::new(&ThermalConfig::default()).unwrap();
        manager.set_inputs(&RATED_INPUTS_DEFAULT);

        // Heat up for a minute of service periods, then sweep.
        for _ in 0..60 {
            manager.periodic_task();
        }
        manager.background_task();
        let warm_peaks = manager.overload_temps();

        // A sweep from a cold manager must predict lower peaks.
        let mut cold = ThermalManager::new(&ThermalConfig::default()).unwrap();
        cold.background_task();
        let cold_peaks = cold.overload_temps();

        for j in 0..NUM_OUTPUTS {
            assert!(
                warm_peaks[j] > cold_peaks[j],
                "output {j}: warm {} <= cold {}",
                warm_peaks[j],
                cold_peaks[j]
            );
        }
    }

    #[test]
    fn ambient_update_propagates_on_the_next_tick() {
        let mut manager = ThermalManager::new(&ThermalConfig::default()).unwrap();
        manager.set_ambient_temperature(25.0);
        manager.periodic_task();
        manager.background_task();
        // Default profile peaks near 41.4 °C at the junction; the limit
        // dropped to 55 °C, so admission still stands.
        assert!(manager.is_overload_available());
    }

    #[test]
    fn queries_reflect_component_buffers() {
        let mut manager = ThermalManager::new(&ThermalConfig::default()).unwrap();
        manager.set_inputs(&RATED_INPUTS_DEFAULT);
        manager.periodic_task();

        let temps = manager.current_temps();
        assert!(temps[3] > 30.0, "junction = {}", temps[3]);

        manager.background_task();
        let peaks = manager.overload_temps();
        assert!(peaks[3] >= temps[3] - 1.0);
        assert!(manager.is_overload_available());
    }
}
