//! Heat-source power model.
//!
//! Converts the drive operating point (phase current, shaft speed) into the
//! three loss powers that force the thermal plant: motor iron/windage loss,
//! copper loss, and driver power-stage loss.

use crate::plant::NUM_INPUTS;

/// Phase winding resistance [Ω].
const R_PHASE: f32 = 1.0;
/// MOSFET on-resistance [Ω].
const RDS_ON: f32 = 1.325e-2;
/// DC bus voltage [V].
const V_BUS: f32 = 48.0;
/// PWM switching frequency [Hz].
const F_SW: f32 = 1.4e5;
/// MOSFET turn-on rise time [s].
const T_RISE: f32 = 15.0e-9;
/// MOSFET turn-off fall time [s].
const T_FALL: f32 = 19.0e-9;
/// Current-sense shunt resistance [Ω].
const R_SENSE: f32 = 2.0e-2;
/// Residual driver losses (gate drive, quiescent supplies) [W].
const P_MISC: f32 = 0.27;
/// Iron/windage loss coefficient.
const K_IRON: f32 = 0.0303;
/// Iron/windage loss speed exponent.
const IRON_EXP: f32 = 1.44;

/// Compute the heat-source input vector for the thermal plant.
///
/// `drive_current` is the commanded phase current amplitude [A];
/// `speed` is the rotational speed [rad/s], non-negative.
///
/// Returns `[iron/windage loss, copper loss, driver loss]` in watts.
pub fn source_inputs(drive_current: f32, speed: f32) -> [f32; NUM_INPUTS] {
    let i_rms = drive_current / core::f32::consts::SQRT_2;
    let i_rms_sq = drive_current * drive_current * 0.5;

    let iron = K_IRON * speed.powf(IRON_EXP);

    // Two phases conduct simultaneously.
    let copper = 2.0 * R_PHASE * i_rms_sq;

    // Conduction (four FETs), switching, sense shunts, residual.
    let driver = 4.0 * RDS_ON * i_rms_sq
        + 4.0 * V_BUS * F_SW * (T_RISE + T_FALL) * i_rms
        + 2.0 * R_SENSE * i_rms_sq
        + P_MISC;

    [iron, copper, driver]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_operating_point() {
        // 4 A at 36.652 rad/s (350 rpm).
        let u = source_inputs(4.0, 36.652);
        assert!((u[0] - 5.4168).abs() < 5e-3, "iron = {}", u[0]);
        assert!((u[1] - 16.0).abs() < 1e-5, "copper = {}", u[1]);
        assert!((u[2] - 3.599).abs() < 5e-3, "driver = {}", u[2]);
    }

    #[test]
    fn standstill_draws_only_residual_driver_loss() {
        let u = source_inputs(0.0, 0.0);
        assert_eq!(u[0], 0.0);
        assert_eq!(u[1], 0.0);
        assert!((u[2] - P_MISC).abs() < 1e-7);
    }

    #[test]
    fn copper_loss_scales_with_current_squared() {
        let low = source_inputs(2.0, 10.0);
        let high = source_inputs(4.0, 10.0);
        assert!((high[1] / low[1] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn iron_loss_grows_with_speed() {
        let slow = source_inputs(4.0, 10.0);
        let fast = source_inputs(4.0, 20.0);
        assert!(fast[0] > slow[0]);
        // Exponent 1.44: doubling speed multiplies the loss by 2^1.44.
        assert!((fast[0] / slow[0] - 2.0f32.powf(1.44)).abs() < 1e-4);
    }
}
