//! Thermal plant of the stepper-servo drive.
//!
//! Lumped three-node model identified for the motor/driver assembly:
//! state 0 is the motor winding, state 1 the motor housing, state 2 the
//! driver board, all in kelvin above ambient. The heat inputs are the
//! three loss powers from [`crate::sources`]. The first three outputs read
//! the node temperatures directly; the fourth adds the driver junction
//! rise of 7.475 K/W above the board node, driven by the driver loss.

use crate::solver::StateSpace;

/// Thermal node count.
pub const NUM_STATES: usize = 3;
/// Heat-source input count.
pub const NUM_INPUTS: usize = 3;
/// Temperature output count.
pub const NUM_OUTPUTS: usize = 4;

/// The drive's thermal plant. Process-wide, immutable; every consumer
/// holds a reference to this single instance.
pub static THERMAL_PLANT: StateSpace<NUM_STATES, NUM_INPUTS, NUM_OUTPUTS> = StateSpace {
    a: [
        [-1.5603e-2, 1.4710e-2, 3.3201e-4],
        [0.0, -8.9398e-4, 3.3201e-4],
        [0.0, 1.0531e-3, -2.6055e-3],
    ],
    b: [
        [3.2095e-2, 9.4706e-3, 0.0],
        [1.6690e-3, 1.6690e-3, 0.0],
        [0.0, 0.0, 5.2938e-3],
    ],
    c: [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
    ],
    d: [
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 7.475],
    ],
};
