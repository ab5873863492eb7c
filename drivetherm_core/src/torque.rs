//! Stepper motor torque manager.
//!
//! Selects a torque setpoint from an enumerated table, applies a saturating
//! upper limit (tightened by the overload admit decision), adds a
//! feedforward contribution, and pushes the result to the drive hardware
//! only when it actually changed.

/// Capability for applying a torque setpoint to the drive hardware.
///
/// Supplied at construction; the manager never talks to hardware directly.
pub trait TorqueOutput {
    fn set_torque(&mut self, value: u8);
}

/// Enumerated slots of the setpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SetpointSlot {
    Off = 0,
    Idle = 1,
    AccelPlus = 2,
    AccelMinus = 3,
    Cruise = 4,
    DecelPlus = 5,
    DecelMinus = 6,
    Full = 7,
}

/// Number of slots in the setpoint table.
pub const SETPOINT_COUNT: usize = 8;

/// Torque setpoint manager.
#[derive(Debug, Clone)]
pub struct TorqueManager<T: TorqueOutput> {
    setpoint_limit: u8,
    active_slot: SetpointSlot,
    active_setpoint: u8,
    last_setpoint: u8,
    active_feedforward: u8,
    last_feedforward: u8,
    setpoints: [u8; SETPOINT_COUNT],
    output: T,
}

fn apply_limit(value: u8, limit: u8) -> u8 {
    value.min(limit)
}

impl<T: TorqueOutput> TorqueManager<T> {
    /// Build a manager over a setpoint table and an output capability.
    pub fn new(setpoints: [u8; SETPOINT_COUNT], setpoint_limit: u8, output: T) -> Self {
        Self {
            setpoint_limit,
            active_slot: SetpointSlot::Off,
            active_setpoint: 0,
            last_setpoint: 0,
            active_feedforward: 0,
            last_feedforward: 0,
            setpoints,
            output,
        }
    }

    /// Activate the setpoint stored in `slot`, limited.
    ///
    /// Returns the resulting active setpoint.
    pub fn select_setpoint(&mut self, slot: SetpointSlot) -> u8 {
        self.active_setpoint = apply_limit(self.setpoints[slot as usize], self.setpoint_limit);
        self.active_slot = slot;
        self.active_setpoint
    }

    /// Tighten or relax the upper setpoint limit.
    ///
    /// Re-limits the active setpoint immediately and returns it.
    pub fn set_setpoint_limit(&mut self, limit: u8) -> u8 {
        self.setpoint_limit = limit;
        self.active_setpoint = apply_limit(self.active_setpoint, self.setpoint_limit);
        self.active_setpoint
    }

    /// Set the feedforward contribution added on top of the setpoint.
    pub fn set_feedforward(&mut self, feedforward: u8) -> u8 {
        self.active_feedforward = feedforward;
        self.active_feedforward
    }

    /// Currently active slot.
    pub fn active_slot(&self) -> SetpointSlot {
        self.active_slot
    }

    /// Push the limited setpoint plus feedforward to the hardware.
    ///
    /// Emits only when the setpoint or feedforward changed since the last
    /// push; the sum saturates before the limit is applied.
    pub fn foreground_task(&mut self) {
        let change_needed = self.last_setpoint != self.active_setpoint
            || self.last_feedforward != self.active_feedforward;

        if change_needed {
            let commanded = apply_limit(
                self.active_setpoint.saturating_add(self.active_feedforward),
                self.setpoint_limit,
            );
            self.output.set_torque(commanded);
            self.last_setpoint = self.active_setpoint;
            self.last_feedforward = self.active_feedforward;
        }
    }
}
