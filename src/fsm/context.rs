//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: latest sensor snapshot, the credential/emergency inputs for
//! this tick, actuator command outputs, timing, and configuration. Think
//! of it as the "blackboard" in a blackboard architecture.

use crate::config::SystemConfig;
use crate::safety::EmergencyEdge;
use crate::sensors::SensorSnapshot;

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; consumed by main loop)
// ---------------------------------------------------------------------------

/// Commands that state handlers write to request actuator actions.
/// The main loop applies these to the actual drivers each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommands {
    /// Motor power-stage relay energised.
    pub power_relay: bool,
    /// "System active" indicator LED.
    pub system_led: bool,
    /// Drive gate: only while true may the motor receive nonzero duty.
    pub drive_enabled: bool,
}

impl Default for ActuatorCommands {
    fn default() -> Self {
        Self::all_off()
    }
}

impl ActuatorCommands {
    /// Everything de-energised — safe default.
    pub const fn all_off() -> Self {
        Self {
            power_relay: false,
            system_led: false,
            drive_enabled: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Duration of one tick in seconds (inverse of control loop frequency).
    pub tick_period_secs: f32,

    // -- Sensor data --
    /// Latest readings. Updated before each FSM tick.
    pub sensors: SensorSnapshot,

    // -- Per-tick inputs (set before the tick, cleared after) --
    /// An authorized credential was presented since the last tick.
    pub credential_authenticated: bool,
    /// Debounced emergency transition this tick, if any.
    pub emergency_edge: Option<EmergencyEdge>,
    /// Debounced emergency level.
    pub emergency_pressed: bool,

    // -- Actuator outputs --
    /// Commands applied to the actuators after the FSM tick.
    pub commands: ActuatorCommands,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            tick_period_secs: config.control_loop_interval_ms as f32 / 1000.0,
            sensors: SensorSnapshot::default(),
            credential_authenticated: false,
            emergency_edge: None,
            emergency_pressed: false,
            commands: ActuatorCommands::all_off(),
            config,
        }
    }

    /// Clear the one-shot inputs. The service calls this after each tick so
    /// a single credential event cannot activate twice.
    pub fn clear_tick_inputs(&mut self) {
        self.credential_authenticated = false;
        self.emergency_edge = None;
    }
}
