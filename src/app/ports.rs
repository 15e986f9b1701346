//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, display, event sinks) implement
//! these traits. The [`ControlService`](super::service::ControlService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and the whole service runs under test with mocks.

use crate::sensors::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every control-loop sensor and return a unified snapshot.
    /// `now_us` is the monotonic timestamp of this tick.
    fn read_all(&mut self, now_us: u64) -> SensorSnapshot;

    /// Sample the two blind-spot radars: `(left, right)`, true = detected.
    /// Separate from [`read_all`](Self::read_all) because the radar path
    /// runs on its own cadence.
    fn read_blind_spot(&mut self) -> (bool, bool);
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Set the motor PWM duty, normalized [0, 1]. Implementations clamp.
    fn set_motor_duty(&mut self, duty: f32);

    /// Energise or drop the motor power-stage relay.
    fn set_power_relay(&mut self, on: bool);

    /// Drive the "system active" indicator LED.
    fn set_system_led(&mut self, on: bool);

    /// Drive the shared blind-spot warning lamp.
    fn set_blind_spot_light(&mut self, on: bool);

    /// Kill everything: duty 0, relay open, lamps off — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, a
/// future radio link, test recorders).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → rider-facing display)
// ───────────────────────────────────────────────────────────────

/// Consumes rendered display frames. The domain composes *what* to show;
/// the adapter owns *how* (LCD driver, serial dump, test capture).
pub trait DisplayPort {
    fn show(&mut self, frame: &DisplayFrame);
}

/// One refresh worth of rider-facing fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayFrame {
    pub state_name: &'static str,
    pub speed_kmh: f32,
    pub battery_voltage: f32,
    pub assistance_level: u8,
    pub blind_spot_warning: bool,
}
