//! Outbound application events.
//!
//! The [`ControlService`](super::service::ControlService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them — log to serial, feed a
//! test recorder, or later a radio link.

use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The activation FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A credential was presented and rejected.
    CredentialRejected,

    /// The debounced emergency input engaged.
    EmergencyEngaged,

    /// The debounced emergency input released and the system re-armed.
    EmergencyCleared,

    /// Either blind-spot radar changed detection state.
    BlindSpotChanged { left: bool, right: bool },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub state: StateId,
    pub speed_kmh: f32,
    pub motor_rpm: f32,
    pub motor_duty: f32,
    pub assistance_level: u8,
    pub battery_voltage: f32,
    pub pedaling: bool,
}
