#![allow(dead_code)] // Error types reserved for future typed port returns

//! Unified error types for the assist-controller firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level control loop's error handling uniform. All variants are `Copy`
//! so they can be cheaply passed through the tick path without allocation.
//!
//! Propagation policy: nothing in the control tick is fatal. Stale or
//! out-of-range sensors degrade to safe defaults (zero speed, clamped
//! input); activation violations are ignored and logged. The types below
//! exist so every such local resolution has a name.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned unusable data.
    Sensor(SensorError),
    /// An actuator command failed or was out of bounds.
    Actuator(ActuatorError),
    /// An activation-gate rule was violated.
    Activation(ActivationError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Activation(e) => write!(f, "activation: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC read returned an error or timed out.
    AdcReadFailed,
    /// GPIO read returned an error.
    GpioReadFailed,
    /// Reading is outside the physically plausible range (clamped locally).
    OutOfRange,
    /// Last edge timestamp is older than the stale timeout; the derived
    /// quantity reads zero rather than repeating the cached value.
    Stale,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::Stale => write!(f, "reading stale"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
    /// Requested duty outside [0, 1] (clamped locally).
    DutyOutOfRange,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::DutyOutOfRange => write!(f, "duty out of range"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Activation-gate violations
// ---------------------------------------------------------------------------

/// Violations of the activation gate. These never propagate out of the
/// tick — the offending request is dropped — but they are logged with a
/// stable name so field reports can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationError {
    /// Credential event arrived while already `Active` or while latched
    /// in `EmergencyStopped`; ignored, no state change.
    Unauthorized,
    /// Nonzero motor output requested while the emergency interlock is
    /// latched; forced to zero.
    EmergencyLatched,
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized activation attempt"),
            Self::EmergencyLatched => write!(f, "emergency interlock latched"),
        }
    }
}

impl From<ActivationError> for Error {
    fn from(e: ActivationError) -> Self {
        Self::Activation(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
