//! System configuration parameters
//!
//! All tunable parameters for the assist controller. Values can be
//! overridden at startup from a JSON document so PID gains and thresholds
//! are adjustable without reflashing.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- PID assist loop ---
    /// Proportional gain.
    pub pid_kp: f32,
    /// Integral gain.
    pub pid_ki: f32,
    /// Derivative gain.
    pub pid_kd: f32,
    /// Anti-windup clamp on the integral term (in rpm·s).
    pub pid_integral_limit: f32,
    /// Motor speed at 100% assistance (rpm). Also normalizes PID output.
    pub max_motor_rpm: f32,

    // --- Input arbitration ---
    /// Normalized accelerator reading below which the throttle is ignored.
    pub accel_deadband: f32,
    /// A pedal edge within this window counts as "pedaling now".
    pub pedal_timeout_ms: u32,

    // --- Speed estimation ---
    /// Hall pulses per motor revolution.
    pub pulses_per_rev: u32,
    /// Wheel circumference in metres.
    pub wheel_circumference_m: f32,
    /// No hall edge for this long → speed reads zero.
    pub hall_stale_timeout_ms: u32,

    // --- Battery ---
    /// (R1+R2)/R2 for the battery sense voltage divider.
    pub battery_divider_ratio: f32,

    // --- Safety ---
    /// Emergency input must hold a level this long to be believed.
    pub emergency_debounce_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Blind-spot radar sampling interval (milliseconds).
    pub blind_spot_interval_ms: u32,
    /// Display refresh interval (milliseconds).
    pub display_interval_ms: u32,
    /// Seconds between telemetry log lines.
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // PID — conservative gains for a mid-drive hub motor
            pid_kp: 1.0,
            pid_ki: 0.1,
            pid_kd: 0.05,
            pid_integral_limit: 500.0,
            max_motor_rpm: 1000.0,

            // Arbitration
            accel_deadband: 0.1,
            pedal_timeout_ms: 500,

            // Speed estimation
            pulses_per_rev: 6,
            wheel_circumference_m: 2.1,
            hall_stale_timeout_ms: 1000,

            // Battery — 13:1 keeps a fully charged 42 V pack inside the
            // 3.3 V ADC range.
            battery_divider_ratio: 13.0,

            // Safety
            emergency_debounce_ms: 50,

            // Timing
            control_loop_interval_ms: 50, // 20 Hz
            blind_spot_interval_ms: 100,  // 10 Hz
            display_interval_ms: 250,     // 4 Hz
            telemetry_interval_secs: 5,
        }
    }
}

impl SystemConfig {
    /// Parse a configuration from a JSON document, e.g. one loaded from a
    /// provisioning channel or a host-side tuning file.
    pub fn from_json(json: &str) -> Result<Self, crate::error::Error> {
        serde_json::from_str(json).map_err(|_| crate::error::Error::Config("invalid config JSON"))
    }

    /// Reject configurations that would make the controller unsafe.
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.max_motor_rpm <= 0.0 {
            return Err(crate::error::Error::Config("max_motor_rpm must be positive"));
        }
        if !(0.0..1.0).contains(&self.accel_deadband) {
            return Err(crate::error::Error::Config("accel_deadband must be in [0,1)"));
        }
        if self.pulses_per_rev == 0 {
            return Err(crate::error::Error::Config("pulses_per_rev must be nonzero"));
        }
        if self.wheel_circumference_m <= 0.0 {
            return Err(crate::error::Error::Config("wheel circumference must be positive"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(crate::error::Error::Config("control loop interval must be nonzero"));
        }
        if self.emergency_debounce_ms == 0 {
            return Err(crate::error::Error::Config("emergency debounce must be nonzero"));
        }
        Ok(())
    }
}
