//! Motor PWM driver.
//!
//! Translates the normalized [0, 1] duty the control loop computes into
//! LEDC counts at the configured resolution and pushes it to the channel.
//! The external BLDC controller interprets the PWM level as its speed
//! command; the power relay (handled elsewhere) gates whether it can act
//! on it at all.

use log::debug;

use crate::drivers::hw_init;
use crate::pins;

/// Convert normalized duty to LEDC counts, clamping out-of-range input.
pub fn duty_to_counts(duty: f32) -> u32 {
    (duty.clamp(0.0, 1.0) * pins::PWM_MAX_DUTY as f32) as u32
}

pub struct MotorDriver {
    current_counts: u32,
}

impl MotorDriver {
    pub fn new() -> Self {
        Self { current_counts: 0 }
    }

    /// Apply a normalized duty. Writes the LEDC register only when the
    /// count actually changes.
    pub fn set_duty(&mut self, duty: f32) {
        let counts = duty_to_counts(duty);
        if counts != self.current_counts {
            debug!("motor: duty {} -> {} counts", duty, counts);
            hw_init::ledc_set(hw_init::LEDC_CH_MOTOR, counts);
            self.current_counts = counts;
        }
    }

    /// Hard zero, unconditionally written.
    pub fn stop(&mut self) {
        hw_init::ledc_set(hw_init::LEDC_CH_MOTOR, 0);
        self.current_counts = 0;
    }

    /// Last commanded counts (for telemetry and tests).
    pub fn current_counts(&self) -> u32 {
        self.current_counts
    }
}

impl Default for MotorDriver {
    fn default() -> Self {
        Self::new()
    }
}
