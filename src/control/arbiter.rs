//! Drive-input arbitration.
//!
//! Three sources can ask for motor torque, with strict priority:
//!
//! 1. **Direct** — accelerator above the deadband maps straight to duty.
//! 2. **Assisted** — rider is pedaling; the assistance pot sets a target
//!    rpm for the PID loop.
//! 3. **Zero** — neither input active; the motor coasts.
//!
//! Direct wins outright: while the accelerator is engaged, pedaling is
//! irrelevant. The arbiter only *selects*; duty computation happens in
//! [`super::AssistController`].

use crate::sensors::SensorSnapshot;

/// What the rider is asking for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveRequest {
    /// Accelerator engaged; carries the raw normalized reading as duty.
    Direct(f32),
    /// Pedaling; carries the PID target in rpm.
    Assisted { target_rpm: f32 },
    /// No input; motor off.
    Zero,
}

pub struct Arbiter {
    accel_deadband: f32,
    max_motor_rpm: f32,
}

impl Arbiter {
    pub fn new(accel_deadband: f32, max_motor_rpm: f32) -> Self {
        Self {
            accel_deadband,
            max_motor_rpm,
        }
    }

    pub fn select(&self, snap: &SensorSnapshot) -> DriveRequest {
        if snap.accelerator > self.accel_deadband {
            // The deadband only gates engagement; an engaged throttle maps
            // its raw reading straight to duty.
            return DriveRequest::Direct(snap.accelerator.clamp(0.0, 1.0));
        }
        if snap.pedaling {
            let target_rpm = f32::from(snap.assistance_level) / 100.0 * self.max_motor_rpm;
            return DriveRequest::Assisted { target_rpm };
        }
        DriveRequest::Zero
    }
}
