//! PID speed loop for assisted drive.
//!
//! Closes the loop between the assistance target (rpm) and the measured
//! motor speed. Output is a normalized duty in [0, 1]; the error terms are
//! in rpm and the result is scaled by the configured full-speed rpm so the
//! gains stay dimensionally honest.

/// Discrete PID with integral anti-windup.
pub struct Pid {
    kp: f32,
    ki: f32,
    kd: f32,
    /// Clamp on the accumulated integral (rpm·s).
    integral_limit: f32,
    /// rpm that corresponds to duty 1.0.
    output_scale_rpm: f32,

    integral: f32,
    prev_error: f32,
    primed: bool,
}

impl Pid {
    pub fn new(kp: f32, ki: f32, kd: f32, integral_limit: f32, output_scale_rpm: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral_limit: integral_limit.abs(),
            output_scale_rpm,
            integral: 0.0,
            prev_error: 0.0,
            primed: false,
        }
    }

    /// One control step. `dt_s` is the elapsed time since the previous
    /// step; non-positive dt skips the I and D terms rather than dividing
    /// by zero.
    pub fn update(&mut self, target_rpm: f32, measured_rpm: f32, dt_s: f32) -> f32 {
        let error = target_rpm - measured_rpm;

        let mut derivative = 0.0;
        if dt_s > 0.0 {
            self.integral =
                (self.integral + error * dt_s).clamp(-self.integral_limit, self.integral_limit);
            if self.primed {
                derivative = (error - self.prev_error) / dt_s;
            }
        }
        self.prev_error = error;
        self.primed = true;

        let raw = self.kp * error + self.ki * self.integral + self.kd * derivative;
        (raw / self.output_scale_rpm).clamp(0.0, 1.0)
    }

    /// Clear accumulated state. Called when the loop is bypassed (direct
    /// throttle) or the drive is disabled, so stale integral never kicks
    /// the motor on re-entry.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
        self.primed = false;
    }
}
