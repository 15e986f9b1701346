//! Motor-assist control: input arbitration plus the PID speed loop.

pub mod arbiter;
pub mod pid;

pub use arbiter::{Arbiter, DriveRequest};
pub use pid::Pid;

use crate::config::SystemConfig;
use crate::sensors::SensorSnapshot;

/// Per-tick duty computation. Owns the arbiter and the PID so the
/// integral-reset rule lives in one place: entering direct throttle wipes
/// the PID history, otherwise releasing the throttle back into assist
/// would replay windup accumulated while the loop was bypassed.
pub struct AssistController {
    arbiter: Arbiter,
    pid: Pid,
    last_was_direct: bool,
}

impl AssistController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            arbiter: Arbiter::new(config.accel_deadband, config.max_motor_rpm),
            pid: Pid::new(
                config.pid_kp,
                config.pid_ki,
                config.pid_kd,
                config.pid_integral_limit,
                config.max_motor_rpm,
            ),
            last_was_direct: false,
        }
    }

    /// Compute the requested duty in [0, 1] for this tick.
    pub fn compute(&mut self, snap: &SensorSnapshot, dt_s: f32) -> f32 {
        let request = self.arbiter.select(snap);
        let is_direct = matches!(request, DriveRequest::Direct(_));
        if is_direct && !self.last_was_direct {
            self.pid.reset();
        }
        self.last_was_direct = is_direct;

        match request {
            DriveRequest::Direct(duty) => duty,
            DriveRequest::Assisted { target_rpm } => {
                self.pid.update(target_rpm, snap.motor_rpm, dt_s)
            }
            DriveRequest::Zero => {
                self.pid.reset();
                0.0
            }
        }
    }

    /// Wipe loop history, e.g. when the drive leaves the enabled state.
    pub fn reset(&mut self) {
        self.pid.reset();
        self.last_was_direct = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> AssistController {
        AssistController::new(&SystemConfig::default())
    }

    fn pedaling_snap(level: u8) -> SensorSnapshot {
        SensorSnapshot {
            pedaling: true,
            assistance_level: level,
            ..SensorSnapshot::default()
        }
    }

    #[test]
    fn idle_computes_zero_duty() {
        let mut c = controller();
        assert_eq!(c.compute(&SensorSnapshot::default(), 0.05), 0.0);
    }

    #[test]
    fn direct_duty_passes_through() {
        let mut c = controller();
        let snap = SensorSnapshot {
            accelerator: 1.0,
            ..SensorSnapshot::default()
        };
        assert_eq!(c.compute(&snap, 0.05), 1.0);
    }

    #[test]
    fn assisted_duty_rises_toward_target() {
        let mut c = controller();
        let snap = pedaling_snap(50); // target 500 rpm, measured 0
        let duty = c.compute(&snap, 0.05);
        assert!(duty > 0.0, "positive error must drive positive duty");
    }

    #[test]
    fn entering_direct_resets_the_integral() {
        let mut c = controller();
        let assist = pedaling_snap(100);

        // Wind up some integral under assist.
        for _ in 0..40 {
            c.compute(&assist, 0.05);
        }

        // Throttle blip, then release back to assist.
        let direct = SensorSnapshot {
            accelerator: 0.9,
            ..SensorSnapshot::default()
        };
        c.compute(&direct, 0.05);

        // At the target with zero error, a wound-up integral would still
        // push duty; after the reset only one fresh step has accumulated.
        let at_target = SensorSnapshot {
            pedaling: true,
            assistance_level: 100,
            motor_rpm: 1000.0,
            ..SensorSnapshot::default()
        };
        let duty = c.compute(&at_target, 0.05);
        assert!(duty < 0.01, "duty = {duty}");
    }

    #[test]
    fn coasting_clears_loop_state() {
        let mut c = controller();
        for _ in 0..40 {
            c.compute(&pedaling_snap(100), 0.05);
        }
        c.compute(&SensorSnapshot::default(), 0.05); // Zero request
        let duty = c.compute(
            &SensorSnapshot {
                pedaling: true,
                assistance_level: 100,
                motor_rpm: 1000.0,
                ..SensorSnapshot::default()
            },
            0.05,
        );
        assert!(duty < 0.01, "duty = {duty}");
    }
}
