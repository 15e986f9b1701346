//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the motor driver, exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. This is the only module besides
//! the drivers that touches actual hardware. On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::hw_init;
use crate::drivers::motor::MotorDriver;
use crate::pins;
use crate::sensors::{SensorHub, SensorSnapshot};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    motor: MotorDriver,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, motor: MotorDriver) -> Self {
        Self { sensor_hub, motor }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self, now_us: u64) -> SensorSnapshot {
        self.sensor_hub.read_all(now_us)
    }

    fn read_blind_spot(&mut self) -> (bool, bool) {
        // RCWL-0516 drives its output HIGH on detection.
        (
            hw_init::gpio_read(pins::BLIND_LEFT_GPIO),
            hw_init::gpio_read(pins::BLIND_RIGHT_GPIO),
        )
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_motor_duty(&mut self, duty: f32) {
        self.motor.set_duty(duty);
    }

    fn set_power_relay(&mut self, on: bool) {
        hw_init::gpio_write(pins::POWER_RELAY_GPIO, on);
    }

    fn set_system_led(&mut self, on: bool) {
        hw_init::gpio_write(pins::SYSTEM_LED_GPIO, on);
    }

    fn set_blind_spot_light(&mut self, on: bool) {
        hw_init::gpio_write(pins::BLIND_SPOT_LIGHT_GPIO, on);
    }

    fn all_off(&mut self) {
        self.motor.stop();
        hw_init::gpio_write(pins::POWER_RELAY_GPIO, false);
        hw_init::gpio_write(pins::SYSTEM_LED_GPIO, false);
        hw_init::gpio_write(pins::BLIND_SPOT_LIGHT_GPIO, false);
    }
}
