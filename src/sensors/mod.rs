//! Sensor subsystem.
//!
//! Each sensor splits into an ISR/raw half (atomics or ADC counts, owned
//! by the hardware adapter) and a pure derivation half that lives here and
//! runs on the host. [`SensorSnapshot`] is the one struct the control tick
//! consumes; everything downstream of the sensors sees only snapshots.

pub mod battery;
pub mod hall;
pub mod pedal;
pub mod throttle;

use crate::config::SystemConfig;
use crate::drivers::hw_init;
use crate::pins;

/// Everything the control tick knows about the outside world, captured
/// once at the top of the tick. Copy so it can be handed to the state
/// machine, the arbiter, and the state bus without borrow gymnastics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    /// Motor shaft speed (rpm), 0 when stopped or stale.
    pub motor_rpm: f32,
    /// Road speed (km/h).
    pub speed_kmh: f32,
    /// Rider turned the cranks within the cadence window.
    pub pedaling: bool,
    /// Accelerator, normalized [0, 1]. Deadband not yet applied.
    pub accelerator: f32,
    /// Assistance-level pot, whole percent 0 – 100.
    pub assistance_level: u8,
    /// Battery pack voltage (volts).
    pub battery_voltage: f32,
    /// Raw (undebounced) emergency-input level; true = pressed.
    pub emergency_pressed: bool,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            motor_rpm: 0.0,
            speed_kmh: 0.0,
            pedaling: false,
            accelerator: 0.0,
            assistance_level: 0,
            battery_voltage: 0.0,
            emergency_pressed: false,
        }
    }
}

/// Hardware-facing aggregator: samples the ISR channels and the ADC
/// inputs into one [`SensorSnapshot`] per control tick. On non-espidf
/// targets the underlying reads come from simulation stubs.
pub struct SensorHub {
    speed: hall::SpeedEstimator,
    pedal: pedal::PedalMonitor,
    divider_ratio: f32,
}

impl SensorHub {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            speed: hall::SpeedEstimator::new(
                config.pulses_per_rev,
                config.wheel_circumference_m,
                config.hall_stale_timeout_ms,
            ),
            pedal: pedal::PedalMonitor::new(config.pedal_timeout_ms),
            divider_ratio: config.battery_divider_ratio,
        }
    }

    pub fn read_all(&mut self, now_us: u64) -> SensorSnapshot {
        let speed = self.speed.sample(&hall::HALL_CHANNEL, now_us);
        SensorSnapshot {
            motor_rpm: speed.motor_rpm,
            speed_kmh: speed.speed_kmh,
            pedaling: self.pedal.is_pedaling(&pedal::PEDAL_CHANNEL, now_us),
            accelerator: throttle::normalize_accel(hw_init::adc1_read(pins::ADC1_CH_ACCEL)),
            assistance_level: throttle::assistance_percent(hw_init::adc1_read(pins::ADC1_CH_ASSIST)),
            battery_voltage: battery::pack_voltage(
                hw_init::adc1_read(pins::ADC1_CH_BATTERY),
                self.divider_ratio,
            ),
            // Active low with pull-up.
            emergency_pressed: !hw_init::gpio_read(pins::EMERGENCY_BUTTON_GPIO),
        }
    }
}
