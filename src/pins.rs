//! GPIO / peripheral pin assignments for the e-bike controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Motor drive (external BLDC controller, VSP analog/PWM input)
// ---------------------------------------------------------------------------

/// LEDC PWM output feeding the motor controller's speed input.
pub const MOTOR_PWM_GPIO: i32 = 17;
/// Relay that energises the motor power stage (active HIGH).
pub const POWER_RELAY_GPIO: i32 = 21;
/// "System active" indicator LED.
pub const SYSTEM_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Rotation / cadence sensing — interrupt inputs
// ---------------------------------------------------------------------------

/// Hall-effect sensor on the motor; one rising edge per pole pass.
pub const HALL_SENSOR_GPIO: i32 = 36;
/// Pedal cadence sensor; one rising edge per crank magnet pass.
pub const PEDAL_SENSOR_GPIO: i32 = 39;

// ---------------------------------------------------------------------------
// Rider inputs — analog (ADC1)
// ---------------------------------------------------------------------------

/// Accelerator (thumb throttle) wiper.
pub const ACCEL_ADC_GPIO: i32 = 34;
/// Assistance-level potentiometer wiper.
pub const ASSIST_POT_ADC_GPIO: i32 = 35;
/// Battery pack voltage via resistive divider.
pub const BATTERY_ADC_GPIO: i32 = 32;

/// ADC1 channel numbers for the three analog inputs above (ESP32 mapping).
pub const ADC1_CH_ACCEL: u32 = 6;
pub const ADC1_CH_ASSIST: u32 = 7;
pub const ADC1_CH_BATTERY: u32 = 4;

// ---------------------------------------------------------------------------
// Safety inputs / outputs
// ---------------------------------------------------------------------------

/// Emergency stop button — active LOW with pull-up.
pub const EMERGENCY_BUTTON_GPIO: i32 = 27;

/// RCWL-0516 microwave radar, left blind spot. HIGH = object detected.
pub const BLIND_LEFT_GPIO: i32 = 26;
/// RCWL-0516 microwave radar, right blind spot.
pub const BLIND_RIGHT_GPIO: i32 = 33;
/// Blind-spot warning light (both sides share one lamp).
pub const BLIND_SPOT_LIGHT_GPIO: i32 = 25;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 10-bit gives 0 – 1023 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 10;
/// Maximum LEDC duty value at the configured resolution.
pub const PWM_MAX_DUTY: u32 = (1 << PWM_RESOLUTION_BITS) - 1;
/// LEDC base frequency for the motor drive (25 kHz — inaudible, BLDC-typical).
pub const MOTOR_PWM_FREQ_HZ: u32 = 25_000;
