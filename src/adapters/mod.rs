//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to            |
//! |------------|--------------|------------------------|
//! | `hardware` | SensorPort   | ESP32 ADC, GPIO, ISRs  |
//! |            | ActuatorPort | ESP32 PWM, GPIO        |
//! | `display`  | DisplayPort  | Handlebar display      |
//! | `log_sink` | EventSink    | Serial log output      |
//! | `time`     | —            | ESP32 system timer     |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
