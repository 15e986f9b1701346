//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future radio-link adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} | {:.1}km/h {:.0}rpm duty={:.2} | \
                     assist={}% | bat={:.1}V | pedal={}",
                    t.state,
                    t.speed_kmh,
                    t.motor_rpm,
                    t.motor_duty,
                    t.assistance_level,
                    t.battery_voltage,
                    if t.pedaling { "yes" } else { "no" },
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::CredentialRejected => {
                info!("AUTH  | credential rejected");
            }
            AppEvent::EmergencyEngaged => {
                info!("ESTOP | engaged");
            }
            AppEvent::EmergencyCleared => {
                info!("ESTOP | cleared");
            }
            AppEvent::BlindSpotChanged { left, right } => {
                info!("RADAR | left={} right={}", left, right);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
