//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers. Sensor readings are
//! plain fields the test scripts set between ticks.

use ebike_assist::app::events::AppEvent;
use ebike_assist::app::ports::{ActuatorPort, DisplayFrame, DisplayPort, EventSink, SensorPort};
use ebike_assist::sensors::SensorSnapshot;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    MotorDuty(f32),
    PowerRelay(bool),
    SystemLed(bool),
    BlindSpotLight(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Snapshot returned by the next `read_all`.
    pub snapshot: SensorSnapshot,
    /// Radar levels returned by the next `read_blind_spot`.
    pub blind_left: bool,
    pub blind_right: bool,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            snapshot: SensorSnapshot::default(),
            blind_left: false,
            blind_right: false,
            calls: Vec::new(),
        }
    }

    pub fn last_motor_duty(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::MotorDuty(d) => Some(*d),
            ActuatorCall::AllOff => Some(0.0),
            _ => None,
        })
    }

    pub fn relay_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::PowerRelay(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn blind_light_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::BlindSpotLight(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self, _now_us: u64) -> SensorSnapshot {
        self.snapshot
    }

    fn read_blind_spot(&mut self) -> (bool, bool) {
        (self.blind_left, self.blind_right)
    }
}

impl ActuatorPort for MockHardware {
    fn set_motor_duty(&mut self, duty: f32) {
        self.calls.push(ActuatorCall::MotorDuty(duty));
    }

    fn set_power_relay(&mut self, on: bool) {
        self.calls.push(ActuatorCall::PowerRelay(on));
    }

    fn set_system_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SystemLed(on));
    }

    fn set_blind_spot_light(&mut self, on: bool) {
        self.calls.push(ActuatorCall::BlindSpotLight(on));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn saw(&self, wanted: &AppEvent) -> bool {
        self.events.iter().any(|e| e == wanted)
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Recording display ─────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<DisplayFrame>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayPort for MockDisplay {
    fn show(&mut self, frame: &DisplayFrame) {
        self.frames.push(*frame);
    }
}
