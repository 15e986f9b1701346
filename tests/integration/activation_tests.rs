//! Integration tests for the activation pipeline:
//! credential events → FSM → actuator commands, with the emergency
//! debounce in the loop.
//!
//! These run on the host and script the service tick-by-tick through
//! mock adapters, 50 ms of simulated time per tick.

use std::sync::Arc;

use ebike_assist::app::events::AppEvent;
use ebike_assist::app::service::ControlService;
use ebike_assist::bus::StateBus;
use ebike_assist::config::SystemConfig;
use ebike_assist::events::Event;
use ebike_assist::fsm::StateId;

use crate::mock_hw::{MockDisplay, MockHardware, RecordingSink};

const TICK_US: u64 = 50_000;

struct Rig {
    svc: ControlService,
    hw: MockHardware,
    sink: RecordingSink,
    bus: Arc<StateBus>,
    now_us: u64,
}

impl Rig {
    fn new() -> Self {
        let bus = Arc::new(StateBus::new());
        let mut svc = ControlService::new(SystemConfig::default(), Arc::clone(&bus));
        let mut sink = RecordingSink::new();
        svc.start(&mut sink);
        Self {
            svc,
            hw: MockHardware::new(),
            sink,
            bus,
            now_us: 1_000_000,
        }
    }

    fn tick(&mut self) {
        self.now_us += TICK_US;
        self.svc.tick(&mut self.hw, &mut self.sink, self.now_us);
    }

    fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn authenticate(&mut self) {
        self.svc
            .handle_event(Event::CredentialAuthenticated, &mut self.sink);
    }

    /// Drive the rig into Active: arm, authenticate, tick.
    fn activate(&mut self) {
        self.tick(); // Locked → WaitingForCredential
        self.authenticate();
        self.tick();
        assert_eq!(self.svc.state(), StateId::Active);
    }
}

// ── Boot and arming ───────────────────────────────────────────

#[test]
fn boots_locked_then_arms() {
    let mut rig = Rig::new();
    assert_eq!(rig.svc.state(), StateId::Locked);

    rig.tick();
    assert_eq!(rig.svc.state(), StateId::WaitingForCredential);
    assert!(!rig.hw.relay_on());
    assert_eq!(rig.hw.last_motor_duty(), Some(0.0));
}

#[test]
fn held_emergency_at_boot_stays_locked() {
    let mut rig = Rig::new();
    rig.hw.snapshot.emergency_pressed = true;
    rig.ticks(5);
    assert_eq!(rig.svc.state(), StateId::Locked);
}

// ── Credential flow ───────────────────────────────────────────

#[test]
fn credential_activates_and_energises_relay() {
    let mut rig = Rig::new();
    rig.activate();

    assert!(rig.hw.relay_on());
    assert!(rig.sink.saw(&AppEvent::StateChanged {
        from: StateId::WaitingForCredential,
        to: StateId::Active,
    }));
}

#[test]
fn one_credential_event_activates_once() {
    let mut rig = Rig::new();
    rig.activate();

    // Emergency round trip back to WaitingForCredential: the original
    // credential event must not re-activate.
    rig.hw.snapshot.emergency_pressed = true;
    rig.ticks(2);
    assert_eq!(rig.svc.state(), StateId::EmergencyStopped);
    rig.hw.snapshot.emergency_pressed = false;
    rig.ticks(3);
    assert_eq!(rig.svc.state(), StateId::WaitingForCredential);
    rig.tick();
    assert_eq!(rig.svc.state(), StateId::WaitingForCredential);
}

#[test]
fn tag_removal_does_not_deactivate() {
    // Losing the tag mid-ride must not cut motor power; only the
    // emergency interlock leaves Active.
    let mut rig = Rig::new();
    rig.activate();

    rig.svc.handle_event(Event::TagRemoved, &mut rig.sink);
    rig.ticks(3);
    assert_eq!(rig.svc.state(), StateId::Active);
    assert!(rig.hw.relay_on());
}

#[test]
fn rejected_credential_emits_event_and_stays_put() {
    let mut rig = Rig::new();
    rig.tick();
    rig.svc
        .handle_event(Event::CredentialRejected, &mut rig.sink);
    rig.tick();
    assert_eq!(rig.svc.state(), StateId::WaitingForCredential);
    assert!(rig.sink.saw(&AppEvent::CredentialRejected));
}

// ── Emergency stop with debounce ──────────────────────────────

#[test]
fn sustained_emergency_press_stops_drive() {
    let mut rig = Rig::new();
    rig.activate();

    rig.hw.snapshot.emergency_pressed = true;
    rig.tick(); // level seen; debounce window starts
    assert_eq!(rig.svc.state(), StateId::Active, "not yet debounced");

    rig.tick(); // 50 ms held — debounce satisfied
    assert_eq!(rig.svc.state(), StateId::EmergencyStopped);
    assert!(!rig.hw.relay_on());
    assert_eq!(rig.hw.last_motor_duty(), Some(0.0));
    assert!(rig.sink.saw(&AppEvent::EmergencyEngaged));
}

#[test]
fn emergency_glitch_shorter_than_debounce_is_ignored() {
    let mut rig = Rig::new();
    rig.activate();

    rig.hw.snapshot.emergency_pressed = true;
    rig.tick();
    rig.hw.snapshot.emergency_pressed = false;
    rig.ticks(4);
    assert_eq!(rig.svc.state(), StateId::Active);
    assert!(rig.hw.relay_on());
}

#[test]
fn emergency_latch_ignores_credentials_until_release() {
    let mut rig = Rig::new();
    rig.activate();

    rig.hw.snapshot.emergency_pressed = true;
    rig.ticks(2);
    assert_eq!(rig.svc.state(), StateId::EmergencyStopped);

    // Credential while latched: no effect.
    rig.authenticate();
    rig.tick();
    assert_eq!(rig.svc.state(), StateId::EmergencyStopped);

    // Release, debounced over two ticks → re-armed via Locked.
    rig.hw.snapshot.emergency_pressed = false;
    rig.ticks(2);
    assert_eq!(rig.svc.state(), StateId::Locked);
    assert!(rig.sink.saw(&AppEvent::EmergencyCleared));

    rig.tick();
    assert_eq!(rig.svc.state(), StateId::WaitingForCredential);

    // A fresh credential works again after the latch cleared.
    rig.authenticate();
    rig.tick();
    assert_eq!(rig.svc.state(), StateId::Active);
}

// ── Blind-spot path ───────────────────────────────────────────

#[test]
fn blind_spot_lamp_follows_either_radar() {
    let mut rig = Rig::new();

    rig.hw.blind_left = true;
    rig.svc.blind_spot_tick(&mut rig.hw, &mut rig.sink);
    assert!(rig.hw.blind_light_on());
    assert!(rig.sink.saw(&AppEvent::BlindSpotChanged {
        left: true,
        right: false,
    }));

    rig.hw.blind_left = false;
    rig.svc.blind_spot_tick(&mut rig.hw, &mut rig.sink);
    assert!(!rig.hw.blind_light_on());
}

#[test]
fn blind_spot_works_while_emergency_stopped() {
    let mut rig = Rig::new();
    rig.activate();
    rig.hw.snapshot.emergency_pressed = true;
    rig.ticks(2);
    assert_eq!(rig.svc.state(), StateId::EmergencyStopped);

    rig.hw.blind_right = true;
    rig.svc.blind_spot_tick(&mut rig.hw, &mut rig.sink);
    assert!(rig.hw.blind_light_on());
    assert!(rig.bus.snapshot().blind_spot_right);
}

// ── Display path ──────────────────────────────────────────────

#[test]
fn display_frame_reflects_published_state() {
    let mut rig = Rig::new();
    rig.activate();

    rig.hw.snapshot.speed_kmh = 21.5;
    rig.hw.snapshot.battery_voltage = 36.4;
    rig.hw.snapshot.assistance_level = 60;
    rig.tick();

    let mut display = MockDisplay::new();
    rig.svc.display_tick(&mut display);

    let frame = display.frames.last().expect("one frame shown");
    assert_eq!(frame.state_name, "Active");
    assert!((frame.speed_kmh - 21.5).abs() < 1e-6);
    assert!((frame.battery_voltage - 36.4).abs() < 1e-6);
    assert_eq!(frame.assistance_level, 60);
    assert!(!frame.blind_spot_warning);
}
