//! Integration tests for drive arbitration and the assist loop as seen
//! through the full service: sensor snapshot in, motor duty out.

use std::sync::Arc;

use ebike_assist::app::service::ControlService;
use ebike_assist::bus::StateBus;
use ebike_assist::config::SystemConfig;
use ebike_assist::events::Event;
use ebike_assist::fsm::StateId;

use crate::mock_hw::{MockHardware, RecordingSink};

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

    fn activate(&mut self) {
        self.tick();
        self.svc
            .handle_event(Event::CredentialAuthenticated, &mut self.sink);
        self.tick();
        assert_eq!(self.svc.state(), StateId::Active);
    }

    fn duty(&self) -> f32 {
        self.hw.last_motor_duty().expect("duty applied every tick")
    }
}

// ── Fail-safe: no torque outside Active ───────────────────────

#[test]
fn full_throttle_while_locked_produces_zero_duty() {
    let mut rig = Rig::new();
    rig.hw.snapshot.accelerator = 1.0;
    rig.hw.snapshot.emergency_pressed = true; // hold in Locked
    for _ in 0..10 {
        rig.tick();
        assert_eq!(rig.duty(), 0.0);
    }
    assert_eq!(rig.svc.state(), StateId::Locked);
}

#[test]
fn throttle_while_waiting_produces_zero_duty() {
    let mut rig = Rig::new();
    rig.tick(); // → WaitingForCredential
    rig.hw.snapshot.accelerator = 0.9;
    rig.hw.snapshot.pedaling = true;
    rig.hw.snapshot.assistance_level = 100;
    for _ in 0..5 {
        rig.tick();
        assert_eq!(rig.duty(), 0.0);
    }
}

#[test]
fn throttle_while_emergency_stopped_produces_zero_duty() {
    let mut rig = Rig::new();
    rig.activate();
    rig.hw.snapshot.emergency_pressed = true;
    rig.tick();
    rig.tick();
    assert_eq!(rig.svc.state(), StateId::EmergencyStopped);

    rig.hw.snapshot.accelerator = 1.0;
    rig.tick();
    assert_eq!(rig.duty(), 0.0);
}

// ── Direct throttle ───────────────────────────────────────────

#[test]
fn direct_throttle_passes_raw_reading_through() {
    let mut rig = Rig::new();
    rig.activate();

    // Half throttle with pedaling and a high assist level: the raw
    // accelerator value is the duty, PID untouched.
    rig.hw.snapshot.accelerator = 0.5;
    rig.hw.snapshot.pedaling = true;
    rig.hw.snapshot.assistance_level = 80;
    rig.tick();
    assert!((rig.duty() - 0.5).abs() < 1e-6, "duty = {}", rig.duty());

    rig.hw.snapshot.accelerator = 1.0;
    rig.tick();
    assert_eq!(rig.duty(), 1.0);
}

#[test]
fn throttle_inside_deadband_is_ignored() {
    let mut rig = Rig::new();
    rig.activate();
    rig.hw.snapshot.accelerator = 0.05;
    rig.tick();
    assert_eq!(rig.duty(), 0.0);
}

#[test]
fn direct_throttle_overrides_pedal_assist() {
    let mut rig = Rig::new();
    rig.activate();
    rig.hw.snapshot.pedaling = true;
    rig.hw.snapshot.assistance_level = 40;
    rig.hw.snapshot.accelerator = 1.0;
    rig.tick();
    assert_eq!(rig.duty(), 1.0, "direct wins outright");
}

// ── Pedal assist ──────────────────────────────────────────────

#[test]
fn pedaling_below_target_ramps_duty_up() {
    let mut rig = Rig::new();
    rig.activate();

    rig.hw.snapshot.pedaling = true;
    rig.hw.snapshot.assistance_level = 50; // target 500 rpm
    rig.hw.snapshot.motor_rpm = 0.0;
    rig.tick();
    let first = rig.duty();
    assert!(first > 0.0);

    for _ in 0..5 {
        rig.tick();
    }
    assert!(rig.duty() >= first, "integral should not shrink the output");
}

#[test]
fn assist_at_target_speed_needs_little_duty() {
    let mut rig = Rig::new();
    rig.activate();

    rig.hw.snapshot.pedaling = true;
    rig.hw.snapshot.assistance_level = 50;
    rig.hw.snapshot.motor_rpm = 500.0; // already at target
    rig.tick();
    assert!(rig.duty() < 0.05, "duty = {}", rig.duty());
}

#[test]
fn coasting_produces_zero_duty() {
    let mut rig = Rig::new();
    rig.activate();
    rig.hw.snapshot.pedaling = false;
    rig.hw.snapshot.accelerator = 0.0;
    rig.tick();
    assert_eq!(rig.duty(), 0.0);
}

// ── Published state ───────────────────────────────────────────

#[test]
fn bus_carries_speed_and_duty() {
    let mut rig = Rig::new();
    rig.activate();

    rig.hw.snapshot.motor_rpm = 1000.0;
    rig.hw.snapshot.speed_kmh = 126.0;
    rig.hw.snapshot.accelerator = 1.0;
    rig.hw.snapshot.battery_voltage = 37.8;
    rig.tick();

    let s = rig.bus.snapshot();
    assert_eq!(s.activation, StateId::Active);
    assert!((s.motor_rpm - 1000.0).abs() < 1e-3);
    assert!((s.speed_kmh - 126.0).abs() < 1e-3);
    assert_eq!(s.motor_duty, 1.0);
    assert!((s.battery_voltage - 37.8).abs() < 1e-3);
}

#[test]
fn telemetry_matches_last_tick() {
    let mut rig = Rig::new();
    rig.activate();
    rig.hw.snapshot.pedaling = true;
    rig.hw.snapshot.assistance_level = 80;
    rig.tick();

    let t = rig.svc.telemetry();
    assert_eq!(t.state, StateId::Active);
    assert!(t.pedaling);
    assert_eq!(t.assistance_level, 80);
    assert!(t.motor_duty > 0.0);
}
