//! Application service — the hexagonal core.
//!
//! [`ControlService`] owns the activation FSM, the emergency monitor, the
//! drive controller, and the blind-spot monitor. It exposes a clean,
//! hardware-agnostic API; all I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                 │        ControlService        │
//! ActuatorPort ◀──│  FSM · Emergency · Arbiter   │ ──▶ StateBus
//!                 │        · PID · Radar         │
//! DisplayPort ◀── └─────────────────────────────┘
//! ```

use std::sync::Arc;

use log::{info, warn};

use crate::blind_spot::BlindSpotMonitor;
use crate::bus::{StateBus, SystemState};
use crate::config::SystemConfig;
use crate::control::AssistController;
use crate::error::ActivationError;
use crate::events::Event;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::safety::{EmergencyEdge, EmergencyMonitor};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, DisplayFrame, DisplayPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct ControlService {
    fsm: Fsm,
    ctx: FsmContext,
    emergency: EmergencyMonitor,
    assist: AssistController,
    blind_spot: BlindSpotMonitor,
    bus: Arc<StateBus>,
    /// Seconds per control tick (derived from config).
    tick_secs: f32,
    tick_count: u64,
    /// Duty applied on the most recent control tick.
    last_duty: f32,
}

impl ControlService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, bus: Arc<StateBus>) -> Self {
        let tick_secs = config.control_loop_interval_ms as f32 / 1000.0;
        let emergency = EmergencyMonitor::new(config.emergency_debounce_ms);
        let assist = AssistController::new(&config);
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Locked);

        Self {
            fsm,
            ctx,
            emergency,
            assist,
            blind_spot: BlindSpotMonitor::new(),
            bus,
            tick_secs,
            tick_count: 0,
            last_duty: 0.0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (Locked).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("ControlService started in {:?}", self.fsm.current_state());
    }

    // ── Credential events ─────────────────────────────────────

    /// Latch a credential-reader event for the next control tick.
    /// Tick events are dispatched by the main loop, not here.
    pub fn handle_event(&mut self, event: Event, sink: &mut impl EventSink) {
        match event {
            Event::CredentialAuthenticated => {
                self.ctx.credential_authenticated = true;
            }
            Event::CredentialRejected => {
                warn!("credential rejected");
                sink.emit(&AppEvent::CredentialRejected);
            }
            Event::TagRemoved => {
                // Deactivation is emergency-only; losing the tag mid-ride
                // must not cut power. Noted for the ride log.
                info!("credential tag left the reader field");
            }
            Event::ControlTick | Event::BlindSpotTick | Event::DisplayTick => {}
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle:
    /// read sensors → debounce emergency → FSM → arbitrate/PID → actuators
    /// → publish.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
        now_us: u64,
    ) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Read sensors via SensorPort.
        let snapshot = hw.read_all(now_us);
        self.ctx.sensors = snapshot;

        // 2. Debounce the emergency input; the FSM only ever sees the
        //    conditioned level and edges.
        let edge = self.emergency.update(snapshot.emergency_pressed, now_us);
        self.ctx.emergency_edge = edge;
        self.ctx.emergency_pressed = self.emergency.is_pressed();
        match edge {
            Some(EmergencyEdge::Pressed) => sink.emit(&AppEvent::EmergencyEngaged),
            Some(EmergencyEdge::Released) => sink.emit(&AppEvent::EmergencyCleared),
            None => {}
        }

        // 3. FSM tick (pure state logic).
        self.fsm.tick(&mut self.ctx);

        // 4. Drive computation. The gate comes first: outside Active the
        //    loop state is wiped and the duty is zero, unconditionally.
        let duty = if self.ctx.commands.drive_enabled {
            self.assist.compute(&snapshot, self.tick_secs)
        } else {
            if self.fsm.current_state() == StateId::EmergencyStopped && self.rider_wants_torque() {
                warn!("{}", ActivationError::EmergencyLatched);
            }
            self.assist.reset();
            0.0
        };
        self.last_duty = duty;

        // 5. Apply actuator commands via ActuatorPort.
        hw.set_motor_duty(duty);
        hw.set_power_relay(self.ctx.commands.power_relay);
        hw.set_system_led(self.ctx.commands.system_led);

        // 6. Publish to the state bus and emit a state-change event if the
        //    FSM moved.
        let new_state = self.fsm.current_state();
        self.publish(new_state, duty);
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        // One credential event activates at most once.
        self.ctx.clear_tick_inputs();
    }

    /// Sample the blind-spot radars and drive the warning lamp. Runs on
    /// its own cadence, independent of activation state.
    pub fn blind_spot_tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        let (left, right) = hw.read_blind_spot();
        let prev = self.blind_spot.status();
        let status = self.blind_spot.update(left, right);
        hw.set_blind_spot_light(status.warning());

        self.bus.update(|s| {
            s.blind_spot_left = status.left;
            s.blind_spot_right = status.right;
        });

        if status != prev {
            sink.emit(&AppEvent::BlindSpotChanged { left, right });
        }
    }

    /// Compose and push one display frame from the published state.
    pub fn display_tick(&self, display: &mut impl DisplayPort) {
        let s = self.bus.snapshot();
        display.show(&DisplayFrame {
            state_name: s.activation.name(),
            speed_kmh: s.speed_kmh,
            battery_voltage: s.battery_voltage,
            assistance_level: s.assistance_level,
            blind_spot_warning: s.blind_spot_left || s.blind_spot_right,
        });
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            speed_kmh: self.ctx.sensors.speed_kmh,
            motor_rpm: self.ctx.sensors.motor_rpm,
            motor_duty: self.last_duty,
            assistance_level: self.ctx.sensors.assistance_level,
            battery_voltage: self.ctx.sensors.battery_voltage,
            pedaling: self.ctx.sensors.pedaling,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn rider_wants_torque(&self) -> bool {
        self.ctx.sensors.accelerator > self.ctx.config.accel_deadband || self.ctx.sensors.pedaling
    }

    fn publish(&self, state: StateId, duty: f32) {
        let snap = &self.ctx.sensors;
        let blind = self.blind_spot.status();
        self.bus.publish(SystemState {
            activation: state,
            speed_kmh: snap.speed_kmh,
            motor_rpm: snap.motor_rpm,
            motor_duty: duty,
            assistance_level: snap.assistance_level,
            battery_voltage: snap.battery_voltage,
            pedaling: snap.pedaling,
            blind_spot_left: blind.left,
            blind_spot_right: blind.right,
            emergency_latched: state == StateId::EmergencyStopped,
        });
    }
}
