//! E-bike assist controller — main entry point.
//!
//! Hexagonal architecture with event-driven execution.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter      LogEventSink      LogDisplay       │
//! │  (Sensor+Actuator)    (EventSink)       (DisplayPort)    │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ───────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │         ControlService (pure logic)            │      │
//! │  │  Activation FSM · Emergency · Arbiter · PID    │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  StateBus (snapshot) · event queue (ISR → main loop)     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The credential reader lives on a separate board; its integration glue
//! pushes `Event::CredentialAuthenticated` / `Event::TagRemoved` into the
//! queue the same way the tick timers do.

#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
mod blind_spot;
mod bus;
pub mod config;
mod error;
mod events;
mod pins;
mod safety;

mod adapters;
pub mod app;
mod control;
mod drivers;
pub mod fsm;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use adapters::display::LogDisplay;
use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::Clock;
use app::events::AppEvent;
use app::ports::EventSink;
use app::service::ControlService;
use bus::StateBus;
use config::SystemConfig;
use drivers::motor::MotorDriver;
use events::Event;
use sensors::SensorHub;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ebike-assist v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    if let Err(e) = config.validate() {
        // Defaults failing validation means a build-time mistake; run
        // anyway so the board at least comes up lockable.
        warn!("config validation failed: {}", e);
    }

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt. In
        // production the watchdog resets the board after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {} — continuing without ISRs", e);
    }
    drivers::hw_timer::start_timers(
        config.control_loop_interval_ms,
        config.blind_spot_interval_ms,
        config.display_interval_ms,
    );

    // ── 4. Construct adapters ─────────────────────────────────
    let sensor_hub = SensorHub::new(&config);
    let mut hw = HardwareAdapter::new(sensor_hub, MotorDriver::new());
    let mut log_sink = LogEventSink::new();
    let mut display = LogDisplay::new();
    let clock = Clock::new();

    // ── 5. Construct the control service ──────────────────────
    let bus = Arc::new(StateBus::new());
    let mut service = ControlService::new(config.clone(), Arc::clone(&bus));
    service.start(&mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    let ticks_per_telemetry = u64::from(config.telemetry_interval_secs) * 1000
        / u64::from(config.control_loop_interval_ms);

    loop {
        // Simulate the control timer via sleep on non-espidf targets. On
        // real hardware the esp_timer callbacks feed the queue and the
        // CPU idles between interrupts.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(
                u64::from(config.control_loop_interval_ms),
            ));
            events::push_event(Event::ControlTick);
        }

        events::drain_events(|event| match event {
            Event::ControlTick => {
                service.tick(&mut hw, &mut log_sink, clock.now_us());
                if ticks_per_telemetry > 0 && service.tick_count() % ticks_per_telemetry == 0 {
                    log_sink.emit(&AppEvent::Telemetry(service.telemetry()));
                }
            }
            Event::BlindSpotTick => {
                service.blind_spot_tick(&mut hw, &mut log_sink);
            }
            Event::DisplayTick => {
                service.display_tick(&mut display);
            }
            Event::CredentialAuthenticated | Event::CredentialRejected | Event::TagRemoved => {
                service.handle_event(event, &mut log_sink);
            }
        });

        // Yield between drains so the timer task can run.
        #[cfg(target_os = "espidf")]
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
}
