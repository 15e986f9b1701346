//! Shared system-state bus.
//!
//! One small `Copy` struct behind a mutex, written by the control tick and
//! read by the slower consumers (display refresh, logging). Writers build
//! the whole struct first and swap it in, so the lock is held for a copy,
//! never across I/O.

use std::sync::Mutex;

use crate::fsm::StateId;

/// Snapshot of everything the slow consumers may want to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemState {
    pub activation: StateId,
    pub speed_kmh: f32,
    pub motor_rpm: f32,
    /// Commanded motor duty, [0, 1].
    pub motor_duty: f32,
    pub assistance_level: u8,
    pub battery_voltage: f32,
    pub pedaling: bool,
    pub blind_spot_left: bool,
    pub blind_spot_right: bool,
    pub emergency_latched: bool,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            activation: StateId::Locked,
            speed_kmh: 0.0,
            motor_rpm: 0.0,
            motor_duty: 0.0,
            assistance_level: 0,
            battery_voltage: 0.0,
            pedaling: false,
            blind_spot_left: false,
            blind_spot_right: false,
            emergency_latched: false,
        }
    }
}

/// The bus itself. Cheap to share via `Arc`.
pub struct StateBus {
    inner: Mutex<SystemState>,
}

impl StateBus {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SystemState::default()),
        }
    }

    /// Replace the published state wholesale.
    pub fn publish(&self, state: SystemState) {
        *self.lock() = state;
    }

    /// Mutate the published state in place. The closure runs under the
    /// lock; keep it allocation- and I/O-free.
    pub fn update(&self, f: impl FnOnce(&mut SystemState)) {
        f(&mut self.lock());
    }

    /// Copy out the current state.
    pub fn snapshot(&self) -> SystemState {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SystemState> {
        // A poisoned bus still holds a coherent Copy value.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for StateBus {
    fn default() -> Self {
        Self::new()
    }
}
