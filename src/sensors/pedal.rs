//! Pedal cadence detection.
//!
//! The crank sensor gives one edge per magnet pass. Unlike the hall
//! channel we do not care about the period — only whether an edge arrived
//! recently enough to call the rider "pedaling now". One atomic timestamp
//! is the whole ISR interface.

use core::sync::atomic::{AtomicU64, Ordering};

/// ISR-side latch for the most recent pedal edge. `0` = never seen.
pub struct PedalChannel {
    last_edge_us: AtomicU64,
}

/// Channel instance the crank-sensor ISR writes into.
pub static PEDAL_CHANNEL: PedalChannel = PedalChannel::new();

impl PedalChannel {
    pub const fn new() -> Self {
        Self {
            last_edge_us: AtomicU64::new(0),
        }
    }

    /// Record one crank edge. Safe to call from interrupt context.
    pub fn record_edge(&self, now_us: u64) {
        self.last_edge_us.store(now_us, Ordering::Release);
    }
}

/// Tick-side cadence check.
pub struct PedalMonitor {
    timeout_us: u64,
}

impl PedalMonitor {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_us: u64::from(timeout_ms) * 1000,
        }
    }

    /// True when an edge arrived within the timeout window. The instant
    /// the window expires this flips to false with no hysteresis; the
    /// arbiter is what decides what that means for the motor.
    pub fn is_pedaling(&self, channel: &PedalChannel, now_us: u64) -> bool {
        let last = channel.last_edge_us.load(Ordering::Acquire);
        last != 0 && now_us.saturating_sub(last) <= self.timeout_us
    }
}
