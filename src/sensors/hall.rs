//! Hall-effect speed estimation.
//!
//! Split in two halves that never share a lock:
//!
//! - [`HallChannel::record_edge`] is the interrupt half. It stores the
//!   interval since the previous edge and bumps an edge sequence counter.
//!   O(1), non-blocking, single writer.
//! - [`SpeedEstimator::sample`] is the tick half. It derives motor rpm and
//!   road speed from the latest period, applies the stale timeout, and uses
//!   the sequence counter so one stored period is consumed as a *new*
//!   sample at most once.
//!
//! The ISR and the control tick run at different priorities, so the shared
//! state is a handful of atomics rather than a mutex — a blocked ISR would
//! be a priority inversion.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Shared state between the hall ISR (writer) and the control tick (reader).
///
/// `last_edge_us == 0` means no edge has ever been seen; `edge_seq == 0`
/// means no complete period exists yet (a period needs two edges).
pub struct HallChannel {
    last_edge_us: AtomicU64,
    period_us: AtomicU64,
    edge_seq: AtomicU32,
}

/// Channel instance the GPIO ISR writes into.
pub static HALL_CHANNEL: HallChannel = HallChannel::new();

impl HallChannel {
    pub const fn new() -> Self {
        Self {
            last_edge_us: AtomicU64::new(0),
            period_us: AtomicU64::new(0),
            edge_seq: AtomicU32::new(0),
        }
    }

    /// Record one hall edge. Safe to call from interrupt context.
    pub fn record_edge(&self, now_us: u64) {
        let last = self.last_edge_us.swap(now_us, Ordering::Relaxed);
        if last != 0 {
            self.period_us
                .store(now_us.wrapping_sub(last), Ordering::Relaxed);
            // Release pairs with the Acquire in `sample`, publishing the
            // period store above.
            self.edge_seq.fetch_add(1, Ordering::Release);
        }
    }
}

/// One derived speed sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedReading {
    /// Motor shaft speed (rpm). 0 when stopped or stale.
    pub motor_rpm: f32,
    /// Road speed (km/h), from rpm × wheel circumference.
    pub speed_kmh: f32,
    /// True when this tick observed a period not seen by a previous tick.
    pub fresh: bool,
}

impl SpeedReading {
    /// The reading reported while stopped, stale, or before the second edge.
    pub const STOPPED: Self = Self {
        motor_rpm: 0.0,
        speed_kmh: 0.0,
        fresh: false,
    };
}

/// Tick-side estimator. Owns the consumed-sequence cursor; the channel
/// itself never resets.
pub struct SpeedEstimator {
    pulses_per_rev: u32,
    wheel_circumference_m: f32,
    stale_timeout_us: u64,
    consumed_seq: u32,
}

impl SpeedEstimator {
    pub fn new(pulses_per_rev: u32, wheel_circumference_m: f32, stale_timeout_ms: u32) -> Self {
        Self {
            pulses_per_rev: pulses_per_rev.max(1),
            wheel_circumference_m,
            stale_timeout_us: u64::from(stale_timeout_ms) * 1000,
            consumed_seq: 0,
        }
    }

    /// Derive the current speed from the channel.
    ///
    /// A period older than the stale timeout reads as stopped — a cached
    /// period must never be reported as nonzero speed after the wheel has
    /// actually stopped turning.
    pub fn sample(&mut self, channel: &HallChannel, now_us: u64) -> SpeedReading {
        let seq = channel.edge_seq.load(Ordering::Acquire);
        let period_us = channel.period_us.load(Ordering::Relaxed);
        let last_edge_us = channel.last_edge_us.load(Ordering::Relaxed);

        let fresh = seq != 0 && seq != self.consumed_seq;
        self.consumed_seq = seq;

        if seq == 0 || period_us == 0 {
            return SpeedReading::STOPPED;
        }
        if now_us.saturating_sub(last_edge_us) > self.stale_timeout_us {
            return SpeedReading::STOPPED;
        }

        let frequency_hz = 1e6 / period_us as f32;
        let motor_rpm = frequency_hz / self.pulses_per_rev as f32 * 60.0;
        let speed_kmh = motor_rpm * self.wheel_circumference_m * 60.0 / 1000.0;

        SpeedReading {
            motor_rpm,
            speed_kmh,
            fresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> SpeedEstimator {
        // 6 pulses/rev, 2.1 m wheel, 1 s stale timeout
        SpeedEstimator::new(6, 2.1, 1000)
    }

    #[test]
    fn no_edges_reads_stopped() {
        let ch = HallChannel::new();
        let mut est = estimator();
        assert_eq!(est.sample(&ch, 1_000_000), SpeedReading::STOPPED);
    }

    #[test]
    fn single_edge_is_not_a_period() {
        let ch = HallChannel::new();
        let mut est = estimator();
        ch.record_edge(1_000_000);
        assert_eq!(est.sample(&ch, 1_000_500), SpeedReading::STOPPED);
    }

    #[test]
    fn steady_10ms_periods_give_1000_rpm() {
        let ch = HallChannel::new();
        let mut est = estimator();

        // Three 10 000 µs periods: 100 Hz / 6 ppr → 1000 rpm.
        for t in [1_000_000u64, 1_010_000, 1_020_000, 1_030_000] {
            ch.record_edge(t);
        }
        let r = est.sample(&ch, 1_030_100);
        assert!((r.motor_rpm - 1000.0).abs() < 0.01, "rpm = {}", r.motor_rpm);
        // 1000 rpm × 2.1 m × 60 / 1000 = 126 km/h
        assert!((r.speed_kmh - 126.0).abs() < 0.01, "kmh = {}", r.speed_kmh);
        assert!(r.fresh);
    }

    #[test]
    fn stale_period_reads_zero() {
        let ch = HallChannel::new();
        let mut est = estimator();
        ch.record_edge(1_000_000);
        ch.record_edge(1_010_000);

        let live = est.sample(&ch, 1_020_000);
        assert!(live.motor_rpm > 0.0);

        // > 1 s after the last edge the cached 10 ms period must not leak.
        let stale = est.sample(&ch, 2_500_000);
        assert_eq!(stale, SpeedReading::STOPPED);
    }

    #[test]
    fn period_consumed_at_most_once() {
        let ch = HallChannel::new();
        let mut est = estimator();
        ch.record_edge(1_000_000);
        ch.record_edge(1_010_000);

        assert!(est.sample(&ch, 1_015_000).fresh);
        // Same stored period on the next tick: still reported, not "new".
        let again = est.sample(&ch, 1_020_000);
        assert!(!again.fresh);
        assert!(again.motor_rpm > 0.0);

        ch.record_edge(1_020_000);
        assert!(est.sample(&ch, 1_025_000).fresh);
    }
}
