//! Interrupt-driven event system.
//!
//! Events are produced by:
//! - the credential-reader callback (tag authenticated / removed)
//! - timer callbacks (control tick, blind-spot tick, display tick)
//!
//! Events are consumed by the main control loop, which drains them one at
//! a time in FIFO order. Hall, pedal, and emergency edges do NOT go
//! through this queue — they are latched into per-channel atomics (see
//! `sensors::hall`, `sensors::pedal`) because only their most recent
//! timestamp matters, not their count.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ RFID event  │────▶│              │     │              │
//! │ Timer ISR   │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Software    │────▶│  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 32;

/// System event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    // ── Credential reader ─────────────────────────────────
    /// An authorized tag was presented to the reader.
    CredentialAuthenticated = 0,
    /// A tag was presented but failed the UID check.
    CredentialRejected = 1,
    /// The previously presented tag left the field.
    TagRemoved = 2,

    // ── Periodic task domain ──────────────────────────────
    /// Control loop tick (20 Hz default).
    ControlTick = 10,
    /// Blind-spot radar sampling tick (10 Hz default).
    BlindSpotTick = 11,
    /// Display refresh tick (4 Hz default).
    DisplayTick = 12,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISR/timer-task context writes (produce), main loop reads (consume).
// Uses atomic head/tail indices over a static byte buffer so the
// producers need no allocation and no lock.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: each slot is written by the single producer side (guarded by
// the head index) and read by the single consumer side (guarded by the
// tail index); the Release/Acquire pairs on head/tail order the slot
// accesses.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from ISR/timer context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: slot `head` is owned by the producer until the Release
    // store below publishes it.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: slot `tail` was published by the producer's Release store.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::CredentialAuthenticated),
        1 => Some(Event::CredentialRejected),
        2 => Some(Event::TagRemoved),
        10 => Some(Event::ControlTick),
        11 => Some(Event::BlindSpotTick),
        12 => Some(Event::DisplayTick),
        _ => None,
    }
}
