//! Emergency-input conditioning.
//!
//! The emergency button is a mechanical switch on a moving bicycle; it
//! chatters. A level must hold for the configured debounce window before
//! the state machine is allowed to see it. The monitor reports *edges* of
//! the debounced level, so the caller latches on transitions rather than
//! re-acting to a held button every tick.

/// A debounced transition of the emergency input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyEdge {
    Pressed,
    Released,
}

pub struct EmergencyMonitor {
    debounce_us: u64,
    stable_pressed: bool,
    candidate_pressed: bool,
    candidate_since_us: u64,
}

impl EmergencyMonitor {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_us: u64::from(debounce_ms) * 1000,
            stable_pressed: false,
            candidate_pressed: false,
            candidate_since_us: 0,
        }
    }

    /// Debounced level as of the last `update`.
    pub fn is_pressed(&self) -> bool {
        self.stable_pressed
    }

    /// Feed one raw sample. Returns an edge when the debounced level
    /// changes, `None` otherwise.
    pub fn update(&mut self, raw_pressed: bool, now_us: u64) -> Option<EmergencyEdge> {
        if raw_pressed != self.candidate_pressed {
            // Level flipped; restart the hold timer.
            self.candidate_pressed = raw_pressed;
            self.candidate_since_us = now_us;
            return None;
        }
        if self.candidate_pressed == self.stable_pressed {
            return None;
        }
        if now_us.saturating_sub(self.candidate_since_us) >= self.debounce_us {
            self.stable_pressed = self.candidate_pressed;
            return Some(if self.stable_pressed {
                EmergencyEdge::Pressed
            } else {
                EmergencyEdge::Released
            });
        }
        None
    }
}
