//! Blind-spot radar monitor.
//!
//! Two RCWL-0516 microwave modules watch the rear quarters; either one
//! reporting presence lights the shared warning lamp. This path is fully
//! independent of activation state — the lamp works even while the bike
//! is locked or emergency-stopped.

use log::info;

/// Latest per-side detection plus the lamp decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlindSpotStatus {
    pub left: bool,
    pub right: bool,
}

impl BlindSpotStatus {
    /// Lamp is on when either side detects.
    pub fn warning(&self) -> bool {
        self.left || self.right
    }
}

pub struct BlindSpotMonitor {
    last: BlindSpotStatus,
}

impl BlindSpotMonitor {
    pub fn new() -> Self {
        Self {
            last: BlindSpotStatus::default(),
        }
    }

    /// Feed one sample of both radar levels. Returns the new status;
    /// logs only on change so a parked car next to the bike doesn't
    /// flood the console at 10 Hz.
    pub fn update(&mut self, left: bool, right: bool) -> BlindSpotStatus {
        let status = BlindSpotStatus { left, right };
        if status != self.last {
            info!(
                "blind spot: left={} right={} lamp={}",
                left,
                right,
                status.warning()
            );
            self.last = status;
        }
        status
    }

    /// Status as of the last sample.
    pub fn status(&self) -> BlindSpotStatus {
        self.last
    }
}

impl Default for BlindSpotMonitor {
    fn default() -> Self {
        Self::new()
    }
}
