//! Rider analog inputs: accelerator and assistance-level potentiometer.
//!
//! Pure raw-count conversions. The actual ADC reads live behind the
//! sensor port so these stay testable on the host.

/// Full-scale 12-bit ADC count.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Normalize a raw accelerator count into [0.0, 1.0].
///
/// Counts above full scale clamp to 1.0; deadband handling is the
/// arbiter's job, not done here.
pub fn normalize_accel(raw: u16) -> f32 {
    (f32::from(raw.min(ADC_FULL_SCALE)) / f32::from(ADC_FULL_SCALE)).clamp(0.0, 1.0)
}

/// Map a raw assistance-pot count to a whole-percent level 0 – 100.
pub fn assistance_percent(raw: u16) -> u8 {
    let pct = u32::from(raw.min(ADC_FULL_SCALE)) * 100 / u32::from(ADC_FULL_SCALE);
    pct as u8
}
