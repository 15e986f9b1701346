//! Battery pack voltage sensing.
//!
//! The pack sits behind a resistive divider so a 36 V nominal pack reads
//! within the ADC's 3.3 V range. The divider ratio is configuration, not a
//! constant, because boards in the field carry different resistor pairs.

use super::throttle::ADC_FULL_SCALE;

/// ADC reference voltage (volts).
const ADC_VREF: f32 = 3.3;

/// Convert a raw ADC count at the divider tap into pack volts.
pub fn pack_voltage(raw: u16, divider_ratio: f32) -> f32 {
    f32::from(raw.min(ADC_FULL_SCALE)) / f32::from(ADC_FULL_SCALE) * ADC_VREF * divider_ratio
}
