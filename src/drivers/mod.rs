//! Hardware initialisation, tick timers, and actuator drivers.

pub mod hw_init;
pub mod hw_timer;
pub mod motor;
