//! E-bike assist controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod blind_spot;
pub mod bus;
pub mod config;
pub mod control;
pub mod events;
pub mod fsm;
pub mod safety;

pub mod error;
pub mod pins;

// Hardware-facing modules; the actual implementations are guarded by cfg
// attributes inside, with simulation stubs for host builds.
pub mod adapters;
pub mod drivers;
pub mod sensors;
