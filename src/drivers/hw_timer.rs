//! Periodic tick timers using ESP-IDF's esp_timer API.
//!
//! Creates the three cadence timers and pushes their ticks into the
//! lock-free SPSC queue. Timer callbacks execute in the ESP timer task
//! context (not ISR), so `push_event()` is safe there.
//!
//! On simulation targets the main loop drives ticks with sleeps instead.

#[cfg(target_os = "espidf")]
use crate::events::{push_event, Event};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut CONTROL_TIMER: esp_timer_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut BLIND_SPOT_TIMER: esp_timer_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut DISPLAY_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn control_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::ControlTick);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn blind_spot_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::BlindSpotTick);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn display_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::DisplayTick);
}

#[cfg(target_os = "espidf")]
unsafe fn start_periodic(
    handle: *mut esp_timer_handle_t,
    cb: unsafe extern "C" fn(*mut core::ffi::c_void),
    name: &'static [u8],
    period_ms: u32,
) -> bool {
    let args = esp_timer_create_args_t {
        callback: Some(cb),
        arg: core::ptr::null_mut(),
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: name.as_ptr() as *const _,
        skip_unhandled_events: false,
    };
    // SAFETY: each handle is written here once at boot from the single
    // main-task context before any timer callbacks fire.
    unsafe {
        let ret = esp_timer_create(&args, handle);
        if ret != ESP_OK {
            log::error!("hw_timer: timer create failed (rc={})", ret);
            return false;
        }
        let ret = esp_timer_start_periodic(*handle, u64::from(period_ms) * 1000);
        if ret != ESP_OK {
            log::error!("hw_timer: timer start failed (rc={})", ret);
            return false;
        }
    }
    true
}

/// Start the tick timers at the configured cadences.
#[cfg(target_os = "espidf")]
pub fn start_timers(control_ms: u32, blind_spot_ms: u32, display_ms: u32) {
    // SAFETY: single main-task boot path; see start_periodic.
    unsafe {
        if !start_periodic(
            &raw mut CONTROL_TIMER,
            control_tick_cb,
            b"control\0",
            control_ms,
        ) {
            return;
        }
        if !start_periodic(
            &raw mut BLIND_SPOT_TIMER,
            blind_spot_tick_cb,
            b"blindspot\0",
            blind_spot_ms,
        ) {
            return;
        }
        if !start_periodic(
            &raw mut DISPLAY_TIMER,
            display_tick_cb,
            b"display\0",
            display_ms,
        ) {
            return;
        }
    }
    info!(
        "hw_timer: control@{}ms + blindspot@{}ms + display@{}ms started",
        control_ms, blind_spot_ms, display_ms
    );
}

#[cfg(not(target_os = "espidf"))]
pub fn start_timers(_control_ms: u32, _blind_spot_ms: u32, _display_ms: u32) {
    log::info!("hw_timer(sim): timers not started (events driven by sleep loop)");
}

/// Stop all tick timers.
#[cfg(target_os = "espidf")]
pub fn stop_timers() {
    // SAFETY: handles are valid if start_timers() succeeded; the null
    // check prevents stopping a timer that never started.
    unsafe {
        for handle in [CONTROL_TIMER, BLIND_SPOT_TIMER, DISPLAY_TIMER] {
            if !handle.is_null() {
                esp_timer_stop(handle);
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_timers() {}
