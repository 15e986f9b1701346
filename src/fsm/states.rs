//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  LOCKED ──[emergency clear]──▶ WAITING_FOR_CREDENTIAL
//!    │ ▲                               │
//!    │ └──[emergency pressed]──────────┘
//!    │
//!    ├──[credential]──▶ ACTIVE ◀──[credential]── WAITING_FOR_CREDENTIAL
//!    ▲                    │
//!    │                    │[emergency pressed]
//!    │                    ▼
//!    └──[emergency released]── EMERGENCY_STOPPED
//! ```
//!
//! The emergency inputs handed to these handlers are already debounced;
//! raw chatter never reaches the table.

use super::context::{ActuatorCommands, FsmContext};
use super::{StateDescriptor, StateId};
use crate::safety::EmergencyEdge;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Locked
        StateDescriptor {
            id: StateId::Locked,
            name: "Locked",
            on_enter: Some(locked_enter),
            on_exit: None,
            on_update: locked_update,
        },
        // Index 1 — WaitingForCredential
        StateDescriptor {
            id: StateId::WaitingForCredential,
            name: "WaitingForCredential",
            on_enter: Some(waiting_enter),
            on_exit: None,
            on_update: waiting_update,
        },
        // Index 2 — Active
        StateDescriptor {
            id: StateId::Active,
            name: "Active",
            on_enter: Some(active_enter),
            on_exit: Some(active_exit),
            on_update: active_update,
        },
        // Index 3 — EmergencyStopped
        StateDescriptor {
            id: StateId::EmergencyStopped,
            name: "EmergencyStopped",
            on_enter: Some(emergency_enter),
            on_exit: Some(emergency_exit),
            on_update: emergency_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  LOCKED — power-on / shutdown state
// ═══════════════════════════════════════════════════════════════════════════

fn locked_enter(ctx: &mut FsmContext) {
    ctx.commands = ActuatorCommands::all_off();
    info!("LOCKED: relay off, drive disabled");
}

fn locked_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.emergency_pressed {
        // Held emergency input keeps the system locked; a credential
        // presented now is ignored, not queued.
        if ctx.credential_authenticated {
            warn!("LOCKED: credential ignored while emergency input is held");
        }
        return None;
    }

    if ctx.credential_authenticated {
        return Some(StateId::Active);
    }

    Some(StateId::WaitingForCredential)
}

// ═══════════════════════════════════════════════════════════════════════════
//  WAITING_FOR_CREDENTIAL — armed, awaiting an authorized tag
// ═══════════════════════════════════════════════════════════════════════════

fn waiting_enter(ctx: &mut FsmContext) {
    ctx.commands = ActuatorCommands::all_off();
    info!("WAITING: present credential to activate");
}

fn waiting_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.emergency_pressed {
        return Some(StateId::Locked);
    }

    if ctx.credential_authenticated {
        return Some(StateId::Active);
    }

    // Slow heartbeat on the indicator while waiting (1 s period at 20 Hz).
    ctx.commands.system_led = (ctx.ticks_in_state / 10) % 2 == 0;

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ACTIVE — authorized, drive enabled
// ═══════════════════════════════════════════════════════════════════════════

fn active_enter(ctx: &mut FsmContext) {
    ctx.commands.power_relay = true;
    ctx.commands.system_led = true;
    ctx.commands.drive_enabled = true;
    info!("ACTIVE: power relay on, drive enabled");
}

fn active_exit(ctx: &mut FsmContext) {
    // Drive dies with the state, whatever the successor is.
    ctx.commands.drive_enabled = false;
    info!("ACTIVE: drive disabled on state exit");
}

fn active_update(ctx: &mut FsmContext) -> Option<StateId> {
    // The emergency interlock is the only way out of Active; removing the
    // tag after activation does not deactivate a moving bike.
    if ctx.emergency_edge == Some(EmergencyEdge::Pressed) || ctx.emergency_pressed {
        warn!("ACTIVE: emergency stop");
        return Some(StateId::EmergencyStopped);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  EMERGENCY_STOPPED — latched until the input releases
// ═══════════════════════════════════════════════════════════════════════════

fn emergency_enter(ctx: &mut FsmContext) {
    ctx.commands = ActuatorCommands::all_off();
    warn!("EMERGENCY: all outputs de-energised");
}

fn emergency_exit(_ctx: &mut FsmContext) {
    info!("EMERGENCY: input released, re-arming");
}

fn emergency_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.credential_authenticated {
        warn!("EMERGENCY: credential ignored while latched");
    }

    // Fast blink so the rider can see the latch (4 Hz at 20 Hz tick).
    ctx.commands.system_led = (ctx.ticks_in_state / 2) % 2 == 0;

    // Only a debounced release clears the latch; releases are re-checked
    // against the level in case the edge was missed.
    if ctx.emergency_edge == Some(EmergencyEdge::Released) || !ctx.emergency_pressed {
        ctx.commands.system_led = false;
        return Some(StateId::Locked);
    }

    None
}
