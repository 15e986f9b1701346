//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern expressed in Rust: a fixed array of
//! [`StateDescriptor`] rows, each carrying plain `fn` pointers for
//! `on_enter`, `on_exit`, and the per-tick `on_update`. No heap, no `dyn`.
//!
//! Each tick the engine calls `on_update` for the **current** state. If it
//! returns `Some(next_id)`, the engine runs `on_exit` for the current
//! state, then `on_enter` for the next, and updates the current pointer.
//! All handlers receive `&mut FsmContext`, which holds sensor readings,
//! per-tick inputs, actuator commands, config, and timing.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all activation states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Power-on / shutdown state. Everything de-energised.
    Locked = 0,
    /// Safe to ride once a credential arrives; emergency input is clear.
    WaitingForCredential = 1,
    /// Authorized; drive enabled.
    Active = 2,
    /// Emergency latched; drive dead until the input releases.
    EmergencyStopped = 3,
}

impl StateId {
    /// Total number of states — sizes the table array.
    pub const COUNT: usize = 4;

    /// Human-readable name, matching the state-table labels.
    pub fn name(self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::WaitingForCredential => "WaitingForCredential",
            Self::Active => "Active",
            Self::EmergencyStopped => "EmergencyStopped",
        }
    }

    /// Convert a `u8` index back to `StateId`. Panics on out-of-range in
    /// debug builds; returns `Locked` in release (safe fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Locked,
            1 => Self::WaitingForCredential,
            2 => Self::Active,
            3 => Self::EmergencyStopped,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Locked
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and is driven with an [`FsmContext`] that is
/// threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition, bypassing `on_update`.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}


#[cfg(all(test, not(target_os = "espidf")))]
mod proptests {
    use super::context::FsmContext;
    use super::*;
    use crate::config::SystemConfig;
    use crate::safety::EmergencyEdge;
    use proptest::prelude::*;

    /// One tick's worth of inputs: credential, emergency level.
    fn arb_inputs() -> impl Strategy<Value = (bool, bool)> {
        (any::<bool>(), any::<bool>())
    }

    proptest! {
        #[test]
        fn drive_only_enabled_while_active(
            inputs in proptest::collection::vec(arb_inputs(), 1..200)
        ) {
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Locked);
            let mut ctx = FsmContext::new(SystemConfig::default());
            fsm.start(&mut ctx);

            let mut prev_pressed = false;
            for (cred, pressed) in inputs {
                ctx.credential_authenticated = cred;
                ctx.emergency_pressed = pressed;
                ctx.emergency_edge = match (prev_pressed, pressed) {
                    (false, true) => Some(EmergencyEdge::Pressed),
                    (true, false) => Some(EmergencyEdge::Released),
                    _ => None,
                };
                prev_pressed = pressed;

                fsm.tick(&mut ctx);
                ctx.clear_tick_inputs();

                if ctx.commands.drive_enabled {
                    prop_assert_eq!(fsm.current_state(), StateId::Active);
                }
                if fsm.current_state() == StateId::EmergencyStopped {
                    prop_assert!(!ctx.commands.power_relay);
                }
            }
        }

        #[test]
        fn emergency_press_always_kills_active(
            warmup in proptest::collection::vec(arb_inputs(), 0..50)
        ) {
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Locked);
            let mut ctx = FsmContext::new(SystemConfig::default());
            fsm.start(&mut ctx);

            for (cred, pressed) in warmup {
                ctx.credential_authenticated = cred;
                ctx.emergency_pressed = pressed;
                fsm.tick(&mut ctx);
                ctx.clear_tick_inputs();
            }

            fsm.force_transition(StateId::Active, &mut ctx);
            ctx.emergency_edge = Some(EmergencyEdge::Pressed);
            ctx.emergency_pressed = true;
            fsm.tick(&mut ctx);
            prop_assert_eq!(fsm.current_state(), StateId::EmergencyStopped);
            prop_assert!(!ctx.commands.drive_enabled);
        }
    }
}
