//! Per-instance engine state: the active handler and its bookkeeping.

use crate::builder::{MachineConfig, ReinitPolicy};
use crate::core::{DispatchResult, Signal, TransitionKind, TransitionLog, TransitionMarker};
use crate::engine::error::MachineError;
use crate::engine::fsm::{Fsm, StateHandler};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Engine-level lifecycle of a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No active handler yet; `dispatch` is a no-op.
    Uninitialized,
    /// `init` has run; there is always exactly one active handler.
    Running,
}

/// Counters maintained by the engine. Updating them never allocates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineStats {
    /// Events delivered through `dispatch` to an active handler
    pub dispatched: u64,
    pub handled: u64,
    pub ignored: u64,
    /// Dispatches that ended in a transition, self-transitions included
    pub transitions: u64,
    pub self_transitions: u64,
    /// Transitions requested from ENTRY handling and not chained
    pub cascades_dropped: u64,
    /// Transitions requested from EXIT handling; their target replaced the
    /// one chosen by the triggering event and received the ENTRY
    pub exit_redirects: u64,
    /// Successful `init` calls
    pub inits: u64,
}

/// The engine half of a state machine.
///
/// A consumer type embeds one `Machine<Self>` and exposes it through
/// [`Fsm`]. The machine holds at most one active [`StateHandler`]; it is
/// unset until `init` and set for the rest of the machine's life. Only
/// `init` moves the machine out of [`Phase::Uninitialized`].
pub struct Machine<F: Fsm> {
    id: Uuid,
    label: String,
    reinit: ReinitPolicy,
    initialized: bool,
    active: Option<StateHandler<F>>,
    stats: MachineStats,
    history: TransitionLog,
}

impl<F: Fsm> Machine<F> {
    /// Machine with the default configuration and a fresh id.
    pub fn new() -> Self {
        Self::from_config(Uuid::new_v4(), MachineConfig::default())
    }

    pub(crate) fn from_config(id: Uuid, config: MachineConfig) -> Self {
        Self {
            id,
            label: config.label,
            reinit: config.reinit,
            initialized: false,
            active: None,
            stats: MachineStats::default(),
            history: TransitionLog::with_capacity(config.history_capacity),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn reinit_policy(&self) -> ReinitPolicy {
        self.reinit
    }

    pub fn phase(&self) -> Phase {
        if self.initialized {
            Phase::Running
        } else {
            Phase::Uninitialized
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The active handler, `None` before `init`.
    pub fn active(&self) -> Option<StateHandler<F>> {
        self.active
    }

    /// Check whether `handler` is the active handler.
    ///
    /// Compares function addresses. Two handlers with byte-identical bodies
    /// may be merged by the compiler and then compare equal.
    pub fn is_in(&self, handler: StateHandler<F>) -> bool {
        self.active
            .is_some_and(|active| std::ptr::fn_addr_eq(active, handler))
    }

    pub fn stats(&self) -> &MachineStats {
        &self.stats
    }

    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    /// Make `target` the active handler and report a transition.
    ///
    /// Meant to be returned straight from a state handler. The engine then
    /// delivers EXIT to the handler that was running and ENTRY to `target`.
    ///
    /// Before `init` there is no running handler: nothing is written and the
    /// result is `Ignored`.
    pub fn transition_to(&mut self, target: StateHandler<F>) -> DispatchResult {
        if !self.initialized {
            debug!(
                machine = %self.label,
                machine_id = %self.id,
                "transition requested before init ignored"
            );
            return DispatchResult::Ignored;
        }
        self.active = Some(target);
        DispatchResult::Transition(TransitionMarker::new())
    }

    /// Install the initial handler, honouring the reinit policy.
    pub(crate) fn start(&mut self, initial: StateHandler<F>) -> Result<TransitionKind, MachineError> {
        let kind = match (self.initialized, self.reinit) {
            (false, _) => TransitionKind::Initial,
            (true, ReinitPolicy::Reset) => TransitionKind::Reset,
            (true, ReinitPolicy::Forbid) => {
                warn!(
                    machine = %self.label,
                    machine_id = %self.id,
                    "init rejected: machine is already running"
                );
                return Err(MachineError::AlreadyInitialized {
                    machine: self.label.clone(),
                });
            }
        };

        self.initialized = true;
        self.active = Some(initial);
        self.stats.inits += 1;
        Ok(kind)
    }

    pub(crate) fn note_outcome(&mut self, result: &DispatchResult) {
        self.stats.dispatched += 1;
        match result {
            DispatchResult::Handled => self.stats.handled += 1,
            DispatchResult::Ignored => self.stats.ignored += 1,
            DispatchResult::Transition(_) => self.stats.transitions += 1,
        }
    }

    pub(crate) fn note_transition(&mut self, trigger: Signal, kind: TransitionKind) {
        if kind == TransitionKind::SelfTransition {
            self.stats.self_transitions += 1;
        }
        self.history.record(trigger, kind);
        debug!(
            machine = %self.label,
            machine_id = %self.id,
            trigger = %trigger,
            ?kind,
            "transition complete"
        );
    }

    pub(crate) fn note_cascade(&mut self, during: Signal) {
        self.stats.cascades_dropped += 1;
        warn!(
            machine = %self.label,
            machine_id = %self.id,
            during = %during,
            "transition requested during lifecycle handling was not chained"
        );
    }

    pub(crate) fn note_exit_redirect(&mut self) {
        self.stats.exit_redirects += 1;
        debug!(
            machine = %self.label,
            machine_id = %self.id,
            "transition requested during EXIT replaced the pending target"
        );
    }
}

impl<F: Fsm> Default for Machine<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fsm> fmt::Debug for Machine<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("reinit", &self.reinit)
            .field("phase", &self.phase())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
