//! Outcome of delivering one event to a state handler.

/// Proof that a transition was actually requested.
///
/// Only the engine's `transition_to` operation can create one, which ties
/// the `Transition` result to the write of the new active handler.
#[derive(Debug, PartialEq, Eq)]
pub struct TransitionMarker {
    _sealed: (),
}

impl TransitionMarker {
    pub(crate) const fn new() -> Self {
        Self { _sealed: () }
    }
}

/// What a state handler did with an event.
#[must_use = "returning the result is how a handler tells the engine a transition happened"]
#[derive(Debug, PartialEq, Eq)]
pub enum DispatchResult {
    /// Event consumed, no transition.
    Handled,

    /// Event not applicable to this state. Treated like `Handled`.
    Ignored,

    /// Event consumed and the active handler was replaced.
    Transition(TransitionMarker),
}

impl DispatchResult {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transition(_))
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}
