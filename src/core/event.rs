//! Events delivered to state handlers.

use super::signal::{ReservedSignal, Signal};
use serde::{Deserialize, Serialize};

/// Immutable event: a [`Signal`] plus an optional consumer payload.
///
/// The four reserved events are compile-time constants of every
/// `Event<P>`, so the engine never builds them on the heap. For a generic
/// `P` each use of a constant is materialized as a stack temporary rather
/// than read from one shared static: a generic type cannot own a `static`.
/// The value is a signal and a `None` payload, so nothing is allocated
/// for it.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::core::{Event, Signal};
///
/// let tick: Event<u32> = Event::with_payload(Signal::user(0), 250);
/// assert_eq!(tick.payload(), Some(&250));
///
/// let entry: &Event<u32> = &Event::ENTRY;
/// assert_eq!(entry.signal(), Signal::ENTRY);
/// assert!(entry.payload().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event<P = ()> {
    signal: Signal,
    payload: Option<P>,
}

impl<P> Event<P> {
    pub const EMPTY: Self = Self::reserved(ReservedSignal::Empty);
    pub const ENTRY: Self = Self::reserved(ReservedSignal::Entry);
    pub const EXIT: Self = Self::reserved(ReservedSignal::Exit);
    pub const INIT: Self = Self::reserved(ReservedSignal::Init);

    /// Reserved events indexed by their signal value.
    pub const RESERVED: [Self; 4] = [Self::EMPTY, Self::ENTRY, Self::EXIT, Self::INIT];

    /// Event without payload.
    pub const fn new(signal: Signal) -> Self {
        Self {
            signal,
            payload: None,
        }
    }

    pub const fn with_payload(signal: Signal, payload: P) -> Self {
        Self {
            signal,
            payload: Some(payload),
        }
    }

    const fn reserved(reserved: ReservedSignal) -> Self {
        Self::new(reserved.signal())
    }

    pub const fn signal(&self) -> Signal {
        self.signal
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<P> {
        self.payload
    }

    /// True for engine lifecycle events (EMPTY, ENTRY, EXIT, INIT).
    pub const fn is_reserved(&self) -> bool {
        self.signal.is_reserved()
    }
}

impl<P> From<Signal> for Event<P> {
    fn from(signal: Signal) -> Self {
        Self::new(signal)
    }
}
