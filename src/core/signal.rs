//! Signals identify what an event means.
//!
//! Values `0..=3` belong to the engine and are delivered by it as lifecycle
//! notifications. Everything from [`Signal::USER_BASE`] upward is free for
//! consumers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Integer discriminator carried by every [`Event`](crate::core::Event).
///
/// Reserved signals are exposed as associated constants so handlers can match
/// on them directly:
///
/// ```rust
/// use fsm_dispatch::core::Signal;
///
/// fn describe(signal: Signal) -> &'static str {
///     match signal {
///         Signal::ENTRY => "entering",
///         Signal::EXIT => "leaving",
///         Signal::INIT => "initializing",
///         _ => "something else",
///     }
/// }
///
/// assert_eq!(describe(Signal::EXIT), "leaving");
/// assert_eq!(describe(Signal::user(0)), "something else");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signal(u32);

impl Signal {
    /// Placeholder signal, never delivered by the engine.
    pub const EMPTY: Signal = Signal(0);
    /// Delivered to a handler right after it becomes active.
    pub const ENTRY: Signal = Signal(1);
    /// Delivered to a handler right before it stops being active.
    pub const EXIT: Signal = Signal(2);
    /// Delivered once to the initial handler, before its ENTRY.
    pub const INIT: Signal = Signal(3);

    /// First value available to consumer-defined signals.
    pub const USER_BASE: u32 = 4;

    /// Wrap a raw value without checking it against the reserved range.
    pub const fn new(value: u32) -> Self {
        Signal(value)
    }

    /// The `offset`-th user signal, i.e. `USER_BASE + offset`.
    pub const fn user(offset: u32) -> Self {
        Signal(Self::USER_BASE.saturating_add(offset))
    }

    /// Checked constructor for consumer signals.
    ///
    /// Fails with [`SignalError::Reserved`] for values owned by the engine.
    pub fn try_user(value: u32) -> Result<Self, SignalError> {
        let signal = Signal(value);
        match signal.reserved() {
            Some(reserved) => Err(SignalError::Reserved {
                value,
                name: reserved.name(),
            }),
            None => Ok(signal),
        }
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_reserved(self) -> bool {
        self.0 < Self::USER_BASE
    }

    /// The reserved signal this value stands for, if any.
    pub fn reserved(self) -> Option<ReservedSignal> {
        ReservedSignal::ALL
            .into_iter()
            .find(|reserved| reserved.signal() == self)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reserved() {
            Some(reserved) => f.write_str(reserved.name()),
            None => write!(f, "SIG({})", self.0),
        }
    }
}

impl From<ReservedSignal> for Signal {
    fn from(reserved: ReservedSignal) -> Self {
        reserved.signal()
    }
}

/// The engine-owned signals.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u32)]
pub enum ReservedSignal {
    Empty = 0,
    Entry = 1,
    Exit = 2,
    Init = 3,
}

impl ReservedSignal {
    pub const ALL: [ReservedSignal; 4] = [Self::Empty, Self::Entry, Self::Exit, Self::Init];

    pub const fn signal(self) -> Signal {
        Signal(self as u32)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::Entry => "ENTRY",
            Self::Exit => "EXIT",
            Self::Init => "INIT",
        }
    }
}

/// Errors raised when interpreting raw signal values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SignalError {
    #[error("Signal {value} is reserved for {name}; user signals start at 4")]
    Reserved { value: u32, name: &'static str },

    #[error("Signal {value} is not declared by this signal set")]
    Unknown { value: u32 },
}
