//! Core value types of the dispatch engine.
//!
//! - Signals and the reserved lifecycle range via [`Signal`]
//! - Events with optional payload via [`Event`]
//! - Handler outcomes via [`DispatchResult`]
//! - Bounded transition records via [`TransitionLog`]
//!
//! Nothing in this module performs I/O or allocates on the dispatch path.

mod event;
mod history;
mod result;
mod signal;

pub use event::Event;
pub use history::{TransitionKind, TransitionLog, TransitionRecord};
pub use result::{DispatchResult, TransitionMarker};
pub use signal::{ReservedSignal, Signal, SignalError};
