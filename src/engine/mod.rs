//! The dispatch engine.
//!
//! A consumer type becomes a state machine by embedding a [`Machine<Self>`]
//! and implementing [`Fsm`]. Each state is a plain method with the
//! [`StateHandler`] signature; the engine keeps exactly one of them active.
//!
//! # Protocol
//!
//! - `init(h)`: `h` receives INIT, then ENTRY
//! - `dispatch(e)`: the active handler receives `e`; on a transition the old
//!   handler receives EXIT and the new one ENTRY
//! - everything runs to completion on the caller's thread, without queuing
//!   and without heap allocation

mod error;
mod fsm;
mod machine;

pub use error::MachineError;
pub use fsm::{Fsm, StateHandler};
pub use machine::{Machine, MachineStats, Phase};
