//! fsm-dispatch: a minimal event-driven finite state machine engine
//!
//! An object becomes a state machine by embedding a [`Machine`] and
//! implementing [`Fsm`]. Each state is an ordinary method that receives an
//! [`Event`] and answers with a [`DispatchResult`]; exactly one of them is
//! active at a time. The engine delivers the lifecycle signals (INIT, ENTRY,
//! EXIT) in a fixed order and never allocates while dispatching.
//!
//! # Core Concepts
//!
//! - **Signal**: integer discriminator; 0-3 are reserved, user signals start at 4
//! - **Event**: a signal plus an optional payload
//! - **State handler**: `fn(&mut F, &Event<P>) -> DispatchResult`
//! - **Dispatch**: route one event to the active handler and run EXIT/ENTRY on
//!   transition
//!
//! The model is flat: no nested states, guards, timers or deferred events.
//!
//! # Example
//!
//! ```rust
//! use fsm_dispatch::core::{DispatchResult, Event, Signal};
//! use fsm_dispatch::engine::{Fsm, Machine};
//! use fsm_dispatch::signals;
//!
//! signals! {
//!     enum Sig {
//!         Timeout,
//!     }
//! }
//!
//! struct Blinker {
//!     machine: Machine<Self>,
//!     lit: u32,
//! }
//!
//! impl Blinker {
//!     fn off(&mut self, e: &Event) -> DispatchResult {
//!         match Sig::try_from(e.signal()) {
//!             Ok(Sig::Timeout) => self.transition_to(Self::on),
//!             Err(_) => DispatchResult::Ignored,
//!         }
//!     }
//!
//!     fn on(&mut self, e: &Event) -> DispatchResult {
//!         match e.signal() {
//!             Signal::ENTRY => {
//!                 self.lit += 1;
//!                 DispatchResult::Handled
//!             }
//!             s if s == Sig::Timeout.signal() => self.transition_to(Self::off),
//!             _ => DispatchResult::Ignored,
//!         }
//!     }
//! }
//!
//! impl Fsm for Blinker {
//!     type Payload = ();
//!
//!     fn machine(&self) -> &Machine<Self> {
//!         &self.machine
//!     }
//!
//!     fn machine_mut(&mut self) -> &mut Machine<Self> {
//!         &mut self.machine
//!     }
//! }
//!
//! let mut blinker = Blinker { machine: Machine::new(), lit: 0 };
//! blinker.init(Blinker::off).unwrap();
//! for _ in 0..3 {
//!     blinker.dispatch(&Sig::Timeout.event());
//! }
//!
//! assert_eq!(blinker.lit, 2);
//! assert!(blinker.machine().is_in(Blinker::on));
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{MachineBuilder, MachineConfig, ReinitPolicy};
pub use crate::core::{DispatchResult, Event, Signal};
pub use crate::engine::{Fsm, Machine, MachineError, StateHandler};
