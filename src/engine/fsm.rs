//! The state-handler protocol and the dispatch loop.

use crate::core::{DispatchResult, Event, Signal, TransitionKind};
use crate::engine::error::MachineError;
use crate::engine::machine::Machine;
use tracing::{debug, trace};

/// A state: a method of the consumer type that processes one event.
///
/// A handler may switch on [`Event::signal`], return
/// [`DispatchResult::Ignored`] for signals it does not care about, or
/// request a transition by returning [`Fsm::transition_to`].
pub type StateHandler<F> = fn(&mut F, &Event<<F as Fsm>::Payload>) -> DispatchResult;

/// Implemented by any type that behaves as a flat state machine.
///
/// The implementor embeds a [`Machine<Self>`] and exposes it; the provided
/// methods run the protocol on top of it.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::core::{DispatchResult, Event, Signal};
/// use fsm_dispatch::engine::{Fsm, Machine};
///
/// const PRESS: Signal = Signal::user(0);
///
/// struct Switch {
///     machine: Machine<Self>,
///     log: Vec<&'static str>,
/// }
///
/// impl Switch {
///     fn off(&mut self, e: &Event) -> DispatchResult {
///         match e.signal() {
///             Signal::ENTRY => {
///                 self.log.push("off");
///                 DispatchResult::Handled
///             }
///             PRESS => self.transition_to(Self::on),
///             _ => DispatchResult::Ignored,
///         }
///     }
///
///     fn on(&mut self, e: &Event) -> DispatchResult {
///         match e.signal() {
///             Signal::ENTRY => {
///                 self.log.push("on");
///                 DispatchResult::Handled
///             }
///             PRESS => self.transition_to(Self::off),
///             _ => DispatchResult::Ignored,
///         }
///     }
/// }
///
/// impl Fsm for Switch {
///     type Payload = ();
///
///     fn machine(&self) -> &Machine<Self> {
///         &self.machine
///     }
///
///     fn machine_mut(&mut self) -> &mut Machine<Self> {
///         &mut self.machine
///     }
/// }
///
/// let mut switch = Switch { machine: Machine::new(), log: Vec::new() };
/// switch.init(Switch::off).unwrap();
/// switch.dispatch(&Event::new(PRESS));
///
/// assert_eq!(switch.log, vec!["off", "on"]);
/// assert!(switch.machine().is_in(Switch::on));
/// ```
pub trait Fsm: Sized {
    /// Payload type carried by this machine's events.
    type Payload;

    fn machine(&self) -> &Machine<Self>;

    fn machine_mut(&mut self) -> &mut Machine<Self>;

    /// Enter the initial state.
    ///
    /// Delivers INIT and then ENTRY. ENTRY goes to whichever handler is
    /// active once INIT has been handled, so an INIT handler can pick the
    /// real starting state with [`transition_to`](Fsm::transition_to). No
    /// EXIT is delivered to anything.
    ///
    /// A second call fails with [`MachineError::AlreadyInitialized`] unless
    /// the machine was built with [`ReinitPolicy::Reset`], in which case it
    /// starts over without notifying the previous handler.
    ///
    /// [`ReinitPolicy::Reset`]: crate::builder::ReinitPolicy::Reset
    fn init(&mut self, initial: StateHandler<Self>) -> Result<(), MachineError> {
        let kind = self.machine_mut().start(initial)?;
        debug!(
            machine = %self.machine().label(),
            machine_id = %self.machine().id(),
            ?kind,
            "initializing state machine"
        );

        if initial(self, &Event::<Self::Payload>::INIT).is_transition() {
            debug!(
                machine = %self.machine().label(),
                "initial transition taken while handling INIT"
            );
        }

        let entered = self.machine().active().unwrap_or(initial);
        if entered(self, &Event::<Self::Payload>::ENTRY).is_transition() {
            self.machine_mut().note_cascade(Signal::ENTRY);
        }

        self.machine_mut().note_transition(Signal::INIT, kind);
        Ok(())
    }

    /// Deliver one event to the active handler.
    ///
    /// Does nothing before `init`. When the handler reports a transition the
    /// handler that received `event` gets EXIT, then the newly active handler
    /// gets ENTRY. At most one EXIT/ENTRY pair runs per call.
    ///
    /// A transition requested while handling EXIT replaces the pending
    /// target: the handler it names is the one that receives ENTRY. A
    /// transition requested while handling ENTRY is not followed.
    fn dispatch(&mut self, event: &Event<Self::Payload>) {
        let Some(source) = self.machine().active() else {
            trace!(
                machine = %self.machine().label(),
                signal = %event.signal(),
                "dispatch before init ignored"
            );
            return;
        };

        trace!(
            machine = %self.machine().label(),
            signal = %event.signal(),
            "dispatching"
        );
        let result = source(self, event);
        self.machine_mut().note_outcome(&result);
        if !result.is_transition() {
            return;
        }

        if source(self, &Event::<Self::Payload>::EXIT).is_transition() {
            self.machine_mut().note_exit_redirect();
        }

        let target = self.machine().active().unwrap_or(source);
        if target(self, &Event::<Self::Payload>::ENTRY).is_transition() {
            self.machine_mut().note_cascade(Signal::ENTRY);
        }

        let kind = if std::ptr::fn_addr_eq(source, target) {
            TransitionKind::SelfTransition
        } else {
            TransitionKind::External
        };
        self.machine_mut().note_transition(event.signal(), kind);
    }

    /// Switch to `target` and return the matching `Transition` result.
    fn transition_to(&mut self, target: StateHandler<Self>) -> DispatchResult {
        self.machine_mut().transition_to(target)
    }
}
