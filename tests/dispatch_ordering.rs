//! End-to-end checks of the delivery order guaranteed by the engine.

use fsm_dispatch::builder::MachineBuilder;
use fsm_dispatch::core::{DispatchResult, Event, Signal, TransitionKind};
use fsm_dispatch::engine::{Fsm, Machine, Phase};

const TIMEOUT: Signal = Signal::new(10);
const POKE: Signal = Signal::new(11);
const RESTART: Signal = Signal::new(12);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Name {
    A,
    B,
}

struct PingPong {
    machine: Machine<Self>,
    deliveries: Vec<(Name, Signal)>,
}

impl PingPong {
    fn new() -> Self {
        Self::with_machine(Machine::new())
    }

    fn with_machine(machine: Machine<Self>) -> Self {
        Self {
            machine,
            deliveries: Vec::new(),
        }
    }

    fn state_a(&mut self, e: &Event) -> DispatchResult {
        self.deliveries.push((Name::A, e.signal()));
        match e.signal() {
            Signal::ENTRY | Signal::EXIT | Signal::INIT => DispatchResult::Handled,
            TIMEOUT => self.transition_to(Self::state_b),
            POKE => DispatchResult::Handled,
            RESTART => self.transition_to(Self::state_a),
            _ => DispatchResult::Ignored,
        }
    }

    fn state_b(&mut self, e: &Event) -> DispatchResult {
        self.deliveries.push((Name::B, e.signal()));
        match e.signal() {
            Signal::ENTRY | Signal::EXIT => DispatchResult::Handled,
            TIMEOUT => self.transition_to(Self::state_a),
            _ => DispatchResult::Ignored,
        }
    }

    fn take(&mut self) -> Vec<(Name, Signal)> {
        std::mem::take(&mut self.deliveries)
    }
}

impl Fsm for PingPong {
    type Payload = ();

    fn machine(&self) -> &Machine<Self> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut Machine<Self> {
        &mut self.machine
    }
}

#[test]
fn init_delivers_exactly_init_then_entry() {
    let mut fsm = PingPong::new();
    fsm.init(PingPong::state_a).unwrap();

    assert_eq!(
        fsm.take(),
        vec![(Name::A, Signal::INIT), (Name::A, Signal::ENTRY)]
    );
    assert_eq!(fsm.machine().phase(), Phase::Running);
}

#[test]
fn transition_delivers_trigger_exit_entry_in_order() {
    let mut fsm = PingPong::new();
    fsm.init(PingPong::state_a).unwrap();
    fsm.take();

    fsm.dispatch(&Event::new(TIMEOUT));

    assert_eq!(
        fsm.take(),
        vec![
            (Name::A, TIMEOUT),
            (Name::A, Signal::EXIT),
            (Name::B, Signal::ENTRY)
        ]
    );
    assert!(fsm.machine().is_in(PingPong::state_b));

    fsm.dispatch(&Event::new(TIMEOUT));

    assert_eq!(
        fsm.take(),
        vec![
            (Name::B, TIMEOUT),
            (Name::B, Signal::EXIT),
            (Name::A, Signal::ENTRY)
        ]
    );
    assert!(fsm.machine().is_in(PingPong::state_a));
}

#[test]
fn handled_and_ignored_events_leave_state_alone() {
    let mut fsm = PingPong::new();
    fsm.init(PingPong::state_a).unwrap();
    fsm.take();

    fsm.dispatch(&Event::new(POKE));
    fsm.dispatch(&Event::new(Signal::new(99)));

    assert_eq!(
        fsm.take(),
        vec![(Name::A, POKE), (Name::A, Signal::new(99))]
    );
    assert!(fsm.machine().is_in(PingPong::state_a));
    assert_eq!(fsm.machine().stats().transitions, 0);
}

#[test]
fn self_transition_exits_and_reenters() {
    let mut fsm = PingPong::new();
    fsm.init(PingPong::state_a).unwrap();
    fsm.take();

    fsm.dispatch(&Event::new(RESTART));

    assert_eq!(
        fsm.take(),
        vec![
            (Name::A, RESTART),
            (Name::A, Signal::EXIT),
            (Name::A, Signal::ENTRY)
        ]
    );
    assert!(fsm.machine().is_in(PingPong::state_a));
}

#[test]
fn dispatch_before_init_does_nothing() {
    let mut fsm = PingPong::new();

    for _ in 0..3 {
        fsm.dispatch(&Event::new(TIMEOUT));
    }

    assert!(fsm.take().is_empty());
    assert_eq!(fsm.machine().phase(), Phase::Uninitialized);
    assert_eq!(fsm.machine().stats().dispatched, 0);
}

#[test]
fn ten_timeouts_end_back_in_a() {
    let mut fsm = PingPong::new();
    fsm.init(PingPong::state_a).unwrap();

    for i in 1..=10 {
        fsm.dispatch(&Event::new(TIMEOUT));
        let expect_b = i % 2 == 1;
        assert_eq!(fsm.machine().is_in(PingPong::state_b), expect_b);
        assert_eq!(fsm.machine().is_in(PingPong::state_a), !expect_b);
    }

    assert!(fsm.machine().is_in(PingPong::state_a));
    // INIT + ENTRY, then three deliveries per timeout
    assert_eq!(fsm.take().len(), 2 + 10 * 3);
    assert_eq!(fsm.machine().stats().transitions, 10);
}

#[test]
fn transition_log_records_each_move() {
    let machine = MachineBuilder::new()
        .label("ping-pong")
        .history_capacity(8)
        .build()
        .unwrap();
    let mut fsm = PingPong::with_machine(machine);
    fsm.init(PingPong::state_a).unwrap();
    fsm.dispatch(&Event::new(TIMEOUT));
    fsm.dispatch(&Event::new(POKE));
    fsm.dispatch(&Event::new(TIMEOUT));
    fsm.dispatch(&Event::new(RESTART));

    let records: Vec<_> = fsm
        .machine()
        .history()
        .records()
        .map(|r| (r.trigger, r.kind))
        .collect();

    assert_eq!(
        records,
        vec![
            (Signal::INIT, TransitionKind::Initial),
            (TIMEOUT, TransitionKind::External),
            (TIMEOUT, TransitionKind::External),
            (RESTART, TransitionKind::SelfTransition),
        ]
    );
}

#[test]
fn logging_subscriber_does_not_change_behavior() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fsm_dispatch=trace")
        .with_test_writer()
        .try_init();

    let mut fsm = PingPong::new();
    fsm.dispatch(&Event::new(TIMEOUT));
    fsm.init(PingPong::state_a).unwrap();
    fsm.dispatch(&Event::new(TIMEOUT));

    assert!(fsm.machine().is_in(PingPong::state_b));
    assert_eq!(
        fsm.take(),
        vec![
            (Name::A, Signal::INIT),
            (Name::A, Signal::ENTRY),
            (Name::A, TIMEOUT),
            (Name::A, Signal::EXIT),
            (Name::B, Signal::ENTRY)
        ]
    );
}

struct Thermostat {
    machine: Machine<Self>,
    target: i32,
}

const SET: Signal = Signal::user(0);

impl Thermostat {
    fn idle(&mut self, e: &Event<i32>) -> DispatchResult {
        match (e.signal(), e.payload()) {
            (SET, Some(&target)) if target != self.target => {
                self.target = target;
                self.transition_to(Self::heating)
            }
            _ => DispatchResult::Ignored,
        }
    }

    fn heating(&mut self, e: &Event<i32>) -> DispatchResult {
        match (e.signal(), e.payload()) {
            (SET, Some(&target)) => {
                self.target = target;
                DispatchResult::Handled
            }
            _ => DispatchResult::Ignored,
        }
    }
}

impl Fsm for Thermostat {
    type Payload = i32;

    fn machine(&self) -> &Machine<Self> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut Machine<Self> {
        &mut self.machine
    }
}

#[test]
fn payload_reaches_handlers() {
    let mut thermostat = Thermostat {
        machine: Machine::new(),
        target: 18,
    };
    thermostat.init(Thermostat::idle).unwrap();

    thermostat.dispatch(&Event::with_payload(SET, 18));
    assert!(thermostat.machine().is_in(Thermostat::idle));

    thermostat.dispatch(&Event::with_payload(SET, 21));
    assert!(thermostat.machine().is_in(Thermostat::heating));
    assert_eq!(thermostat.target, 21);

    thermostat.dispatch(&Event::with_payload(SET, 23));
    assert_eq!(thermostat.target, 23);
    assert_eq!(thermostat.machine().stats().handled, 1);
}
