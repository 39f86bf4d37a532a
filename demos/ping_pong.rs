//! Ping-Pong State Machine
//!
//! Two states hand control back and forth on every timeout.
//!
//! Key concepts:
//! - States as plain methods
//! - INIT/ENTRY on start, EXIT/ENTRY on every transition
//! - User signals declared with `signals!`
//!
//! Run with: cargo run --example ping_pong
//! Set RUST_LOG=fsm_dispatch=debug to watch the engine's own log lines.

use fsm_dispatch::builder::MachineBuilder;
use fsm_dispatch::core::{DispatchResult, Event, Signal};
use fsm_dispatch::engine::{Fsm, Machine};
use fsm_dispatch::signals;
use tracing_subscriber::EnvFilter;

signals! {
    enum PingSignal {
        Timeout,
    }
}

struct PingPong {
    machine: Machine<Self>,
}

impl PingPong {
    fn state_a(&mut self, e: &Event) -> DispatchResult {
        match e.signal() {
            Signal::ENTRY => println!("Entering A"),
            Signal::EXIT => println!("Exiting A"),
            s if s == PingSignal::Timeout.signal() => {
                println!("Timeout A");
                return self.transition_to(Self::state_b);
            }
            _ => {}
        }
        DispatchResult::Handled
    }

    fn state_b(&mut self, e: &Event) -> DispatchResult {
        match e.signal() {
            Signal::ENTRY => println!("Entering B"),
            Signal::EXIT => println!("Exiting B"),
            s if s == PingSignal::Timeout.signal() => {
                println!("Timeout B");
                return self.transition_to(Self::state_a);
            }
            _ => {}
        }
        DispatchResult::Handled
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Ping-Pong State Machine ===\n");

    let machine = MachineBuilder::new()
        .label("ping-pong")
        .history_capacity(16)
        .build()?;
    let mut fsm = PingPong { machine };

    fsm.init(PingPong::state_a)?;

    let timeout = PingSignal::Timeout.event();
    for _ in 0..10 {
        fsm.dispatch(&timeout);
    }

    let stats = fsm.machine().stats();
    println!("\nDispatched {} events, {} transitions", stats.dispatched, stats.transitions);
    println!(
        "Final state: {}",
        if fsm.machine().is_in(PingPong::state_a) { "A" } else { "B" }
    );
    println!(
        "Transition log: {}",
        serde_json::to_string_pretty(fsm.machine().history())?
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
