//! Construction helpers: configuration, the machine builder and the
//! `signals!` macro.
//!
//! Machines can be created directly with [`Machine::new`](crate::engine::Machine::new)
//! when the defaults are fine. The builder exists for everything else: a log
//! label, a reinit policy, a transition log, or a configuration loaded from
//! JSON.

pub mod config;
pub mod error;
pub mod machine;
pub mod macros;

pub use config::{MachineConfig, ReinitPolicy, MAX_HISTORY_CAPACITY, MAX_LABEL_LEN};
pub use error::{BuildError, ConfigViolation};
pub use machine::MachineBuilder;
