//! Builder for constructing machines.

use crate::builder::config::{MachineConfig, ReinitPolicy};
use crate::builder::error::BuildError;
use crate::engine::{Fsm, Machine};
use std::marker::PhantomData;
use stillwater::validation::Validation;
use uuid::Uuid;

/// Builder for constructing a [`Machine`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::builder::{MachineBuilder, ReinitPolicy};
/// use fsm_dispatch::engine::{Fsm, Machine};
///
/// struct Door {
///     machine: Machine<Self>,
/// }
///
/// impl Fsm for Door {
///     type Payload = ();
///     fn machine(&self) -> &Machine<Self> { &self.machine }
///     fn machine_mut(&mut self) -> &mut Machine<Self> { &mut self.machine }
/// }
///
/// let machine: Machine<Door> = MachineBuilder::new()
///     .label("door")
///     .reinit(ReinitPolicy::Reset)
///     .history_capacity(16)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.label(), "door");
/// assert_eq!(machine.history().capacity(), 16);
/// ```
pub struct MachineBuilder<F: Fsm> {
    config: MachineConfig,
    id: Option<Uuid>,
    _phantom: PhantomData<fn() -> F>,
}

impl<F: Fsm> MachineBuilder<F> {
    /// Create a builder starting from the default configuration.
    pub fn new() -> Self {
        Self::from_config(MachineConfig::default())
    }

    /// Create a builder from an existing configuration.
    pub fn from_config(config: MachineConfig) -> Self {
        Self {
            config,
            id: None,
            _phantom: PhantomData,
        }
    }

    /// Set the label used in log output.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Set what a second `init` does.
    pub fn reinit(mut self, policy: ReinitPolicy) -> Self {
        self.config.reinit = policy;
        self
    }

    /// Retain the last `capacity` transitions (0 disables the log).
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Use a fixed id instead of a random one.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Build the machine.
    /// Returns every configuration violation at once if validation fails.
    pub fn build(self) -> Result<Machine<F>, BuildError> {
        if let Validation::Failure(errors) = self.config.validate() {
            return Err(BuildError::InvalidConfig(errors.iter().cloned().collect()));
        }

        let id = self.id.unwrap_or_else(Uuid::new_v4);
        Ok(Machine::from_config(id, self.config))
    }
}

impl<F: Fsm> Default for MachineBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}
